use std::{fmt, fs, path::Path};

use color_eyre::eyre::{Result, ensure, WrapErr};
use serde::{Serialize, Deserialize};

use crate::Float;
use crate::filter::{border::BorderMode, gabor_kernel::GaborParameters, gauss_kernel::MAX_SIGMA};
use crate::fusion::FusionPolicy;

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct SaliencyRuntimeParameters {
    pub contrast_layer_count: usize,
    pub center_sigma: Float,
    pub surround_sigma: Float,
    pub border_mode: BorderMode,
    pub orientation_layer_count: usize,
    pub orientation_sigma: Float,
    pub laplacian_sigma: Float,
    pub orientation_count: usize,
    pub gabor: GaborParameters,
    /// Merges the on-off and off-on maps of a channel
    pub contrast_fusion: FusionPolicy,
    /// Merges channel, orientation and final feature maps
    pub feature_fusion: FusionPolicy,
    pub output_range: (Float, Float)
}

impl Default for SaliencyRuntimeParameters {
    fn default() -> SaliencyRuntimeParameters {
        SaliencyRuntimeParameters {
            contrast_layer_count: 4,
            center_sigma: 2.0,
            surround_sigma: (5.0 as Float).sqrt(),
            border_mode: BorderMode::Replicate,
            orientation_layer_count: 5,
            orientation_sigma: 1.0,
            laplacian_sigma: 4.0,
            orientation_count: 8,
            gabor: GaborParameters::default(),
            contrast_fusion: FusionPolicy::Max,
            feature_fusion: FusionPolicy::default(),
            output_range: (0.0, 1.0)
        }
    }
}

impl SaliencyRuntimeParameters {

    pub fn validate(&self) -> Result<()> {
        ensure!(self.contrast_layer_count > 0, "contrast_layer_count must be positive");
        ensure!(self.orientation_layer_count > 0, "orientation_layer_count must be positive");
        ensure!(self.orientation_count > 0, "orientation_count must be positive");
        for (name, sigma) in [("center_sigma", self.center_sigma), ("surround_sigma", self.surround_sigma),
                              ("orientation_sigma", self.orientation_sigma), ("laplacian_sigma", self.laplacian_sigma)].iter() {
            ensure!(sigma.is_finite() && *sigma > 0.0, "{} must be positive, got {}", name, sigma);
            ensure!(*sigma <= MAX_SIGMA, "{} must not exceed {}, got {}", name, MAX_SIGMA, sigma);
        }
        for policy in [self.contrast_fusion, self.feature_fusion].iter() {
            if let FusionPolicy::Mean { w1, w2 } = policy {
                ensure!(w1.is_finite() && w2.is_finite(), "mean fusion weights must be finite, got {} and {}", w1, w2);
                ensure!(w1 + w2 != 0.0, "mean fusion weights must not sum to zero");
            }
        }
        ensure!(self.output_range.0 < self.output_range.1, "output_range must be increasing, got {:?}", self.output_range);
        self.gabor.validate()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<SaliencyRuntimeParameters> {
        let runtime_parameters: SaliencyRuntimeParameters = serde_yaml::from_str(yaml).wrap_err("could not parse saliency runtime parameters")?;
        runtime_parameters.validate()?;
        Ok(runtime_parameters)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).wrap_err("could not serialize saliency runtime parameters")
    }
}

pub fn load_runtime_parameters<P: AsRef<Path>>(path: P) -> Result<SaliencyRuntimeParameters> {
    let path = path.as_ref();
    let yaml = fs::read_to_string(path).wrap_err_with(|| format!("could not read {}", path.display()))?;
    SaliencyRuntimeParameters::from_yaml_str(&yaml)
}

impl fmt::Display for SaliencyRuntimeParameters {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let fusion_name = |policy: &FusionPolicy| match policy {
            FusionPolicy::Mean { w1, w2 } => format!("mean_{}_{}", w1, w2),
            FusionPolicy::Max => String::from("max")
        };
        write!(f, "cs_l_{}_c_{:.2}_s_{:.2}_or_l_{}_n_{}_lap_{:.2}_cf_{}_ff_{}",
            self.contrast_layer_count, self.center_sigma, self.surround_sigma,
            self.orientation_layer_count, self.orientation_count, self.laplacian_sigma,
            fusion_name(&self.contrast_fusion), fusion_name(&self.feature_fusion))
    }

}
