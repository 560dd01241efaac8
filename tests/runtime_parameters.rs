use std::fs;

use saliency::filter::border::BorderMode;
use saliency::fusion::FusionPolicy;
use saliency::{SaliencyRuntimeParameters, load_runtime_parameters};

#[test]
fn defaults_are_valid() {
    let params = SaliencyRuntimeParameters::default();
    assert!(params.validate().is_ok());
    assert_eq!(params.contrast_layer_count, 4);
    assert_eq!(params.orientation_count, 8);
    assert_eq!(params.contrast_fusion, FusionPolicy::Max);
    assert!(!format!("{}", params).is_empty());
}

#[test]
fn partial_yaml_keeps_remaining_defaults() {
    let yaml = "orientation_count: 4\nborder_mode: reflect101\nfeature_fusion:\n  policy: max\n";
    let params = SaliencyRuntimeParameters::from_yaml_str(yaml).unwrap();
    assert_eq!(params.orientation_count, 4);
    assert_eq!(params.border_mode, BorderMode::Reflect101);
    assert_eq!(params.feature_fusion, FusionPolicy::Max);
    assert_eq!(params.contrast_layer_count, SaliencyRuntimeParameters::default().contrast_layer_count);
    assert_eq!(params.gabor, SaliencyRuntimeParameters::default().gabor);
}

#[test]
fn yaml_survives_a_write_and_read() {
    let params = SaliencyRuntimeParameters {
        orientation_count: 6,
        feature_fusion: FusionPolicy::Mean { w1: 2.0, w2: 1.0 },
        output_range: (0.0, 255.0),
        ..SaliencyRuntimeParameters::default()
    };
    let yaml = params.to_yaml_string().unwrap();
    assert_eq!(SaliencyRuntimeParameters::from_yaml_str(&yaml).unwrap(), params);
}

#[test]
fn invalid_yaml_values_are_rejected() {
    assert!(SaliencyRuntimeParameters::from_yaml_str("orientation_count: 0\n").is_err());
    assert!(SaliencyRuntimeParameters::from_yaml_str("laplacian_sigma: -1.0\n").is_err());
    assert!(SaliencyRuntimeParameters::from_yaml_str("output_range: [1.0, 0.0]\n").is_err());
    assert!(SaliencyRuntimeParameters::from_yaml_str("contrast_fusion:\n  policy: mean\n  w1: 1.0\n  w2: -1.0\n").is_err());
    assert!(SaliencyRuntimeParameters::from_yaml_str("border_mode: wrap\n").is_err());
    assert!(SaliencyRuntimeParameters::from_yaml_str("surround_sigma: 1.0e17\n").is_err());
    assert!(SaliencyRuntimeParameters::from_yaml_str("feature_fusion:\n  policy: mean\n  w1: .nan\n  w2: 1.0\n").is_err());
}

#[test]
fn load_from_file() {
    let path = std::env::temp_dir().join(format!("saliency_runtime_parameters_{}.yaml", std::process::id()));
    fs::write(&path, "contrast_layer_count: 3\ncenter_sigma: 1.5\n").unwrap();
    let params = load_runtime_parameters(&path);
    fs::remove_file(&path).unwrap();

    let params = params.unwrap();
    assert_eq!(params.contrast_layer_count, 3);
    assert_eq!(params.center_sigma, 1.5);
}

#[test]
fn missing_file_fails() {
    let path = std::env::temp_dir().join("saliency_does_not_exist.yaml");
    assert!(load_runtime_parameters(&path).is_err());
}
