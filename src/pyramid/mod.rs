pub mod scale_space_pyramid;
pub mod derived_pyramid;
pub mod oriented_pyramid;

pub use crate::filter::gauss_kernel::BlurScale;

fn check_index(axis: &str, idx: usize, len: usize) {
    assert!(idx < len, "{} index {} out of range, pyramid has {} {}s", axis, idx, len, axis);
}
