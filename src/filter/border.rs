use serde::{Serialize, Deserialize};

use crate::Float;

/// How samples outside the image are synthesized during filtering.
#[derive(Debug,Copy,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// Every outside sample has the given value
    Constant(Float),
    /// Outside samples copy the nearest edge sample: aaa|abcd|ddd
    Replicate,
    /// Mirror without repeating the edge sample: cb|abcd|cb
    Reflect101
}

impl BorderMode {
    pub fn zero() -> BorderMode {
        BorderMode::Constant(0.0)
    }
}

impl Default for BorderMode {
    fn default() -> BorderMode {
        BorderMode::Reflect101
    }
}

/// Maps a possibly out of range index into [0, len). None means the constant value applies.
pub fn map_index(i: isize, len: usize, mode: &BorderMode) -> Option<usize> {
    if i >= 0 && (i as usize) < len {
        return Some(i as usize);
    }
    match mode {
        BorderMode::Constant(_) => None,
        BorderMode::Replicate => {
            if len == 0 {
                return None;
            }
            if i < 0 {
                Some(0)
            } else {
                Some(len - 1)
            }
        }
        BorderMode::Reflect101 => {
            if len == 0 {
                return None;
            }
            if len == 1 {
                return Some(0);
            }

            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len {
                Some(r)
            } else {
                Some((2 * len - 2) - r)
            }
        }
    }
}

/// Constant value used when map_index yields None
pub fn border_value(mode: &BorderMode) -> Float {
    match mode {
        BorderMode::Constant(v) => *v,
        _ => 0.0
    }
}
