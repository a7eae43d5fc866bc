//! Default value functions for serde deserialization.

use crate::core::Movement;

pub fn movement() -> Movement {
    Movement::Eight
}

pub fn diagonal_cost() -> f32 {
    std::f32::consts::SQRT_2
}

pub fn enabled() -> bool {
    true
}

pub fn colinear_tolerance() -> f32 {
    1e-4
}
