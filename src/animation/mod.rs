//! Easing and interpolation shared by derived views and transitions.

pub mod ease;
pub mod lerp;
