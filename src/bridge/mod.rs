//! One transition declaration driven by either wall-clock or externally supplied time.

pub mod registry;
pub mod timing;
pub mod transition;
