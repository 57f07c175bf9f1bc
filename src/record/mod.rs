//! Capture side: typed events and the clock-stamped recorder.

pub mod event;
pub mod payload;
pub mod recorder;
