pub mod cycle;
pub mod progress;
