//! Serialized sessions and the frame-indexed replay driver built on them.

pub mod fingerprint;
pub mod recording;
pub mod render;
