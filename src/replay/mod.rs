//! Deterministic reconstruction of scene state from a recorded event log.

pub(crate) mod pointer;
pub mod replayer;
pub mod snapshot;
