//! hudreplay records an interactive HUD session as a timestamped event log and reconstructs the
//! exact scene state at any point in time, so an offline render pass can reproduce what the
//! operator saw frame for frame.
//!
//! - Capture events with a [`Recorder`] and transition start times with a [`TimingBridge`]
//! - Persist both as a [`SessionRecording`]
//! - Query state with a [`Replayer`], or drive whole frame ranges through a [`ReplaySession`]
#![forbid(unsafe_code)]

pub mod animation;
pub mod bridge;
pub mod foundation;
pub mod record;
pub mod replay;
pub mod session;
pub mod view;

pub use crate::animation::ease::Ease;
pub use crate::bridge::registry::{ElementKey, TimingRegistry};
pub use crate::bridge::timing::{BridgeMode, TimingBridge};
pub use crate::bridge::transition::{Presentation, Transition};
pub use crate::foundation::clock::{Clock, SystemClock, VirtualClock};
pub use crate::foundation::core::{Fps, FrameIndex, FrameRange, Point, TimeMs, Vec2};
pub use crate::foundation::error::{HudError, HudResult};
pub use crate::record::event::{Event, EventKind, EventPayload};
pub use crate::record::recorder::Recorder;
pub use crate::replay::replayer::Replayer;
pub use crate::replay::snapshot::Snapshot;
pub use crate::session::fingerprint::FrameFingerprint;
pub use crate::session::recording::SessionRecording;
pub use crate::session::render::{FramePayload, ReplayOpts, ReplaySession, ReplayStats};
pub use crate::view::cycle::{CycleSpec, cycle_frame_index};
pub use crate::view::progress::{AnimatedValues, all_animation_progress, animation_progress};
