use crate::bridge::registry::{ElementKey, TimingRegistry};
use crate::bridge::transition::{Presentation, Transition};
use crate::foundation::clock::Clock;
use crate::foundation::core::TimeMs;
use crate::record::payload::UiExit;
use crate::record::recorder::Recorder;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BridgeMode {
    /// Wall-clock driven interactive session. Mounts register start times.
    Continuous,
    /// Offline render. Start times come from the shipped registry and are never re-registered.
    Pull,
}

/// Runs one [`Transition`] declaration identically under both scheduling models.
///
/// In continuous mode the bridge captures the start time of each element's transition; in pull
/// mode it replays those start times against externally supplied virtual time.
#[derive(Clone, Debug)]
pub struct TimingBridge {
    mode: BridgeMode,
    registry: TimingRegistry,
}

impl TimingBridge {
    pub fn continuous() -> Self {
        Self {
            mode: BridgeMode::Continuous,
            registry: TimingRegistry::new(),
        }
    }

    pub fn pull(registry: TimingRegistry) -> Self {
        Self {
            mode: BridgeMode::Pull,
            registry,
        }
    }

    pub fn mode(&self) -> BridgeMode {
        self.mode
    }

    pub fn registry(&self) -> &TimingRegistry {
        &self.registry
    }

    /// Hand the captured start times off for serialization.
    pub fn into_registry(self) -> TimingRegistry {
        self.registry
    }

    /// Mount `key` at `now` and return the start time its transition runs from.
    ///
    /// Continuous mode registers `now` the first time a key is seen; later mounts of the same
    /// key (re-renders) keep the original start. Pull mode only looks the key up and falls back
    /// to `now` for unknown keys.
    pub fn mount(&mut self, key: &ElementKey, now: TimeMs) -> TimeMs {
        match self.mode {
            BridgeMode::Continuous => {
                let start = self.registry.register(key.clone(), now);
                if start == now {
                    tracing::trace!(%key, start, "transition start registered");
                }
                start
            }
            BridgeMode::Pull => self.start_or(key, now),
        }
    }

    /// [`TimingBridge::mount`] reading "now" from the recorder's elapsed time.
    pub fn mount_with<C: Clock>(&mut self, key: &ElementKey, recorder: &Recorder<C>) -> TimeMs {
        self.mount(key, recorder.current_elapsed())
    }

    /// Unmount `key`, logging the implicit UI exit. The registered start is kept so renders of
    /// the old instance stay reproducible; a later remount must use [`ElementKey::remount`].
    pub fn unmount<C: Clock>(&mut self, key: &ElementKey, recorder: &mut Recorder<C>) {
        if self.mode == BridgeMode::Continuous {
            recorder.log(UiExit {
                element_id: Some(key.id.clone()),
            });
        }
    }

    /// Presentation of `key` at `now`.
    ///
    /// Uses the registered start, or `fallback_start` when the key was never registered. Never
    /// fails: a missing registration degrades to "starts at `fallback_start`".
    pub fn sample(
        &self,
        key: &ElementKey,
        transition: &Transition,
        now: TimeMs,
        fallback_start: TimeMs,
    ) -> Presentation {
        let start = self.start_or(key, fallback_start);
        transition.sample(start, now)
    }

    fn start_or(&self, key: &ElementKey, fallback: TimeMs) -> TimeMs {
        self.registry.get(key).unwrap_or_else(|| {
            tracing::debug!(%key, fallback, "no recorded transition start; using fallback");
            fallback
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/timing.rs"]
mod tests;
