use std::collections::BTreeMap;

use crate::foundation::core::{Point, TimeMs};
use crate::record::event::{Event, EventPayload};

pub const DEFAULT_THEME: &str = "default";
pub const DEFAULT_HP: Vital = Vital {
    current: 1000.0,
    max: 1000.0,
};
pub const DEFAULT_SHIELD: Vital = Vital {
    current: 0.0,
    max: 500.0,
};
pub const DEFAULT_ENERGY: Vital = Vital {
    current: 100.0,
    max: 100.0,
};
/// Duration applied when an animation start carries none.
pub const DEFAULT_ANIMATION_MS: TimeMs = 300.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// A current/maximum stat pair. Values are stored as recorded, without clamping.
pub struct Vital {
    pub current: f64,
    pub max: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Vitals {
    pub hp: Vital,
    pub shield: Vital,
    pub energy: Vital,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            hp: DEFAULT_HP,
            shield: DEFAULT_SHIELD,
            energy: DEFAULT_ENERGY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Target {
    pub position: Point,
    pub locked_at: TimeMs,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Short-lived marker. Expiry by age is left to the consumer.
pub struct Marker {
    pub id: String,
    pub position: Point,
    pub label: Option<String>,
    pub spawned_at: TimeMs,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PointerState {
    pub position: Point,
    pub pressed: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            pressed: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Visibility window of a UI element.
pub struct UiElement {
    pub visible: bool,
    /// Mount generation, matching the timing registry's element epoch.
    pub epoch: u32,
    pub enter_time: TimeMs,
    pub exit_time: Option<TimeMs>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// In-flight named-property animation.
pub struct AnimationEntry {
    pub kind: Option<String>,
    pub start_time: TimeMs,
    pub duration: TimeMs,
    pub from: BTreeMap<String, f64>,
    pub to: BTreeMap<String, f64>,
    /// Set when an explicit end event arrived before the natural end.
    pub ended_at: Option<TimeMs>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageChannel {
    Chat,
    Alert,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Message {
    pub channel: MessageChannel,
    pub author: Option<String>,
    pub text: String,
    pub severity: Option<String>,
    pub posted_at: TimeMs,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Complete reconstructed scene state at one query time.
///
/// Keyed collections are ordered maps so two snapshots built from the same inputs compare and
/// serialize identically.
pub struct Snapshot {
    /// Query time after clamping to the recording range.
    pub time_ms: TimeMs,
    pub scenario: Option<String>,
    pub theme: String,
    pub onboarding_step: u32,
    pub vitals: Vitals,
    pub dead: bool,
    /// Active timed effects mapped to their start time.
    pub effects: BTreeMap<String, TimeMs>,
    pub targets: BTreeMap<String, Target>,
    pub markers: Vec<Marker>,
    pub pointer: PointerState,
    pub ui_elements: BTreeMap<String, UiElement>,
    pub animations: BTreeMap<String, AnimationEntry>,
    pub messages: Vec<Message>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            time_ms: 0.0,
            scenario: None,
            theme: DEFAULT_THEME.to_owned(),
            onboarding_step: 0,
            vitals: Vitals::default(),
            dead: false,
            effects: BTreeMap::new(),
            targets: BTreeMap::new(),
            markers: Vec::new(),
            pointer: PointerState::default(),
            ui_elements: BTreeMap::new(),
            animations: BTreeMap::new(),
            messages: Vec::new(),
        }
    }
}

impl Snapshot {
    /// Apply one discrete event.
    ///
    /// Missing payload fields leave the corresponding state untouched. Pointer events are
    /// ignored here; the replayer resolves them from the pointer track.
    pub(crate) fn apply(&mut self, event: &Event) {
        let t = event.timestamp;
        match &event.payload {
            EventPayload::ScenarioChange(p) => {
                if let Some(scenario) = &p.scenario {
                    self.scenario = Some(scenario.clone());
                }
            }
            EventPayload::ThemeChange(p) => {
                if let Some(theme) = &p.theme {
                    self.theme = theme.clone();
                }
            }
            EventPayload::OnboardingStep(p) => {
                if let Some(step) = p.step {
                    self.onboarding_step = step;
                }
            }
            EventPayload::UiEnter(p) => {
                if let Some(id) = &p.element_id {
                    self.ui_elements.insert(
                        id.clone(),
                        UiElement {
                            visible: true,
                            epoch: p.epoch.unwrap_or(0),
                            enter_time: t,
                            exit_time: None,
                        },
                    );
                }
            }
            EventPayload::UiExit(p) => {
                if let Some(el) = p.element_id.as_ref().and_then(|id| self.ui_elements.get_mut(id))
                {
                    el.visible = false;
                    el.exit_time = Some(t);
                }
            }
            EventPayload::AnimationStart(p) => {
                if let Some(id) = &p.animation_id {
                    let duration = p
                        .duration
                        .filter(|d| d.is_finite() && *d >= 0.0)
                        .unwrap_or(DEFAULT_ANIMATION_MS);
                    self.animations.insert(
                        id.clone(),
                        AnimationEntry {
                            kind: p.kind.clone(),
                            start_time: t,
                            duration,
                            from: finite_values(p.from.as_ref()),
                            to: finite_values(p.to.as_ref()),
                            ended_at: None,
                        },
                    );
                }
            }
            EventPayload::AnimationEnd(p) => {
                if let Some(anim) = p
                    .animation_id
                    .as_ref()
                    .and_then(|id| self.animations.get_mut(id))
                {
                    anim.ended_at.get_or_insert(t);
                }
            }
            EventPayload::EffectStart(p) => {
                for id in effect_ids(p.effect.as_ref(), p.effects.as_deref()) {
                    self.effects.insert(id.clone(), t);
                }
            }
            EventPayload::EffectEnd(p) => {
                for id in effect_ids(p.effect.as_ref(), p.effects.as_deref()) {
                    self.effects.remove(id);
                }
            }
            EventPayload::HpChange(p) => {
                set_vital(&mut self.vitals.hp, p.current_hp, p.max_hp);
            }
            EventPayload::ShieldChange(p) => {
                set_vital(&mut self.vitals.shield, p.current_shield, p.max_shield);
            }
            EventPayload::EnergyChange(p) => {
                set_vital(&mut self.vitals.energy, p.current_energy, p.max_energy);
            }
            EventPayload::Death(_) => {
                self.dead = true;
            }
            EventPayload::TargetLock(p) => {
                if let Some(id) = &p.target_id {
                    let previous = self.targets.get(id).map(|tg| tg.position);
                    let base = previous.unwrap_or(Point::ORIGIN);
                    self.targets.insert(
                        id.clone(),
                        Target {
                            position: Point::new(
                                finite(p.x).unwrap_or(base.x),
                                finite(p.y).unwrap_or(base.y),
                            ),
                            locked_at: t,
                        },
                    );
                }
            }
            EventPayload::TargetMove(p) => {
                if let Some(target) = p.target_id.as_ref().and_then(|id| self.targets.get_mut(id))
                {
                    if let Some(x) = finite(p.x) {
                        target.position.x = x;
                    }
                    if let Some(y) = finite(p.y) {
                        target.position.y = y;
                    }
                }
            }
            EventPayload::TargetRelease(p) => {
                if let Some(id) = &p.target_id {
                    self.targets.remove(id);
                }
            }
            EventPayload::MarkerSpawn(p) => {
                if let Some(id) = &p.marker_id {
                    self.markers.push(Marker {
                        id: id.clone(),
                        position: Point::new(
                            finite(p.x).unwrap_or(0.0),
                            finite(p.y).unwrap_or(0.0),
                        ),
                        label: p.label.clone(),
                        spawned_at: t,
                    });
                }
            }
            EventPayload::MarkerRemove(p) => {
                if let Some(idx) = p
                    .marker_id
                    .as_ref()
                    .and_then(|id| self.markers.iter().position(|m| &m.id == id))
                {
                    self.markers.remove(idx);
                }
            }
            EventPayload::ChatPost(p) => {
                if let Some(text) = &p.text {
                    self.messages.push(Message {
                        channel: MessageChannel::Chat,
                        author: p.author.clone(),
                        text: text.clone(),
                        severity: None,
                        posted_at: t,
                    });
                }
            }
            EventPayload::AlertPost(p) => {
                if let Some(text) = &p.text {
                    self.messages.push(Message {
                        channel: MessageChannel::Alert,
                        author: None,
                        text: text.clone(),
                        severity: p.severity.clone(),
                        posted_at: t,
                    });
                }
            }
            EventPayload::PointerMove(_)
            | EventPayload::PointerClick(_)
            | EventPayload::PointerRelease(_) => {}
        }
    }
}

fn effect_ids<'a>(
    single: Option<&'a String>,
    many: Option<&'a [String]>,
) -> impl Iterator<Item = &'a String> {
    single.into_iter().chain(many.unwrap_or_default())
}

// Non-finite numbers are treated as absent: NaN breaks snapshot equality and neither survives
// a JSON round trip.
fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite())
}

fn finite_values(map: Option<&BTreeMap<String, f64>>) -> BTreeMap<String, f64> {
    map.into_iter()
        .flatten()
        .filter(|(_, v)| v.is_finite())
        .map(|(k, v)| (k.clone(), *v))
        .collect()
}

fn set_vital(vital: &mut Vital, current: Option<f64>, max: Option<f64>) {
    if let Some(current) = finite(current) {
        vital.current = current;
    }
    if let Some(max) = finite(max) {
        vital.max = max;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/replay/snapshot.rs"]
mod tests;
