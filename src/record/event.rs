use serde::ser::SerializeStruct as _;

use crate::foundation::core::TimeMs;
use crate::record::payload::{
    AlertPost, AnimationEnd, AnimationStart, ChatPost, Death, EffectEnd, EffectStart,
    EnergyChange, HpChange, MarkerRemove, MarkerSpawn, OnboardingStep, PointerClick, PointerMove,
    PointerRelease, ScenarioChange, ShieldChange, TargetLock, TargetMove, TargetRelease,
    ThemeChange, UiEnter, UiExit,
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Closed set of recordable event kinds. Serialized as the wire `type` string.
pub enum EventKind {
    ScenarioChange,
    ThemeChange,
    OnboardingStep,
    UiEnter,
    UiExit,
    AnimationStart,
    AnimationEnd,
    EffectStart,
    EffectEnd,
    HpChange,
    ShieldChange,
    EnergyChange,
    Death,
    TargetLock,
    TargetMove,
    TargetRelease,
    MarkerSpawn,
    MarkerRemove,
    ChatPost,
    AlertPost,
    PointerMove,
    PointerClick,
    PointerRelease,
}

impl EventKind {
    /// Wire name of this kind (`"HP_CHANGE"`, `"UI_ENTER"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ScenarioChange => "SCENARIO_CHANGE",
            Self::ThemeChange => "THEME_CHANGE",
            Self::OnboardingStep => "ONBOARDING_STEP",
            Self::UiEnter => "UI_ENTER",
            Self::UiExit => "UI_EXIT",
            Self::AnimationStart => "ANIMATION_START",
            Self::AnimationEnd => "ANIMATION_END",
            Self::EffectStart => "EFFECT_START",
            Self::EffectEnd => "EFFECT_END",
            Self::HpChange => "HP_CHANGE",
            Self::ShieldChange => "SHIELD_CHANGE",
            Self::EnergyChange => "ENERGY_CHANGE",
            Self::Death => "DEATH",
            Self::TargetLock => "TARGET_LOCK",
            Self::TargetMove => "TARGET_MOVE",
            Self::TargetRelease => "TARGET_RELEASE",
            Self::MarkerSpawn => "MARKER_SPAWN",
            Self::MarkerRemove => "MARKER_REMOVE",
            Self::ChatPost => "CHAT_POST",
            Self::AlertPost => "ALERT_POST",
            Self::PointerMove => "POINTER_MOVE",
            Self::PointerClick => "POINTER_CLICK",
            Self::PointerRelease => "POINTER_RELEASE",
        }
    }

    /// Continuous pointer kinds are resolved by interpolation, not by the discrete fold.
    pub fn is_pointer(self) -> bool {
        matches!(
            self,
            Self::PointerMove | Self::PointerClick | Self::PointerRelease
        )
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
/// Typed payload, one variant per [`EventKind`].
pub enum EventPayload {
    ScenarioChange(ScenarioChange),
    ThemeChange(ThemeChange),
    OnboardingStep(OnboardingStep),
    UiEnter(UiEnter),
    UiExit(UiExit),
    AnimationStart(AnimationStart),
    AnimationEnd(AnimationEnd),
    EffectStart(EffectStart),
    EffectEnd(EffectEnd),
    HpChange(HpChange),
    ShieldChange(ShieldChange),
    EnergyChange(EnergyChange),
    Death(Death),
    TargetLock(TargetLock),
    TargetMove(TargetMove),
    TargetRelease(TargetRelease),
    MarkerSpawn(MarkerSpawn),
    MarkerRemove(MarkerRemove),
    ChatPost(ChatPost),
    AlertPost(AlertPost),
    PointerMove(PointerMove),
    PointerClick(PointerClick),
    PointerRelease(PointerRelease),
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ScenarioChange(_) => EventKind::ScenarioChange,
            Self::ThemeChange(_) => EventKind::ThemeChange,
            Self::OnboardingStep(_) => EventKind::OnboardingStep,
            Self::UiEnter(_) => EventKind::UiEnter,
            Self::UiExit(_) => EventKind::UiExit,
            Self::AnimationStart(_) => EventKind::AnimationStart,
            Self::AnimationEnd(_) => EventKind::AnimationEnd,
            Self::EffectStart(_) => EventKind::EffectStart,
            Self::EffectEnd(_) => EventKind::EffectEnd,
            Self::HpChange(_) => EventKind::HpChange,
            Self::ShieldChange(_) => EventKind::ShieldChange,
            Self::EnergyChange(_) => EventKind::EnergyChange,
            Self::Death(_) => EventKind::Death,
            Self::TargetLock(_) => EventKind::TargetLock,
            Self::TargetMove(_) => EventKind::TargetMove,
            Self::TargetRelease(_) => EventKind::TargetRelease,
            Self::MarkerSpawn(_) => EventKind::MarkerSpawn,
            Self::MarkerRemove(_) => EventKind::MarkerRemove,
            Self::ChatPost(_) => EventKind::ChatPost,
            Self::AlertPost(_) => EventKind::AlertPost,
            Self::PointerMove(_) => EventKind::PointerMove,
            Self::PointerClick(_) => EventKind::PointerClick,
            Self::PointerRelease(_) => EventKind::PointerRelease,
        }
    }

    /// Decode a wire payload for `kind`.
    ///
    /// Never fails: a payload that is not an object decodes as the all-absent record.
    pub fn from_json(kind: EventKind, value: serde_json::Value) -> Self {
        match kind {
            EventKind::ScenarioChange => Self::ScenarioChange(decode(kind, value)),
            EventKind::ThemeChange => Self::ThemeChange(decode(kind, value)),
            EventKind::OnboardingStep => Self::OnboardingStep(decode(kind, value)),
            EventKind::UiEnter => Self::UiEnter(decode(kind, value)),
            EventKind::UiExit => Self::UiExit(decode(kind, value)),
            EventKind::AnimationStart => Self::AnimationStart(decode(kind, value)),
            EventKind::AnimationEnd => Self::AnimationEnd(decode(kind, value)),
            EventKind::EffectStart => Self::EffectStart(decode(kind, value)),
            EventKind::EffectEnd => Self::EffectEnd(decode(kind, value)),
            EventKind::HpChange => Self::HpChange(decode(kind, value)),
            EventKind::ShieldChange => Self::ShieldChange(decode(kind, value)),
            EventKind::EnergyChange => Self::EnergyChange(decode(kind, value)),
            EventKind::Death => Self::Death(decode(kind, value)),
            EventKind::TargetLock => Self::TargetLock(decode(kind, value)),
            EventKind::TargetMove => Self::TargetMove(decode(kind, value)),
            EventKind::TargetRelease => Self::TargetRelease(decode(kind, value)),
            EventKind::MarkerSpawn => Self::MarkerSpawn(decode(kind, value)),
            EventKind::MarkerRemove => Self::MarkerRemove(decode(kind, value)),
            EventKind::ChatPost => Self::ChatPost(decode(kind, value)),
            EventKind::AlertPost => Self::AlertPost(decode(kind, value)),
            EventKind::PointerMove => Self::PointerMove(decode(kind, value)),
            EventKind::PointerClick => Self::PointerClick(decode(kind, value)),
            EventKind::PointerRelease => Self::PointerRelease(decode(kind, value)),
        }
    }
}

fn decode<T>(kind: EventKind, value: serde_json::Value) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    if value.is_null() {
        return T::default();
    }
    serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!(%kind, error = %e, "malformed event payload; treating as empty");
        T::default()
    })
}

impl From<ScenarioChange> for EventPayload {
    fn from(p: ScenarioChange) -> Self {
        Self::ScenarioChange(p)
    }
}

impl From<ThemeChange> for EventPayload {
    fn from(p: ThemeChange) -> Self {
        Self::ThemeChange(p)
    }
}

impl From<OnboardingStep> for EventPayload {
    fn from(p: OnboardingStep) -> Self {
        Self::OnboardingStep(p)
    }
}

impl From<UiEnter> for EventPayload {
    fn from(p: UiEnter) -> Self {
        Self::UiEnter(p)
    }
}

impl From<UiExit> for EventPayload {
    fn from(p: UiExit) -> Self {
        Self::UiExit(p)
    }
}

impl From<AnimationStart> for EventPayload {
    fn from(p: AnimationStart) -> Self {
        Self::AnimationStart(p)
    }
}

impl From<AnimationEnd> for EventPayload {
    fn from(p: AnimationEnd) -> Self {
        Self::AnimationEnd(p)
    }
}

impl From<EffectStart> for EventPayload {
    fn from(p: EffectStart) -> Self {
        Self::EffectStart(p)
    }
}

impl From<EffectEnd> for EventPayload {
    fn from(p: EffectEnd) -> Self {
        Self::EffectEnd(p)
    }
}

impl From<HpChange> for EventPayload {
    fn from(p: HpChange) -> Self {
        Self::HpChange(p)
    }
}

impl From<ShieldChange> for EventPayload {
    fn from(p: ShieldChange) -> Self {
        Self::ShieldChange(p)
    }
}

impl From<EnergyChange> for EventPayload {
    fn from(p: EnergyChange) -> Self {
        Self::EnergyChange(p)
    }
}

impl From<Death> for EventPayload {
    fn from(p: Death) -> Self {
        Self::Death(p)
    }
}

impl From<TargetLock> for EventPayload {
    fn from(p: TargetLock) -> Self {
        Self::TargetLock(p)
    }
}

impl From<TargetMove> for EventPayload {
    fn from(p: TargetMove) -> Self {
        Self::TargetMove(p)
    }
}

impl From<TargetRelease> for EventPayload {
    fn from(p: TargetRelease) -> Self {
        Self::TargetRelease(p)
    }
}

impl From<MarkerSpawn> for EventPayload {
    fn from(p: MarkerSpawn) -> Self {
        Self::MarkerSpawn(p)
    }
}

impl From<MarkerRemove> for EventPayload {
    fn from(p: MarkerRemove) -> Self {
        Self::MarkerRemove(p)
    }
}

impl From<ChatPost> for EventPayload {
    fn from(p: ChatPost) -> Self {
        Self::ChatPost(p)
    }
}

impl From<AlertPost> for EventPayload {
    fn from(p: AlertPost) -> Self {
        Self::AlertPost(p)
    }
}

impl From<PointerMove> for EventPayload {
    fn from(p: PointerMove) -> Self {
        Self::PointerMove(p)
    }
}

impl From<PointerClick> for EventPayload {
    fn from(p: PointerClick) -> Self {
        Self::PointerClick(p)
    }
}

impl From<PointerRelease> for EventPayload {
    fn from(p: PointerRelease) -> Self {
        Self::PointerRelease(p)
    }
}

/// One recorded, immutable state change.
///
/// Wire shape: `{ "timestamp": number, "type": string, "payload": object }`.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Milliseconds since recording start.
    pub timestamp: TimeMs,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(timestamp: TimeMs, payload: impl Into<EventPayload>) -> Self {
        Self {
            timestamp,
            payload: payload.into(),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }
}

impl serde::Serialize for Event {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut st = s.serialize_struct("Event", 3)?;
        st.serialize_field("timestamp", &self.timestamp)?;
        st.serialize_field("type", &self.kind())?;
        st.serialize_field("payload", &self.payload)?;
        st.end()
    }
}

#[derive(serde::Deserialize)]
struct RawEvent {
    timestamp: TimeMs,
    #[serde(rename = "type")]
    kind: EventKind,
    #[serde(default)]
    payload: serde_json::Value,
}

impl<'de> serde::Deserialize<'de> for Event {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = <RawEvent as serde::Deserialize>::deserialize(d)?;
        Ok(Self {
            timestamp: raw.timestamp,
            payload: EventPayload::from_json(raw.kind, raw.payload),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/record/event.rs"]
mod tests;
