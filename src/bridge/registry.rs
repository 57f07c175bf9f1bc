use std::collections::BTreeMap;

use serde::ser::SerializeMap as _;

use crate::foundation::core::TimeMs;

const EPOCH_SEPARATOR: char = '@';

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Stable identity of one logical mount of an animated element.
///
/// `epoch` distinguishes "remounted as a new instance" from "re-rendered while mounted": only a
/// new epoch gets a new start time.
pub struct ElementKey {
    pub id: String,
    pub epoch: u32,
}

impl ElementKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            epoch: 0,
        }
    }

    pub fn with_epoch(id: impl Into<String>, epoch: u32) -> Self {
        Self {
            id: id.into(),
            epoch,
        }
    }

    /// Key of the next logical instance under the same id.
    pub fn remount(&self) -> Self {
        Self {
            id: self.id.clone(),
            epoch: self.epoch.saturating_add(1),
        }
    }

    /// Flat string form: the bare id for epoch 0, `"{id}@{epoch}"` otherwise.
    pub fn encode(&self) -> String {
        if self.epoch == 0 && !self.id.contains(EPOCH_SEPARATOR) {
            self.id.clone()
        } else {
            format!("{}{EPOCH_SEPARATOR}{}", self.id, self.epoch)
        }
    }

    pub fn decode(s: &str) -> Self {
        match s.rsplit_once(EPOCH_SEPARATOR) {
            Some((id, epoch)) => match epoch.parse::<u32>() {
                Ok(epoch) => Self::with_epoch(id, epoch),
                Err(_) => Self::new(s),
            },
            None => Self::new(s),
        }
    }
}

impl From<&str> for ElementKey {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ElementKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Start time of every animated element's current transition, captured interactively and
/// consumed by the render pass.
///
/// Serialized as a flat `{ string: number }` map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimingRegistry {
    starts: BTreeMap<ElementKey, TimeMs>,
}

impl TimingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `start` for `key` unless the key already has one. Returns the effective start.
    pub fn register(&mut self, key: ElementKey, start: TimeMs) -> TimeMs {
        *self.starts.entry(key).or_insert(start)
    }

    pub fn get(&self, key: &ElementKey) -> Option<TimeMs> {
        self.starts.get(key).copied()
    }

    pub fn contains(&self, key: &ElementKey) -> bool {
        self.starts.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ElementKey, TimeMs)> {
        self.starts.iter().map(|(k, v)| (k, *v))
    }
}

impl serde::Serialize for TimingRegistry {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(self.starts.len()))?;
        for (key, start) in &self.starts {
            map.serialize_entry(&key.encode(), start)?;
        }
        map.end()
    }
}

impl<'de> serde::Deserialize<'de> for TimingRegistry {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let flat = <BTreeMap<String, TimeMs> as serde::Deserialize>::deserialize(d)?;
        let mut registry = Self::new();
        for (key, start) in flat {
            registry.register(ElementKey::decode(&key), start);
        }
        Ok(registry)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/registry.rs"]
mod tests;
