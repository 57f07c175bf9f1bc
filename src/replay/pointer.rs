use crate::animation::lerp::Lerp;
use crate::foundation::core::{Point, TimeMs};
use crate::record::event::{Event, EventPayload};
use crate::replay::snapshot::PointerState;

#[derive(Clone, Copy, Debug, PartialEq)]
struct ButtonSample {
    time: TimeMs,
    pressed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PositionSample {
    time: TimeMs,
    position: Point,
}

/// Continuous pointer signal extracted from a sorted event list.
///
/// Position is linearly interpolated between the bracketing samples; button state is a step
/// function taking the value of the latest sample at or before the query.
#[derive(Clone, Debug, Default)]
pub(crate) struct PointerTrack {
    positions: Vec<PositionSample>,
    buttons: Vec<ButtonSample>,
}

impl PointerTrack {
    /// `events` must already be sorted by timestamp.
    pub(crate) fn from_sorted(events: &[Event]) -> Self {
        let mut track = Self::default();
        let mut pressed = false;
        let mut last = Point::ORIGIN;

        for e in events {
            let (x, y) = match &e.payload {
                EventPayload::PointerMove(p) => {
                    if let Some(v) = p.pressed {
                        pressed = v;
                    }
                    (p.x, p.y)
                }
                EventPayload::PointerClick(p) => {
                    pressed = true;
                    (p.x, p.y)
                }
                EventPayload::PointerRelease(p) => {
                    pressed = false;
                    (p.x, p.y)
                }
                _ => continue,
            };

            track.buttons.push(ButtonSample {
                time: e.timestamp,
                pressed,
            });

            let x = x.filter(|v| v.is_finite());
            let y = y.filter(|v| v.is_finite());
            if x.is_some() || y.is_some() {
                last = Point::new(x.unwrap_or(last.x), y.unwrap_or(last.y));
                track.positions.push(PositionSample {
                    time: e.timestamp,
                    position: last,
                });
            }
        }
        track
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub(crate) fn resolve(&self, t: TimeMs) -> PointerState {
        PointerState {
            position: self.position_at(t),
            pressed: self.pressed_at(t),
        }
    }

    fn position_at(&self, t: TimeMs) -> Point {
        let (Some(first), Some(last)) = (self.positions.first(), self.positions.last()) else {
            return Point::ORIGIN;
        };

        let idx = self.positions.partition_point(|s| s.time <= t);
        if idx == 0 {
            return first.position;
        }
        if idx >= self.positions.len() {
            return last.position;
        }

        let a = &self.positions[idx - 1];
        let b = &self.positions[idx];
        let span = b.time - a.time;
        if span <= 0.0 {
            return a.position;
        }
        <Point as Lerp>::lerp(&a.position, &b.position, (t - a.time) / span)
    }

    fn pressed_at(&self, t: TimeMs) -> bool {
        let idx = self.buttons.partition_point(|s| s.time <= t);
        idx > 0 && self.buttons[idx - 1].pressed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/replay/pointer.rs"]
mod tests;
