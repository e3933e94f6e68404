//! Domain data structures for properties, collection schedules, and light state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Bridge hue used when the next collection is recycling.
pub const RECYCLE_HUE: u16 = 10_443;
/// Bridge hue used when the next collection is green waste.
pub const GREEN_HUE: u16 = 21_905;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Municipal property number used to look up a collection schedule.
pub struct PropertyId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// One of the two alternating collection streams.
pub enum Stream {
    /// Recycling collection.
    Recycle,
    /// Green waste collection.
    Green,
}

impl Stream {
    /// Fixed bridge hue signalling this stream.
    #[must_use]
    pub fn hue(self) -> u16 {
        match self {
            Stream::Recycle => RECYCLE_HUE,
            Stream::Green => GREEN_HUE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Upcoming collection dates for a property.
///
/// A schedule only exists when all three dates resolved successfully;
/// a partially populated schedule cannot be constructed.
pub struct Schedule {
    /// Next general waste collection.
    pub waste: NaiveDate,
    /// Next green waste collection.
    pub green: NaiveDate,
    /// Next recycling collection.
    pub recycle: NaiveDate,
}

impl Schedule {
    /// The stream collected next.
    ///
    /// Recycling wins only when its date is strictly earlier; on equal
    /// dates the green stream is treated as next.
    #[must_use]
    pub fn next_stream(&self) -> Stream {
        if self.recycle < self.green {
            Stream::Recycle
        } else {
            Stream::Green
        }
    }

    /// Whether recycling is collected next.
    #[must_use]
    pub fn is_recycle(&self) -> bool {
        self.next_stream() == Stream::Recycle
    }

    /// Whether green waste is collected next.
    #[must_use]
    pub fn is_green(&self) -> bool {
        !self.is_recycle()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Fixture state captured once before a notification run.
///
/// The snapshot is taken before any mutating call and is the sole source
/// of truth for restoration; it is never refreshed mid-sequence.
pub struct LightSnapshot {
    /// Whether the fixture was powered on.
    pub on: bool,
    /// Hue at capture time.
    pub hue: u16,
    /// Brightness at capture time.
    #[serde(rename = "bri")]
    pub brightness: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Partial-update write body for the fixture.
///
/// Fields left as `None` are omitted from the payload, so the bridge
/// keeps their current values.
pub struct StateUpdate {
    /// Target power state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    /// Target hue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<u16>,
    /// Target brightness.
    #[serde(rename = "bri", skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
}

impl StateUpdate {
    /// Update that only switches power, leaving color untouched.
    #[must_use]
    pub fn power(on: bool) -> Self {
        Self {
            on: Some(on),
            hue: None,
            brightness: None,
        }
    }

    /// Update that turns the fixture on with the given color.
    #[must_use]
    pub fn lit(hue: u16, brightness: u8) -> Self {
        Self {
            on: Some(true),
            hue: Some(hue),
            brightness: Some(brightness),
        }
    }

    /// Fully specified update setting power, hue, and brightness.
    #[must_use]
    pub fn full(on: bool, hue: u16, brightness: u8) -> Self {
        Self {
            on: Some(on),
            hue: Some(hue),
            brightness: Some(brightness),
        }
    }
}
