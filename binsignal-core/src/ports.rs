//! Traits describing the external collaborators and shared error types.

use async_trait::async_trait;
use chrono::ParseError as ChronoParseError;
use reqwest::Error as ReqwestError;

use crate::model::{LightSnapshot, PropertyId, Schedule, StateUpdate, Stream};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to the schedule source, the light
/// bridge, or the audio player.
pub enum PortError {
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Failed to parse a date from the schedule page.
    #[error("Parse error: {0}")]
    Parse(#[from] ChronoParseError),
    /// The schedule page did not match the expected layout.
    #[error("Schedule layout not recognised")]
    LayoutMismatch,
    /// The bridge returned a state response that could not be used.
    #[error("Malformed fixture state: {0}")]
    MalformedState(String),
    /// The audio player failed to start or exited abnormally.
    #[error("Playback failed: {0}")]
    Playback(String),
}

#[derive(thiserror::Error, Debug)]
/// Run-level failures surfaced by the service, one per abort point.
pub enum RunError {
    /// The schedule could not be resolved; nothing else was attempted.
    #[error("Schedule unavailable: {0}")]
    ScheduleUnavailable(#[source] PortError),
    /// The bridge could not provide an initial state; no mutation happened.
    #[error("Light session unreachable: {0}")]
    SessionUnreachable(#[source] PortError),
}

#[async_trait]
/// Trait for resolving a property's collection schedule.
pub trait SchedulePort: Send + Sync {
    /// Resolve the upcoming collection dates for a property.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails, the page layout is
    /// not recognised, or any of the three dates does not parse. A schedule
    /// with only some dates populated is never produced.
    async fn resolve(&self, property: &PropertyId) -> Result<Schedule, PortError>;
}

#[async_trait]
/// Trait for reading and writing the managed fixture's state.
pub trait LightPort: Send + Sync {
    /// Fetch the fixture's current on/hue/brightness.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the bridge is unreachable or the
    /// response cannot be interpreted.
    async fn state(&self) -> Result<LightSnapshot, PortError>;

    /// Apply a partial state update to the fixture.
    ///
    /// Each call is a single awaited round-trip; callers never issue two
    /// writes to the fixture concurrently.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the bridge rejects or drops the write.
    async fn apply(&self, update: &StateUpdate) -> Result<(), PortError>;
}

#[async_trait]
/// Trait for playing the fixed audio cue of a stream.
pub trait CuePlayer: Send + Sync {
    /// Play the sound asset associated with the given stream.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when playback cannot be started.
    async fn play(&self, stream: Stream) -> Result<(), PortError>;
}
