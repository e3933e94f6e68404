//! Core types and service wiring for the binsignal collection notifier.

/// Domain models for schedules, streams, and light state.
pub mod model;
/// Traits describing the schedule, light, and audio-cue interfaces.
pub mod ports;
/// The blink-and-restore state machine driving the light.
pub mod sequencer;
/// High-level service facade used by the binary.
pub mod service;

pub use model::*;
pub use ports::*;
pub use sequencer::*;
pub use service::*;
