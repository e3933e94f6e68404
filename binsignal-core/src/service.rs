//! High-level service facade combining schedule resolution and notification.

use std::sync::Arc;

use crate::model::{PropertyId, Schedule};
use crate::ports::{CuePlayer, LightPort, RunError, SchedulePort};
use crate::sequencer::NotificationSequencer;

/// Public entry point for resolving a schedule and signalling it.
pub struct BinsignalService {
    schedule_port: Arc<dyn SchedulePort>,
    sequencer: NotificationSequencer,
}

impl BinsignalService {
    /// Create a new service bound to the given schedule source, using the
    /// default blink cycle.
    #[must_use]
    pub fn new(schedule_port: Arc<dyn SchedulePort>) -> Self {
        Self {
            schedule_port,
            sequencer: NotificationSequencer::default(),
        }
    }

    /// Create a service with a custom sequencer.
    #[must_use]
    pub fn with_sequencer(schedule_port: Arc<dyn SchedulePort>, sequencer: NotificationSequencer) -> Self {
        Self {
            schedule_port,
            sequencer,
        }
    }

    /// Resolve the collection schedule for a property.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::ScheduleUnavailable`] when the source fails for
    /// any reason; no side effects have happened at that point.
    pub async fn resolve(&self, property: &PropertyId) -> Result<Schedule, RunError> {
        self.schedule_port
            .resolve(property)
            .await
            .map_err(RunError::ScheduleUnavailable)
    }

    /// Signal the schedule's next stream through the light and the audio cue.
    ///
    /// The fixture's state is captured once, before any mutation; the blink
    /// sequence and the audio cue then run concurrently and are both awaited.
    /// The stream is derived from the schedule exactly once and shared by
    /// the light color and the sound selection.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::SessionUnreachable`] when the initial state read
    /// fails; the fixture has not been touched and no cue has been played.
    /// Write failures inside the sequence and cue playback failures are
    /// logged but never escalated.
    pub async fn notify(
        &self,
        schedule: &Schedule,
        light: &dyn LightPort,
        cue: &dyn CuePlayer,
    ) -> Result<(), RunError> {
        let snapshot = light
            .state()
            .await
            .map_err(RunError::SessionUnreachable)?;
        let stream = schedule.next_stream();

        let ((), cue_result) = tokio::join!(
            self.sequencer.run(stream, &snapshot, light),
            cue.play(stream),
        );

        if let Err(err) = cue_result {
            tracing::warn!("audio cue failed: {err}");
        }

        Ok(())
    }
}
