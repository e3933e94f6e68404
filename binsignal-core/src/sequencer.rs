//! Blink-and-restore state machine for the notification light.

use std::time::Duration;

use crate::model::{LightSnapshot, StateUpdate, Stream};
use crate::ports::LightPort;

/// Number of on/off pairs in a notification run.
pub const BLINK_COUNT: u32 = 5;
/// Pause between power transitions during the blink cycle.
pub const BLINK_DWELL: Duration = Duration::from_secs(2);

/// Drives the fixed blink cycle and restores the fixture afterwards.
///
/// Writes are strictly ordered; every call to the bridge is awaited before
/// the next one is issued. A failed write is logged and the sequence moves
/// on to its next scripted step — there is no retry and no rollback, so a
/// late failure can leave the fixture unrestored. That limitation is kept
/// on purpose.
pub struct NotificationSequencer {
    blinks: u32,
    dwell: Duration,
}

impl Default for NotificationSequencer {
    fn default() -> Self {
        Self {
            blinks: BLINK_COUNT,
            dwell: BLINK_DWELL,
        }
    }
}

impl NotificationSequencer {
    /// Create a sequencer with a custom blink count and dwell.
    #[must_use]
    pub fn new(blinks: u32, dwell: Duration) -> Self {
        Self { blinks, dwell }
    }

    /// Run the full blink cycle for `stream`, then restore `snapshot`.
    ///
    /// The snapshot must have been captured before any mutation; it is the
    /// only state consulted for restoration.
    pub async fn run(&self, stream: Stream, snapshot: &LightSnapshot, light: &dyn LightPort) {
        let lit = StateUpdate::lit(stream.hue(), snapshot.brightness);

        for _ in 0..self.blinks {
            apply_logged(light, &lit).await;
            tokio::time::sleep(self.dwell).await;
            apply_logged(light, &StateUpdate::power(false)).await;
            tokio::time::sleep(self.dwell).await;
        }

        // Restore color first with the fixture forced on, then power.
        apply_logged(light, &StateUpdate::lit(snapshot.hue, snapshot.brightness)).await;
        apply_logged(
            light,
            &StateUpdate::full(snapshot.on, snapshot.hue, snapshot.brightness),
        )
        .await;
    }
}

async fn apply_logged(light: &dyn LightPort, update: &StateUpdate) {
    if let Err(err) = light.apply(update).await {
        tracing::warn!("fixture write failed, continuing sequence: {err}");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::NotificationSequencer;
    use crate::model::{GREEN_HUE, LightSnapshot, RECYCLE_HUE, StateUpdate, Stream};
    use crate::ports::{LightPort, PortError};

    struct RecordingLight {
        writes: Mutex<Vec<StateUpdate>>,
        /// Zero-based indices of writes that should fail.
        failing: Vec<usize>,
    }

    impl RecordingLight {
        fn new() -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                failing: Vec::new(),
            }
        }

        fn failing_at(indices: &[usize]) -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                failing: indices.to_vec(),
            }
        }

        fn writes(&self) -> Vec<StateUpdate> {
            self.writes.lock().expect("writes lock").clone()
        }
    }

    #[async_trait]
    impl LightPort for RecordingLight {
        async fn state(&self) -> Result<LightSnapshot, PortError> {
            Err(PortError::MalformedState("not used in these tests".into()))
        }

        async fn apply(&self, update: &StateUpdate) -> Result<(), PortError> {
            let mut writes = self.writes.lock().expect("writes lock");
            let index = writes.len();
            writes.push(*update);
            if self.failing.contains(&index) {
                return Err(PortError::MalformedState("injected write failure".into()));
            }
            Ok(())
        }
    }

    fn snapshot() -> LightSnapshot {
        LightSnapshot {
            on: false,
            hue: 48_000,
            brightness: 144,
        }
    }

    fn sequencer() -> NotificationSequencer {
        NotificationSequencer::new(5, Duration::ZERO)
    }

    #[tokio::test]
    async fn blink_cycle_issues_five_pairs_then_restores() {
        let light = RecordingLight::new();
        let before = snapshot();

        sequencer().run(Stream::Recycle, &before, &light).await;

        let writes = light.writes();
        assert_eq!(writes.len(), 12, "5 on/off pairs + color + power restore");

        for pair in 0..5 {
            assert_eq!(
                writes[pair * 2],
                StateUpdate::lit(RECYCLE_HUE, before.brightness),
                "on-write of pair {pair}"
            );
            assert_eq!(
                writes[pair * 2 + 1],
                StateUpdate::power(false),
                "off-write of pair {pair}"
            );
        }

        assert_eq!(
            writes[10],
            StateUpdate::lit(before.hue, before.brightness),
            "color restore forces the fixture on with the original color"
        );
        assert_eq!(
            writes[11],
            StateUpdate::full(before.on, before.hue, before.brightness),
            "power restore returns to the snapshot's power state"
        );
    }

    #[tokio::test]
    async fn green_stream_uses_green_hue() {
        let light = RecordingLight::new();

        sequencer().run(Stream::Green, &snapshot(), &light).await;

        let writes = light.writes();
        assert_eq!(writes[0].hue, Some(GREEN_HUE));
    }

    #[tokio::test]
    async fn final_state_matches_snapshot_power_and_color() {
        let light = RecordingLight::new();
        let before = LightSnapshot {
            on: true,
            hue: 5_000,
            brightness: 20,
        };

        sequencer().run(Stream::Green, &before, &light).await;

        let last = *light.writes().last().expect("at least one write");
        assert_eq!(last.on, Some(true));
        assert_eq!(last.hue, Some(5_000));
        assert_eq!(last.brightness, Some(20));
    }

    #[tokio::test]
    async fn failed_writes_do_not_stop_the_sequence() {
        // Fail one blink write and the color restore; every scripted write
        // must still be attempted.
        let light = RecordingLight::failing_at(&[2, 10]);
        let before = snapshot();

        sequencer().run(Stream::Recycle, &before, &light).await;

        let writes = light.writes();
        assert_eq!(writes.len(), 12);
        assert_eq!(
            writes[11],
            StateUpdate::full(before.on, before.hue, before.brightness)
        );
    }
}
