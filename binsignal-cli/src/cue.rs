//! Audio cue playback through an external player process.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use binsignal_core::{
    model::Stream,
    ports::{CuePlayer, PortError},
};

const RECYCLE_SOUND: &str = "Recycle.wav";
const GREEN_WASTE_SOUND: &str = "GreenWaste.wav";
const DEFAULT_PLAYER: &str = "aplay";

/// Short pause before playback so the cue lands after the first blink.
const LEAD_IN: Duration = Duration::from_secs(1);

/// Plays one of the two fixed sound assets via an external player binary.
pub(crate) struct SoundCue {
    player: String,
    assets_dir: PathBuf,
}

impl Default for SoundCue {
    fn default() -> Self {
        Self {
            player: DEFAULT_PLAYER.to_owned(),
            assets_dir: std::env::current_dir().unwrap_or_else(|err| {
                tracing::warn!("could not resolve the working directory, using '.': {err}");
                PathBuf::from(".")
            }),
        }
    }
}

fn asset_for(stream: Stream) -> &'static str {
    match stream {
        Stream::Recycle => RECYCLE_SOUND,
        Stream::Green => GREEN_WASTE_SOUND,
    }
}

#[async_trait]
impl CuePlayer for SoundCue {
    async fn play(&self, stream: Stream) -> Result<(), PortError> {
        tokio::time::sleep(LEAD_IN).await;

        let path = self.assets_dir.join(asset_for(stream));
        let status = Command::new(&self.player)
            .arg(&path)
            .status()
            .await
            .map_err(|err| PortError::Playback(err.to_string()))?;

        if !status.success() {
            return Err(PortError::Playback(format!(
                "{} exited with {status}",
                self.player
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use binsignal_core::model::Stream;

    use super::{SoundCue, asset_for};

    #[test]
    fn each_stream_has_its_own_asset() {
        assert_eq!(asset_for(Stream::Recycle), "Recycle.wav");
        assert_eq!(asset_for(Stream::Green), "GreenWaste.wav");
    }

    #[test]
    fn default_cue_always_has_an_asset_directory() {
        let cue = SoundCue::default();

        assert_eq!(cue.player, "aplay");
        assert!(!cue.assets_dir.as_os_str().is_empty());
    }
}
