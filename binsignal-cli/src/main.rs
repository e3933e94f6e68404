//! Command line entry point signalling the next waste collection.
//!
//! Resolves the collection schedule for a property, then blinks the light
//! in the stream's color while playing the matching sound. With
//! `--no-lights` the schedule is printed instead and the bridge is never
//! contacted.

mod cue;

use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Parser;
use crossterm::style::Stylize;
use reqwest::Client;

use binsignal_core::{
    model::{PropertyId, Schedule},
    service::BinsignalService,
};
use binsignal_hue::{BridgeConfig, HueSession};
use binsignal_provider_wyndham::WyndhamSchedulePort;

use crate::cue::SoundCue;

#[derive(Parser, Debug)]
#[command(author, version, about = "Signals whether recycling or green waste is collected next")]
struct Cli {
    /// Municipal property number used to look up the collection schedule
    #[arg(short = 'p', long = "property-number", value_name = "NUMBER")]
    property_number: String,

    /// Print the resolved schedule instead of driving the light
    #[arg(short = 'n', long = "no-lights")]
    no_lights: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Argument errors abort here, before any network traffic.
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "binsignal=info".into()),
        )
        .init();

    let client = Client::builder().user_agent("binsignal/0.1").build()?;
    let service = BinsignalService::new(Arc::new(WyndhamSchedulePort::new(client)));

    let schedule = match service.resolve(&PropertyId(cli.property_number)).await {
        Ok(schedule) => schedule,
        Err(err) => {
            tracing::error!("{err}");
            bail!("run did not complete");
        }
    };

    if cli.no_lights {
        print_schedule(&schedule)?;
        return Ok(());
    }

    let session = match HueSession::connect(BridgeConfig::local_bridge()).await {
        Ok(session) => session,
        Err(err) => {
            tracing::error!("unable to set up the light session: {err}");
            bail!("run did not complete");
        }
    };

    if let Err(err) = service.notify(&schedule, &session, &SoundCue::default()).await {
        tracing::error!("{err}");
        bail!("run did not complete");
    }

    Ok(())
}

/// Print the schedule as indented JSON, tinted by the next stream.
fn print_schedule(schedule: &Schedule) -> Result<()> {
    let body = serde_json::to_string_pretty(schedule)?;
    let styled = if schedule.is_recycle() {
        body.yellow()
    } else {
        body.green()
    };

    #[expect(clippy::print_stdout, reason = "the printout is the point of --no-lights")]
    {
        println!("{styled}");
    }

    Ok(())
}
