//! Schedule source for Wyndham City using the myWyndham map-data page.

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::{Captures, Regex};
use reqwest::Client;

use binsignal_core::{
    model::{PropertyId, Schedule},
    ports::{PortError, SchedulePort},
};

const BASE_URL: &str = "https://digital.wyndham.vic.gov.au/myWyndham/init-map-data.asp";

/// Long date format used on the page, e.g. "Monday, 10 March 2025".
const DATE_FORMAT: &str = "%A, %d %B %Y";

/// The page embeds the three collection dates in one fixed run of
/// `infocontentcol` spans. Everything outside this block is ignored.
const SCHEDULE_PATTERN: &str = concat!(
    r#"<span class="infocontentcol"><u>Next Waste Collections</u></span><br>"#,
    r#"<span class="infocontentcol">Waste: ?</span>(?<waste>[a-zA-Z,0-9 ]+)<br>"#,
    r#"<span class="infocontentcol">Green: ?</span>(?<green>[a-zA-Z,0-9 ]+)<br>"#,
    r#"<span class="infocontentcol">Recycle: ?</span>(?<recycle>[a-zA-Z,0-9 ]+)</div>"#,
);

/// Schedule resolution backed by the municipal property page.
pub struct WyndhamSchedulePort {
    client: Client,
    pattern: Regex,
}

impl WyndhamSchedulePort {
    /// Create a new schedule port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            pattern: Regex::new(SCHEDULE_PATTERN).expect("schedule pattern is valid"),
        }
    }
}

#[async_trait]
impl SchedulePort for WyndhamSchedulePort {
    async fn resolve(&self, property: &PropertyId) -> Result<Schedule, PortError> {
        let body = self
            .client
            .get(BASE_URL)
            .query(&[("propnum", property.0.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        tracing::debug!("fetched schedule page for property {}", property.0);

        parse_schedule(&self.pattern, &body)
    }
}

/// Extract a full schedule from the page body.
///
/// Either all three dates parse or the whole operation fails; a partial
/// schedule is never produced.
fn parse_schedule(pattern: &Regex, body: &str) -> Result<Schedule, PortError> {
    let captures = pattern.captures(body).ok_or(PortError::LayoutMismatch)?;

    let waste = parse_date(&captures, "waste")?;
    let green = parse_date(&captures, "green")?;
    let recycle = parse_date(&captures, "recycle")?;

    Ok(Schedule {
        waste,
        green,
        recycle,
    })
}

fn parse_date(captures: &Captures<'_>, group: &str) -> Result<NaiveDate, PortError> {
    let text = captures
        .name(group)
        .ok_or(PortError::LayoutMismatch)?
        .as_str()
        .trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(PortError::from)
}
