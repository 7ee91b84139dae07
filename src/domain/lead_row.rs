use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::domain::new_lead::NewLeadBody;

pub const HEADER: [&str; 4] = ["Date/Time", "Name", "Phone", "Source"];

// Same layout as a ru-RU locale date: 19.10.2026, 18:05:09
const TIMESTAMP_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

// ISO-8601 date-times without an offset, read as wall-clock time in the worksheet timezone
const LOCAL_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// One spreadsheet row: `[localized timestamp, name, phone, source]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadRow {
    pub timestamp: String,
    pub name: String,
    pub phone: String,
    pub source: String,
}

#[derive(thiserror::Error, Debug)]
#[error("{value} is not a valid ISO-8601 timestamp")]
pub struct InvalidTimestamp {
    value: String,
}

impl LeadRow {
    /// Builds the row the endpoint stores. The endpoint does not re-validate the lead:
    /// absent fields become empty cells and an absent timestamp means "received now".
    pub fn from_body(
        body: NewLeadBody,
        timezone: &Tz,
        received_at: DateTime<Utc>,
    ) -> Result<LeadRow, InvalidTimestamp> {
        let timestamp = match body.timestamp {
            Some(value) => parse_timestamp(&value, timezone)?,
            None => received_at,
        };

        Ok(LeadRow {
            timestamp: localize(timestamp, timezone),
            name: body.name.unwrap_or_default(),
            phone: body.phone.unwrap_or_default(),
            source: body.source.unwrap_or_default(),
        })
    }

    pub fn as_record(&self) -> [&str; 4] {
        [&self.timestamp, &self.name, &self.phone, &self.source]
    }
}

impl TryFrom<Vec<String>> for LeadRow {
    type Error = String;

    fn try_from(cells: Vec<String>) -> Result<Self, Self::Error> {
        match <[String; 4]>::try_from(cells) {
            Ok([timestamp, name, phone, source]) => Ok(LeadRow {
                timestamp,
                name,
                phone,
                source,
            }),
            Err(cells) => Err(format!("expected 4 cells, found {}", cells.len())),
        }
    }
}

fn parse_timestamp(value: &str, timezone: &Tz) -> Result<DateTime<Utc>, InvalidTimestamp> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    let local = LOCAL_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .and_then(|naive| timezone.from_local_datetime(&naive).earliest());
    if let Some(timestamp) = local {
        return Ok(timestamp.with_timezone(&Utc));
    }

    // A bare date is midnight UTC, like a JavaScript `Date`
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| InvalidTimestamp {
            value: value.to_string(),
        })
}

pub fn localize(timestamp: DateTime<Utc>, timezone: &Tz) -> String {
    timestamp
        .with_timezone(timezone)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}
