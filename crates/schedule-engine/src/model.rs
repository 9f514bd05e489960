//! Festival value records: venues, films, screenings and times of day.
//!
//! Records are immutable values produced by the catalog and read by the
//! validator. JSON field names follow the festival app's camelCase layout.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, ScheduleError};

// ── TimeOfDay ───────────────────────────────────────────────────────────────

/// A wall-clock time within a single day, stored as minutes since midnight.
///
/// Serialized as a 24-hour `"HH:MM"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Build from an hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(ScheduleError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(TimeOfDay((hour * 60 + minute) as u16))
    }

    /// Minutes elapsed since midnight.
    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map_err(|_| ScheduleError::InvalidTime(s.to_string()))?;
        TimeOfDay::from_hm(parsed.hour(), parsed.minute())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a 24-hour `"HH:MM"` string into minutes since midnight.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidTime`] if the string is not a valid
/// 24-hour clock time.
///
/// # Examples
///
/// ```
/// use schedule_engine::model::time_to_minutes;
///
/// assert_eq!(time_to_minutes("14:30").unwrap(), 870);
/// assert!(time_to_minutes("25:00").is_err());
/// ```
pub fn time_to_minutes(time: &str) -> Result<u32> {
    time.parse::<TimeOfDay>().map(TimeOfDay::minutes)
}

// ── Venue ───────────────────────────────────────────────────────────────────

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub address: String,
    /// Some venues in catalog data have no geolocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

// ── Film ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    pub director: String,
    pub year: i32,
    /// Runtime in minutes.
    pub duration: u32,
    #[serde(default)]
    pub genre: Vec<String>,
    pub country: String,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default)]
    pub poster_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
}

// ── Screening ───────────────────────────────────────────────────────────────

/// A single showing of a film at a venue.
///
/// Screenings never cross midnight: `start_time < end_time` on `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screening {
    pub id: String,
    pub film_id: String,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub venue: Venue,
    pub tickets_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl Screening {
    /// Build a screening from `"HH:MM"` start and end strings.
    ///
    /// Tickets default to available with no price; set the public fields
    /// afterwards to change that.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidTime`] for malformed times, or
    /// [`ScheduleError::InvalidScreening`] if the screening does not end
    /// after it starts.
    pub fn new(
        id: impl Into<String>,
        film_id: impl Into<String>,
        date: NaiveDate,
        start_time: &str,
        end_time: &str,
        venue: Venue,
    ) -> Result<Self> {
        let screening = Screening {
            id: id.into(),
            film_id: film_id.into(),
            date,
            start_time: start_time.parse()?,
            end_time: end_time.parse()?,
            venue,
            tickets_available: true,
            price: None,
        };
        screening.validate()?;
        Ok(screening)
    }

    /// Check the same-day window invariant.
    pub fn validate(&self) -> Result<()> {
        if self.start_time >= self.end_time {
            return Err(ScheduleError::InvalidScreening(format!(
                "{} ends at {} which is not after its start {}",
                self.id, self.end_time, self.start_time
            )));
        }
        Ok(())
    }

    pub fn start_minutes(&self) -> u32 {
        self.start_time.minutes()
    }

    pub fn end_minutes(&self) -> u32 {
        self.end_time.minutes()
    }
}
