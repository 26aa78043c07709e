//! Vessel entity and variant payloads.
//!
//! A [`Vessel`] is created standalone (no fleet binding) through one of
//! the validating constructors and only becomes fleet-bound through
//! [`Fleet::add`](crate::registry::Fleet::add). Fleet membership is an
//! identifier ([`FleetName`]), never an owning reference, so a vessel
//! and a registry can be dropped independently.

use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::{validation, FleetError};
use crate::registry::FleetName;

// ---------------------------------------------------------------------------
// Launch date input
// ---------------------------------------------------------------------------

/// Accepted input forms for a vessel's launch date.
///
/// Constructors take `impl Into<LaunchDateInput>`, so callers can pass a
/// [`NaiveDate`], a numeric Unix timestamp, or an ISO-8601 string
/// (`YYYY-MM-DD`, optionally with a time part). Anything unparseable is
/// a validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchDateInput {
    Date(NaiveDate),
    /// Unix timestamp in seconds, converted to a date on the local clock.
    Timestamp(i64),
    /// Unix timestamp in fractional seconds, e.g. from a date-picker
    /// widget. Rejected unless finite.
    TimestampFloat(f64),
    /// ISO-formatted date or datetime text.
    Text(String),
}

impl From<NaiveDate> for LaunchDateInput {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<i64> for LaunchDateInput {
    fn from(ts: i64) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<f64> for LaunchDateInput {
    fn from(ts: f64) -> Self {
        Self::TimestampFloat(ts)
    }
}

impl From<&str> for LaunchDateInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for LaunchDateInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl LaunchDateInput {
    /// Normalise the input to a calendar date.
    fn resolve(self) -> Result<NaiveDate, FleetError> {
        match self {
            Self::Date(d) => Ok(d),
            Self::Timestamp(ts) => Local
                .timestamp_opt(ts, 0)
                .single()
                .map(|dt| dt.date_naive())
                .ok_or_else(|| validation(format!("launch date timestamp {ts} is out of range"))),
            Self::TimestampFloat(ts) => {
                if !ts.is_finite() {
                    return Err(validation(format!(
                        "launch date timestamp {ts} is not a valid number"
                    )));
                }
                Self::Timestamp(ts.trunc() as i64).resolve()
            }
            Self::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Err(validation("Launch date cannot be empty. Please input a date."));
                }
                if let Ok(d) = s.parse::<NaiveDate>() {
                    return Ok(d);
                }
                if let Ok(dt) = s.parse::<NaiveDateTime>() {
                    return Ok(dt.date());
                }
                Err(validation(format!(
                    "launch date {s:?} is not an ISO-formatted date"
                )))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Vessel kind
// ---------------------------------------------------------------------------

/// Variant payload of a vessel.
///
/// The original system modeled these as subclasses; here they are a sum
/// type so serialization and reporting dispatch on an explicit tag.
#[derive(Debug, Clone, PartialEq)]
pub enum VesselKind {
    Standard,
    Cargo {
        /// Tons. Zero is permitted; negative is rejected at construction.
        cargo_capacity: f64,
    },
    Military {
        weapon_count: f64,
        is_authorised_by_gov: bool,
    },
}

// ---------------------------------------------------------------------------
// Vessel
// ---------------------------------------------------------------------------

/// A tracked ship: identity, descriptive attributes, position history,
/// and fleet membership.
#[derive(Debug, Clone, PartialEq)]
pub struct Vessel {
    /// Identity key within a registry; not guaranteed globally unique.
    pub name: String,
    pub launch_date: NaiveDate,
    pub home_port: String,
    pub flag: String,
    pub kind: VesselKind,
    pub current_position: Option<String>,
    /// Timestamped position entries, append-only, insertion order.
    pub position_logs: Vec<String>,
    /// The fleet this vessel currently belongs to, if any.
    pub current_fleet: Option<FleetName>,
    /// Every fleet this vessel has ever belonged to, append-only.
    pub fleet_history: Vec<FleetName>,
}

impl Vessel {
    /// Construct a standard vessel.
    pub fn new(
        name: &str,
        launch_date: impl Into<LaunchDateInput>,
        home_port: &str,
        flag: &str,
    ) -> Result<Self, FleetError> {
        Self::build(name, launch_date, home_port, flag, VesselKind::Standard)
    }

    /// Construct a cargo vessel. Rejects negative or non-finite capacity.
    pub fn cargo(
        name: &str,
        launch_date: impl Into<LaunchDateInput>,
        home_port: &str,
        flag: &str,
        cargo_capacity: f64,
    ) -> Result<Self, FleetError> {
        if !cargo_capacity.is_finite() {
            return Err(validation("Cargo capacity must be a number."));
        }
        if cargo_capacity < 0.0 {
            return Err(validation(
                "Cargo capacity must be a positive value greater than zero.",
            ));
        }
        Self::build(name, launch_date, home_port, flag, VesselKind::Cargo { cargo_capacity })
    }

    /// Construct a military vessel. Rejects negative or non-finite
    /// weapon counts.
    pub fn military(
        name: &str,
        launch_date: impl Into<LaunchDateInput>,
        home_port: &str,
        flag: &str,
        weapon_count: f64,
        is_authorised_by_gov: bool,
    ) -> Result<Self, FleetError> {
        if !weapon_count.is_finite() {
            return Err(validation("Weapon count must be a number."));
        }
        if weapon_count < 0.0 {
            return Err(validation("Weapon count must be zero or a positive value."));
        }
        Self::build(
            name,
            launch_date,
            home_port,
            flag,
            VesselKind::Military { weapon_count, is_authorised_by_gov },
        )
    }

    fn build(
        name: &str,
        launch_date: impl Into<LaunchDateInput>,
        home_port: &str,
        flag: &str,
        kind: VesselKind,
    ) -> Result<Self, FleetError> {
        if name.trim().is_empty() {
            return Err(validation("Ship name must be a non-empty string."));
        }
        if home_port.trim().is_empty() {
            return Err(validation("Home port must be a non-empty string."));
        }
        if flag.trim().is_empty() {
            return Err(validation("Flag must be a non-empty string."));
        }
        let launch_date = launch_date.into().resolve()?;

        Ok(Self {
            name: name.to_owned(),
            launch_date,
            home_port: home_port.to_owned(),
            flag: flag.to_owned(),
            kind,
            current_position: None,
            position_logs: Vec::new(),
            current_fleet: None,
            fleet_history: Vec::new(),
        })
    }

    /// Set the current position and append a timestamped entry to the
    /// position history. Independent of fleet membership.
    pub fn log_position(&mut self, position: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.current_position = Some(position.to_owned());
        self.position_logs.push(format!("[{timestamp}] Position: {position}"));
        log::debug!("{}: position set to {position}", self.name);
        format!("{} position logged: {position}", self.name)
    }

    /// The full position history as display text.
    pub fn position_history(&self) -> String {
        if self.position_logs.is_empty() {
            return format!("No position logs recorded for {}.", self.name);
        }
        format!(
            "Position History for {}:\n{}",
            self.name,
            self.position_logs.join("\n")
        )
    }
}

impl fmt::Display for Vessel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.current_position.as_deref().unwrap_or("Unknown");
        write!(
            f,
            "Ship Name: {}\nLaunch Date: {}\nHome Port: {}\nFlag: {}\nCurrent Position: {}",
            self.name, self.launch_date, self.home_port, self.flag, position
        )?;
        match &self.kind {
            VesselKind::Standard => Ok(()),
            VesselKind::Cargo { cargo_capacity } => {
                write!(f, "\nCargo Capacity: {cargo_capacity:.2} tons")
            }
            VesselKind::Military { weapon_count, is_authorised_by_gov } => write!(
                f,
                "\nWeapon Count: {weapon_count}\nAuthorised by Government: {is_authorised_by_gov}"
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
