//! Fleet registry — the owning, ordered vessel collection plus its
//! append-only audit log.
//!
//! # API pattern
//!
//! Mutating operations return `Result<_, FleetError>`; the `Ok` value is
//! either a short status string suitable for direct display or the moved
//! vessel itself. Membership failures are returned, never panicked, so a
//! caller can chain operations without recovery boilerplate.
//!
//! Vessels are addressed by name with first-match linear lookup.
//! Duplicate names are permitted; operations act on the first match in
//! sequence order.

use std::fmt;

use chrono::Local;

use crate::error::FleetError;
use crate::vessel::{Vessel, VesselKind};

// ---------------------------------------------------------------------------
// Fleet name
// ---------------------------------------------------------------------------

/// A strongly-typed name for a fleet registry. Vessels carry this as
/// their membership pointer instead of a reference to the fleet itself.
/// Membership is session state, never persisted, so there is no serde
/// surface here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FleetName(pub String);

impl fmt::Display for FleetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for FleetName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FleetName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Fleet
// ---------------------------------------------------------------------------

/// The registry: an ordered vessel collection and its audit log.
#[derive(Debug, Clone, PartialEq)]
pub struct Fleet {
    pub name: FleetName,
    /// Ordered, duplicates by name allowed.
    pub vessels: Vec<Vessel>,
    /// Timestamped audit entries, append-only within a session; only a
    /// load replaces them wholesale.
    pub logs: Vec<String>,
}

impl Fleet {
    /// Create an empty fleet.
    pub fn new(name: impl Into<FleetName>) -> Self {
        Self {
            name: name.into(),
            vessels: Vec::new(),
            logs: Vec::new(),
        }
    }

    // -- Membership ---------------------------------------------------------

    /// Append a vessel, bind its membership to this fleet, and record the
    /// join in its fleet history. Duplicates are permitted: adding twice
    /// appends twice.
    pub fn add(&mut self, mut vessel: Vessel) -> String {
        vessel.current_fleet = Some(self.name.clone());
        vessel.fleet_history.push(self.name.clone());
        let name = vessel.name.clone();
        self.vessels.push(vessel);
        self.record_log(&format!("{name} joined the fleet."));
        log::info!("{name} added to fleet {}", self.name);
        format!("{name} successfully added to fleet")
    }

    /// Remove the first vessel matching `name` and return it with its
    /// membership cleared. Fails with a membership error if absent.
    pub fn remove(&mut self, name: &str) -> Result<Vessel, FleetError> {
        let Some(idx) = self.index_of(name) else {
            return Err(FleetError::Membership { name: name.to_owned() });
        };
        let mut vessel = self.vessels.remove(idx);
        vessel.current_fleet = None;
        self.record_log(&format!("{name} was removed from the fleet."));
        log::info!("{name} removed from fleet {}", self.name);
        Ok(vessel)
    }

    /// Move the first vessel matching `name` into `target`.
    ///
    /// The departure and completion entries land on this fleet's log;
    /// the join entry lands on the target's, written by its own `add`.
    pub fn transfer(&mut self, name: &str, target: &mut Fleet) -> Result<String, FleetError> {
        let Some(idx) = self.index_of(name) else {
            return Err(FleetError::Membership { name: name.to_owned() });
        };
        let vessel = self.vessels.remove(idx);
        self.record_log(&format!("{name} left this fleet for another."));
        target.add(vessel);
        self.record_log(&format!("{name} transferred to new fleet."));
        log::info!("{name} transferred from {} to {}", self.name, target.name);
        Ok(format!("{name} transferred successfully."))
    }

    /// Record an arrival event for a member vessel on the audit log.
    /// Does not touch the vessel's position state.
    pub fn record_arrival(&mut self, name: &str, location: &str) -> Result<String, FleetError> {
        if self.index_of(name).is_none() {
            return Err(FleetError::Membership { name: name.to_owned() });
        }
        self.record_log(&format!("{name} arrived at {location}."));
        Ok(format!("{name} arrival recorded at {location}."))
    }

    // -- Lookup -------------------------------------------------------------

    /// First vessel matching `name`, if any.
    pub fn vessel(&self, name: &str) -> Option<&Vessel> {
        self.vessels.iter().find(|v| v.name == name)
    }

    /// Mutable first match, e.g. for vessel-level position logging.
    pub fn vessel_mut(&mut self, name: &str) -> Option<&mut Vessel> {
        self.vessels.iter_mut().find(|v| v.name == name)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.vessels.iter().position(|v| v.name == name)
    }

    // -- Projections --------------------------------------------------------

    /// Every vessel rendered in current sequence order, or a sentinel
    /// message for the empty fleet.
    pub fn list(&self) -> String {
        if self.vessels.is_empty() {
            return "The fleet is empty!".to_owned();
        }
        self.vessels
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Stable ascending sort by vessel name (case-sensitive).
    ///
    /// Only `"name"` is implemented; any other key falls back to name
    /// ordering rather than erroring, preserving the legacy contract.
    pub fn sort(&mut self, by: &str) -> String {
        if self.vessels.is_empty() {
            return "Empty fleet, no boats to sort".to_owned();
        }
        if by != "name" {
            log::debug!("unknown sort key {by:?}, sorting by name");
        }
        self.vessels.sort_by(|a, b| a.name.cmp(&b.name));
        "Fleet sorted by ship name.".to_owned()
    }

    /// Case-insensitive substring match against name, home port, or
    /// flag; matches are rendered in original sequence order.
    pub fn filter(&self, keyword: &str) -> String {
        if self.vessels.is_empty() {
            return "Fleet is empty, no boats to filter.".to_owned();
        }
        let needle = keyword.to_lowercase();
        let results: Vec<String> = self
            .vessels
            .iter()
            .filter(|v| {
                v.name.to_lowercase().contains(&needle)
                    || v.home_port.to_lowercase().contains(&needle)
                    || v.flag.to_lowercase().contains(&needle)
            })
            .map(ToString::to_string)
            .collect();
        if results.is_empty() {
            return format!("No results found for {keyword}.");
        }
        results.join("\n\n")
    }

    /// The audit log as display text.
    pub fn show_logs(&self) -> String {
        if self.logs.is_empty() {
            return "No logs recorded yet.".to_owned();
        }
        self.logs.join("\n")
    }

    /// Counts by variant, plus total cargo capacity when any cargo
    /// vessels are present.
    pub fn generate_status_report(&self) -> String {
        if self.vessels.is_empty() {
            return "Fleet Status Report:\n\nFleet is currently empty.".to_owned();
        }

        let total = self.vessels.len();
        let cargo = self
            .vessels
            .iter()
            .filter(|v| matches!(v.kind, VesselKind::Cargo { .. }))
            .count();
        let military = self
            .vessels
            .iter()
            .filter(|v| matches!(v.kind, VesselKind::Military { .. }))
            .count();
        let regular = total - cargo - military;

        let mut report = format!(
            "Fleet Status Report:\n\n\
             Total Boats: {total}\n\
             Regular Boats: {regular}\n\
             Cargo Boats: {cargo}\n\
             Military Boats: {military}\n"
        );

        if cargo > 0 {
            let capacity: f64 = self
                .vessels
                .iter()
                .filter_map(|v| match v.kind {
                    VesselKind::Cargo { cargo_capacity } => Some(cargo_capacity),
                    _ => None,
                })
                .sum();
            report.push_str(&format!("Total Cargo Capacity: {capacity:.2} tons\n"));
        }

        report
    }

    // -- Audit log ----------------------------------------------------------

    fn record_log(&mut self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.logs.push(format!("[{timestamp}] {message}"));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn vessel(name: &str) -> Vessel {
        Vessel::new(name, "2020-05-01", "London", "UK").expect("valid vessel")
    }

    #[test]
    fn add_binds_membership_and_logs() {
        let mut fleet = Fleet::new("north-sea");
        let status = fleet.add(vessel("Seastar"));
        assert_eq!(status, "Seastar successfully added to fleet");
        assert_eq!(fleet.vessels.len(), 1);
        assert_eq!(fleet.vessels[0].current_fleet, Some(FleetName::from("north-sea")));
        assert_eq!(fleet.vessels[0].fleet_history, vec![FleetName::from("north-sea")]);
        assert!(fleet.logs[0].ends_with("Seastar joined the fleet."));
    }

    #[test]
    fn add_permits_duplicates() {
        let mut fleet = Fleet::new("north-sea");
        fleet.add(vessel("Seastar"));
        fleet.add(vessel("Seastar"));
        assert_eq!(fleet.vessels.len(), 2);
    }

    #[test]
    fn remove_clears_membership() {
        let mut fleet = Fleet::new("north-sea");
        fleet.add(vessel("Seastar"));
        let removed = fleet.remove("Seastar").expect("remove");
        assert!(removed.current_fleet.is_none());
        assert!(fleet.vessels.is_empty());
        assert!(fleet.logs.last().unwrap().ends_with("Seastar was removed from the fleet."));
    }

    #[test]
    fn remove_absent_vessel_is_membership_error() {
        let mut fleet = Fleet::new("north-sea");
        let err = fleet.remove("Ghost").unwrap_err();
        assert!(matches!(err, FleetError::Membership { .. }), "got: {err}");
        assert!(err.to_string().contains("Ghost"));
    }

    #[test]
    fn sort_is_stable_and_idempotent() {
        let mut fleet = Fleet::new("north-sea");
        fleet.add(vessel("Charlie"));
        fleet.add(vessel("alpha"));
        fleet.add(vessel("Bravo"));
        fleet.sort("name");
        let order: Vec<String> = fleet.vessels.iter().map(|v| v.name.clone()).collect();
        // Case-sensitive: uppercase sorts before lowercase.
        assert_eq!(order, vec!["Bravo", "Charlie", "alpha"]);
        fleet.sort("name");
        let again: Vec<String> = fleet.vessels.iter().map(|v| v.name.clone()).collect();
        assert_eq!(order, again);
    }

    #[test]
    fn sort_unknown_key_falls_back_to_name() {
        let mut fleet = Fleet::new("north-sea");
        fleet.add(vessel("Bravo"));
        fleet.add(vessel("Alpha"));
        let status = fleet.sort("launch_date");
        assert_eq!(status, "Fleet sorted by ship name.");
        assert_eq!(fleet.vessels[0].name, "Alpha");
    }

    #[test]
    fn sort_empty_fleet_sentinel() {
        let mut fleet = Fleet::new("north-sea");
        assert_eq!(fleet.sort("name"), "Empty fleet, no boats to sort");
    }

    #[test]
    fn record_arrival_requires_membership() {
        let mut fleet = Fleet::new("north-sea");
        fleet.add(vessel("Seastar"));
        let status = fleet.record_arrival("Seastar", "Rotterdam").expect("arrival");
        assert_eq!(status, "Seastar arrival recorded at Rotterdam.");
        assert!(fleet.logs.last().unwrap().ends_with("Seastar arrived at Rotterdam."));
        // Arrival never mutates position state.
        assert!(fleet.vessels[0].current_position.is_none());

        let err = fleet.record_arrival("Ghost", "Rotterdam").unwrap_err();
        assert!(matches!(err, FleetError::Membership { .. }));
    }

    #[test]
    fn show_logs_empty_sentinel() {
        let fleet = Fleet::new("north-sea");
        assert_eq!(fleet.show_logs(), "No logs recorded yet.");
    }

    #[test]
    fn log_entries_are_timestamped() {
        let mut fleet = Fleet::new("north-sea");
        fleet.add(vessel("Seastar"));
        // "[YYYY-MM-DD HH:MM:SS] message"
        let entry = &fleet.logs[0];
        assert_eq!(entry.as_bytes()[0], b'[');
        assert_eq!(&entry[11..12], " ");
        assert_eq!(&entry[20..22], "] ");
    }
}
