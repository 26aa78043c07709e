//! Persistence codec — fleet snapshot to/from a JSON document.
//!
//! The on-disk format keeps the legacy fleet file's shape: top-level
//! keys `boats`, `logs`, `saved_date`. Vessel documents are written with
//! an explicit `kind` discriminant; legacy documents without one are
//! detected by field presence (`cargo_capacity` means cargo,
//! `weapon_count` means military, neither means standard).
//!
//! The target path is always an explicit parameter; nothing in this
//! module derives or hardcodes a location.

use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::{io_err, validation, FleetError};
use crate::registry::Fleet;
use crate::vessel::{Vessel, VesselKind};

// ---------------------------------------------------------------------------
// Document types
// ---------------------------------------------------------------------------

/// Discriminant written into every saved vessel document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindTag {
    Standard,
    Cargo,
    Military,
}

/// Serialized form of a single vessel.
///
/// Fleet membership and fleet history are deliberately not persisted;
/// a load rebinds every vessel to the loading fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselDocument {
    /// Explicit variant tag. Absent in legacy documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<KindTag>,
    pub name: String,
    /// ISO date string, e.g. `2020-05-01`.
    pub launch_date: String,
    pub home_port: String,
    pub flag: String,
    #[serde(default)]
    pub current_position: Option<String>,
    #[serde(default)]
    pub position_logs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_authorised_by_gov: Option<bool>,
}

/// Serialized form of a whole fleet snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetDocument {
    #[serde(default)]
    pub boats: Vec<VesselDocument>,
    #[serde(default)]
    pub logs: Vec<String>,
    /// ISO date of the save.
    pub saved_date: String,
}

// ---------------------------------------------------------------------------
// Vessel <-> document
// ---------------------------------------------------------------------------

/// Project a vessel into its persisted document form.
pub fn to_document(vessel: &Vessel) -> VesselDocument {
    let (tag, cargo_capacity, weapon_count, is_authorised_by_gov) = match vessel.kind {
        VesselKind::Standard => (KindTag::Standard, None, None, None),
        VesselKind::Cargo { cargo_capacity } => (KindTag::Cargo, Some(cargo_capacity), None, None),
        VesselKind::Military { weapon_count, is_authorised_by_gov } => {
            (KindTag::Military, None, Some(weapon_count), Some(is_authorised_by_gov))
        }
    };
    VesselDocument {
        kind: Some(tag),
        name: vessel.name.clone(),
        launch_date: vessel.launch_date.to_string(),
        home_port: vessel.home_port.clone(),
        flag: vessel.flag.clone(),
        current_position: vessel.current_position.clone(),
        position_logs: vessel.position_logs.clone(),
        cargo_capacity,
        weapon_count,
        is_authorised_by_gov,
    }
}

/// Reconstruct a vessel from its document form, running the full
/// construction validation. Restores position state afterwards.
pub fn from_document(doc: &VesselDocument) -> Result<Vessel, FleetError> {
    let tag = match doc.kind {
        Some(tag) => tag,
        None if doc.cargo_capacity.is_some() => KindTag::Cargo,
        None if doc.weapon_count.is_some() => KindTag::Military,
        None => KindTag::Standard,
    };

    let mut vessel = match tag {
        KindTag::Standard => {
            Vessel::new(&doc.name, doc.launch_date.as_str(), &doc.home_port, &doc.flag)?
        }
        KindTag::Cargo => {
            let capacity = doc
                .cargo_capacity
                .ok_or_else(|| validation("cargo vessel document is missing cargo_capacity"))?;
            Vessel::cargo(&doc.name, doc.launch_date.as_str(), &doc.home_port, &doc.flag, capacity)?
        }
        KindTag::Military => {
            let weapon_count = doc
                .weapon_count
                .ok_or_else(|| validation("military vessel document is missing weapon_count"))?;
            let authorised = doc.is_authorised_by_gov.ok_or_else(|| {
                validation("military vessel document is missing is_authorised_by_gov")
            })?;
            Vessel::military(
                &doc.name,
                doc.launch_date.as_str(),
                &doc.home_port,
                &doc.flag,
                weapon_count,
                authorised,
            )?
        }
    };

    vessel.current_position = doc.current_position.clone();
    vessel.position_logs = doc.position_logs.clone();
    Ok(vessel)
}

// ---------------------------------------------------------------------------
// Save / load
// ---------------------------------------------------------------------------

/// Serialize the fleet snapshot to `path`, overwriting it wholesale.
///
/// A single write attempt; the snapshot is a durable copy, not a live
/// binding, so no temp-file swap or backup is kept.
pub fn save_at(path: &Path, fleet: &Fleet) -> Result<String, FleetError> {
    let doc = FleetDocument {
        boats: fleet.vessels.iter().map(to_document).collect(),
        logs: fleet.logs.clone(),
        saved_date: Local::now().date_naive().to_string(),
    };
    let json = serde_json::to_string_pretty(&doc)?;
    std::fs::write(path, json).map_err(|e| io_err(path, e))?;
    log::info!("saved fleet {} to {}", fleet.name, path.display());
    Ok(format!("Fleet data saved to {}", path.display()))
}

/// Load a fleet snapshot from `path`, replacing `vessels` and `logs`
/// wholesale and rebinding every loaded vessel to `fleet`.
///
/// A missing file is not an error: the fleet is left untouched and a
/// benign status is returned. Parse or validation failures also leave
/// the fleet untouched.
pub fn load_at(path: &Path, fleet: &mut Fleet) -> Result<String, FleetError> {
    if !path.exists() {
        return Ok("No saved fleet data found. Starting with empty fleet.".to_owned());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let doc: FleetDocument = serde_json::from_str(&contents)
        .map_err(|e| FleetError::Parse { path: path.to_path_buf(), source: e })?;

    // Reconstruct everything before touching fleet state, so a document
    // that fails validation leaves the registry unchanged.
    let mut vessels = Vec::with_capacity(doc.boats.len());
    for vessel_doc in &doc.boats {
        let mut vessel = from_document(vessel_doc)?;
        vessel.current_fleet = Some(fleet.name.clone());
        vessel.fleet_history.push(fleet.name.clone());
        vessels.push(vessel);
    }

    let count = vessels.len();
    fleet.vessels = vessels;
    fleet.logs = doc.logs;
    log::info!("loaded {count} vessels into fleet {} from {}", fleet.name, path.display());
    Ok(format!("Loaded {count} vessels from {}", path.display()))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
