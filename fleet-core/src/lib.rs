//! Fleet registry core — vessel domain model, registry operations, and
//! JSON persistence.
//!
//! Public API surface:
//! - [`vessel`] — [`Vessel`], variant payloads, construction validation
//! - [`registry`] — [`Fleet`] collection + audit log operations
//! - [`codec`] — snapshot save / load at an explicit path
//! - [`error`] — [`FleetError`]

pub mod codec;
pub mod error;
pub mod registry;
pub mod vessel;

pub use codec::{from_document, load_at, save_at, to_document, FleetDocument, KindTag, VesselDocument};
pub use error::FleetError;
pub use registry::{Fleet, FleetName};
pub use vessel::{LaunchDateInput, Vessel, VesselKind};
