//! `vmca-recon` — Host registry vs. inventory extract reconciliation engine.
//!
//! Pure engine crate: receives pre-parsed registry and inventory records,
//! returns a classified report. No file, network or database access.

pub mod classify;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod evidence;
pub mod index;
pub mod matcher;
pub mod model;

pub use engine::reconcile;
pub use envelope::{FailureKind, ReconResponse};
pub use error::ReconError;
pub use model::{InventoryRecord, ReconReport, RegistryRecord};
