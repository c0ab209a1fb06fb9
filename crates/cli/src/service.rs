//! Reconciliation handler: fetch both sides, run the engine, and shape the
//! result into a status-coded response.
//!
//! Registry failures always answer 500. Inventory failures answer with their
//! kind's status (404, 401 or 500). An engine contract violation answers 500.

use std::fmt;

use vmca_io::{InventorySource, RegistrySource, SourceError};
use vmca_recon::{reconcile, FailureKind, ReconError, ReconReport, ReconResponse};

use crate::exit_codes::{source_exit_code, EXIT_ENGINE_CONTRACT, EXIT_SOURCE_FAILED};

#[derive(Debug)]
pub enum HandlerError {
    Registry(SourceError),
    Inventory(SourceError),
    Engine(ReconError),
}

impl HandlerError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Registry(_) | Self::Engine(_) => FailureKind::Other,
            Self::Inventory(err) => err.kind,
        }
    }

    pub fn status(&self) -> u16 {
        self.kind().http_status()
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Registry(_) => EXIT_SOURCE_FAILED,
            Self::Inventory(err) => source_exit_code(err.kind),
            Self::Engine(_) => EXIT_ENGINE_CONTRACT,
        }
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry(err) => write!(f, "registry retrieval failed: {err}"),
            Self::Inventory(err) => write!(f, "inventory retrieval failed: {err}"),
            Self::Engine(err) => write!(f, "reconciliation failed: {err}"),
        }
    }
}

impl std::error::Error for HandlerError {}

/// Fetch registry then inventory and reconcile them. The first failure stops
/// the run.
pub fn run_reconciliation(
    registry: &dyn RegistrySource,
    inventory: &dyn InventorySource,
    offering: &str,
) -> Result<ReconReport, HandlerError> {
    let registry_records = registry.fetch(offering).map_err(HandlerError::Registry)?;
    let inventory_records = inventory.fetch().map_err(HandlerError::Inventory)?;

    log::info!(
        "reconciling {} registry hosts against {} inventory records (offering '{offering}')",
        registry_records.len(),
        inventory_records.len()
    );

    reconcile(&registry_records, &inventory_records).map_err(HandlerError::Engine)
}

/// Wrap a run outcome in the response envelope.
pub fn respond(offering: &str, outcome: &Result<ReconReport, HandlerError>) -> ReconResponse {
    match outcome {
        Ok(report) => ReconResponse::success(offering, report.clone()),
        Err(err) => {
            log::error!("{err}");
            ReconResponse::failure(err.kind(), err.to_string())
        }
    }
}

/// Run one reconciliation and always produce a response.
pub fn perform_reconciliation(
    registry: &dyn RegistrySource,
    inventory: &dyn InventorySource,
    offering: &str,
) -> ReconResponse {
    respond(offering, &run_reconciliation(registry, inventory, offering))
}
