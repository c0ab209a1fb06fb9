// Boundary sources for reconciliation runs: registry exports and
// inventory extracts read from local files.

pub mod columns;
pub mod csv;
pub mod error;
pub mod inventory;
pub mod locate;
pub mod registry;
pub mod source;
pub mod table;
pub mod xlsx;

pub use error::SourceError;
pub use source::{FolderInventory, InventorySite, InventorySource};
pub use registry::{FileRegistry, RegistrySource, DEFAULT_OFFERING};
