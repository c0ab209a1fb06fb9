// Configuration loading

pub mod settings;

pub use settings::{ConfigError, InventorySettings, ReconSettings, RegistrySettings, SiteSettings};
