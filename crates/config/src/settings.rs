// Reconciliation settings
// Loaded from ~/.config/vmca/recon.toml (or --config / VMCA_CONFIG)

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use vmca_io::columns::{InventoryColumns, RegistryColumns};
use vmca_io::{FileRegistry, FolderInventory, InventorySite, DEFAULT_OFFERING};

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, message: String },
    /// One entry per rule the settings break.
    Invalid(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            ConfigError::Parse { path, message } => write!(f, "invalid TOML in {}: {message}", path.display()),
            ConfigError::Invalid(problems) => write!(f, "invalid settings: {}", problems.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrySettings {
    /// CSV or spreadsheet export of the host registry.
    pub path: Option<PathBuf>,
    /// Sheet to read from a spreadsheet export (first sheet if unset)
    pub sheet: Option<String>,
    pub columns: RegistryColumns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteSettings {
    pub name: String,
    pub folder: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InventorySettings {
    pub sites: Vec<SiteSettings>,
    pub columns: InventoryColumns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconSettings {
    /// Offering tag used when the caller does not name one.
    pub offering: String,
    pub registry: RegistrySettings,
    pub inventory: InventorySettings,
}

impl Default for ReconSettings {
    fn default() -> Self {
        Self {
            offering: DEFAULT_OFFERING.to_string(),
            registry: RegistrySettings::default(),
            inventory: InventorySettings::default(),
        }
    }
}

impl ReconSettings {
    /// Default settings file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vmca")
            .join("recon.toml")
    }

    /// Parse TOML text. Paths are kept as written.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a settings file, resolving relative paths against its directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::from_toml(&text, path)?;
        if let Some(base) = path.parent() {
            settings.resolve_paths(base);
        }
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load `path` if given; otherwise the default file when it exists, or
    /// built-in defaults when it does not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::load(&default)
                } else {
                    log::debug!("no settings file at {}, using defaults", default.display());
                    Ok(Self::default())
                }
            }
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(path) = self.registry.path.as_mut() {
            resolve(path);
        }
        for site in &mut self.inventory.sites {
            resolve(&mut site.folder);
            if let Some(token) = site.token_file.as_mut() {
                resolve(token);
            }
        }
    }

    /// Check the settings are complete enough to run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.offering.trim().is_empty() {
            problems.push("offering must not be empty".to_string());
        }
        if self.registry.path.is_none() {
            problems.push("registry.path is not set".to_string());
        }
        if self.inventory.sites.is_empty() {
            problems.push("at least one [[inventory.sites]] entry is required".to_string());
        }

        let mut seen = HashSet::new();
        for site in &self.inventory.sites {
            if site.name.trim().is_empty() {
                problems.push(format!("site with folder {} has an empty name", site.folder.display()));
            } else if !seen.insert(site.name.as_str()) {
                problems.push(format!("site name '{}' is used more than once", site.name));
            }
        }

        for field in self.registry.columns.blank_fields() {
            problems.push(format!("registry.columns.{field} must not be empty"));
        }
        for field in self.inventory.columns.blank_fields() {
            problems.push(format!("inventory.columns.{field} must not be empty"));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    /// Registry source described by these settings.
    pub fn registry_source(&self) -> Result<FileRegistry, ConfigError> {
        let path = self
            .registry
            .path
            .clone()
            .ok_or_else(|| ConfigError::Invalid(vec!["registry.path is not set".to_string()]))?;
        Ok(FileRegistry {
            path,
            sheet: self.registry.sheet.clone(),
            columns: self.registry.columns.clone(),
        })
    }

    /// Inventory source over the configured site folders.
    pub fn inventory_source(&self) -> FolderInventory {
        let sites = self
            .inventory
            .sites
            .iter()
            .map(|s| InventorySite {
                name: s.name.clone(),
                folder: s.folder.clone(),
                token_file: s.token_file.clone(),
            })
            .collect();
        FolderInventory::new(sites, self.inventory.columns.clone())
    }
}
