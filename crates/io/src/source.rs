// Inventory retrieval across configured site folders.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use vmca_recon::InventoryRecord;

use crate::columns::InventoryColumns;
use crate::error::SourceError;
use crate::inventory::parse_inventory;
use crate::locate::select_extract;
use crate::table::load_table;

/// Supplies the inventory side of a run.
pub trait InventorySource {
    fn fetch(&self) -> Result<Vec<InventoryRecord>, SourceError>;
}

/// One site's drop folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySite {
    pub name: String,
    pub folder: PathBuf,
    /// When set, must exist and be non-empty before the folder is read.
    pub token_file: Option<PathBuf>,
}

impl InventorySite {
    pub fn new(name: impl Into<String>, folder: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), folder: folder.into(), token_file: None }
    }
}

/// Inventory read from the latest extract in each site folder, concatenated
/// in site order.
#[derive(Debug, Clone)]
pub struct FolderInventory {
    pub sites: Vec<InventorySite>,
    pub columns: InventoryColumns,
    today: Option<NaiveDate>,
}

impl FolderInventory {
    pub fn new(sites: Vec<InventorySite>, columns: InventoryColumns) -> Self {
        Self { sites, columns, today: None }
    }

    /// Select extracts as if run on `today` instead of the local date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Path of the extract each site would be read from.
    pub fn locate(&self) -> Result<Vec<(String, PathBuf)>, SourceError> {
        let today = self.today();
        self.sites
            .iter()
            .map(|site| {
                check_token(site)?;
                let path = select_extract(&site.folder, today).map_err(|e| site_error(site, e))?;
                Ok((site.name.clone(), path))
            })
            .collect()
    }
}

impl InventorySource for FolderInventory {
    fn fetch(&self) -> Result<Vec<InventoryRecord>, SourceError> {
        if self.sites.is_empty() {
            return Err(SourceError::other("no inventory sites configured"));
        }

        let mut records = Vec::new();
        for (name, path) in self.locate()? {
            let site_records = read_extract(&path, &self.columns)
                .map_err(|e| SourceError { kind: e.kind, message: format!("site {name}: {}", e.message) })?;
            log::info!("site {name}: {} records from {}", site_records.len(), path.display());
            records.extend(site_records);
        }
        Ok(records)
    }
}

fn read_extract(path: &Path, columns: &InventoryColumns) -> Result<Vec<InventoryRecord>, SourceError> {
    let table = load_table(path, None)?;
    parse_inventory(&table, columns, &path.display().to_string())
}

fn site_error(site: &InventorySite, err: SourceError) -> SourceError {
    SourceError { kind: err.kind, message: format!("site {}: {}", site.name, err.message) }
}

fn check_token(site: &InventorySite) -> Result<(), SourceError> {
    let Some(token_file) = &site.token_file else {
        return Ok(());
    };
    let token = std::fs::read_to_string(token_file).map_err(|e| {
        SourceError::auth_failed(format!(
            "site {}: cannot read credentials {}: {e}",
            site.name,
            token_file.display()
        ))
    })?;
    if token.trim().is_empty() {
        return Err(SourceError::auth_failed(format!(
            "site {}: credentials file {} is empty",
            site.name,
            token_file.display()
        )));
    }
    Ok(())
}
