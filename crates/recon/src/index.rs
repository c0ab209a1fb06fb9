use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::ReconError;
use crate::model::{InventoryRecord, RegistryRecord};

/// Org name marking shared, non-tenant inventory (catalog templates and the
/// like). Compared case-insensitively.
pub const SENTINEL_ORG: &str = "public-catalog";

pub fn is_sentinel(record: &InventoryRecord) -> bool {
    record.org.to_lowercase() == SENTINEL_ORG
}

/// Drop sentinel-org records. Returns the kept records and how many were dropped.
pub fn exclude_sentinel(records: &[InventoryRecord]) -> (Vec<&InventoryRecord>, usize) {
    let kept: Vec<&InventoryRecord> = records.iter().filter(|r| !is_sentinel(r)).collect();
    let dropped = records.len() - kept.len();
    (kept, dropped)
}

/// Registry records keyed by IP. The registry guarantees one record per IP;
/// a repeat is a contract violation, not something to resolve here.
pub fn index_registry(records: &[RegistryRecord]) -> Result<HashMap<&str, &RegistryRecord>, ReconError> {
    let mut by_ip = HashMap::with_capacity(records.len());
    for record in records {
        match by_ip.entry(record.ip.as_str()) {
            Entry::Occupied(_) => {
                return Err(ReconError::DuplicateRegistryIp { ip: record.ip.clone() });
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
    }
    Ok(by_ip)
}

/// A later inventory row whose location or org disagrees with the row
/// already indexed for its IP.
#[derive(Debug, Clone, Copy)]
pub struct Conflict<'a> {
    pub first_seen: &'a InventoryRecord,
    pub later: &'a InventoryRecord,
}

#[derive(Debug, Default)]
pub struct InventoryIndex<'a> {
    pub by_ip: HashMap<&'a str, &'a InventoryRecord>,
    /// Conflicting repeats, in input order.
    pub conflicts: Vec<Conflict<'a>>,
    /// Repeats identical in location and org, dropped without a report.
    pub collapsed: usize,
}

/// Index inventory records by IP in input order. First occurrence wins.
pub fn index_inventory<'a>(records: &[&'a InventoryRecord]) -> InventoryIndex<'a> {
    let mut index = InventoryIndex {
        by_ip: HashMap::with_capacity(records.len()),
        ..InventoryIndex::default()
    };

    for &record in records {
        match index.by_ip.entry(record.ip.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(slot) => {
                let first_seen = *slot.get();
                if first_seen.location_id == record.location_id && first_seen.org == record.org {
                    index.collapsed += 1;
                } else {
                    index.conflicts.push(Conflict { first_seen, later: record });
                }
            }
        }
    }

    index
}
