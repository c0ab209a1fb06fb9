use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One host from the system of record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryRecord {
    pub ip: String,
    pub hostname: String,
    /// Empty means "not applicable". Matched as a substring of the
    /// inventory's `location_id`.
    pub workload_domain: String,
    pub user: String,
    pub org: String,
}

/// One IP from the inventory extract. Rows listing several IPs arrive here
/// already split, one record per address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub ip: String,
    /// Hosting cluster / management endpoint identifier (the extract's `vCD`).
    pub location_id: String,
    pub org: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Registry,
    Inventory,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry => write!(f, "registry"),
            Self::Inventory => write!(f, "inventory"),
        }
    }
}

// ---------------------------------------------------------------------------
// Pair evaluation
// ---------------------------------------------------------------------------

/// Result of comparing a registry record with the inventory record that
/// shares its IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairVerdict {
    pub domain_match: bool,
    pub org_match: bool,
}

impl PairVerdict {
    pub fn is_match(&self) -> bool {
        self.domain_match && self.org_match
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    NotDeployed,
    MissingInRegistry,
    /// Same IP on both sides, but domain and/or org disagree.
    Mismatch,
    /// A later inventory row for an already indexed IP with a different
    /// location or org.
    ConflictingDuplicate,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matched => write!(f, "matched"),
            Self::NotDeployed => write!(f, "not_deployed"),
            Self::MissingInRegistry => write!(f, "missing_in_registry"),
            Self::Mismatch => write!(f, "mismatch"),
            Self::ConflictingDuplicate => write!(f, "conflicting_duplicate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedHost {
    pub ip: String,
    pub match_status: MatchStatus,
    pub match_reason: String,
    pub registry: RegistryRecord,
    pub inventory: InventoryRecord,
}

/// Registry host the inventory extract does not confirm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotDeployedHost {
    #[serde(flatten)]
    pub record: RegistryRecord,
    pub match_status: MatchStatus,
    pub match_reason: String,
}

/// Inventory host the registry does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingHost {
    #[serde(flatten)]
    pub record: InventoryRecord,
    pub match_status: MatchStatus,
    pub match_reason: String,
}

/// Entry in the `duplicates` list. Either a registry/inventory mismatch
/// (`registry` is set) or a conflicting inventory repeat (`first_seen` is set).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateHost {
    pub ip: String,
    pub match_status: MatchStatus,
    pub match_reason: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub registry: Option<RegistryRecord>,
    pub inventory: InventoryRecord,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub first_seen: Option<InventoryRecord>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

/// Six counts of a run. Wire names follow the original reconciliation API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconSummary {
    #[serde(rename = "total_vmca_hosts")]
    pub total_registry: usize,
    /// Inventory records after sentinel filtering, before duplicate collapse.
    #[serde(rename = "total_hosts_in_report")]
    pub total_inventory: usize,
    #[serde(rename = "matched_hosts")]
    pub matched: usize,
    #[serde(rename = "missing_in_vmca")]
    pub missing_in_registry: usize,
    pub not_deployed: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconDetails {
    pub matched: Vec<MatchedHost>,
    pub missing_in_registry: Vec<MissingHost>,
    pub not_deployed: Vec<NotDeployedHost>,
    pub duplicates: Vec<DuplicateHost>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconReport {
    #[serde(rename = "reconciliation_summary")]
    pub summary: ReconSummary,
    pub details: ReconDetails,
}
