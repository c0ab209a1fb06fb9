// Header names used to find fields in registry exports and inventory extracts.

use serde::{Deserialize, Serialize};

/// Inventory extract headers. Defaults match the vCD inventory export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InventoryColumns {
    /// May hold several whitespace-separated addresses per row.
    pub ip: String,
    pub location_id: String,
    pub org: String,
    pub name: String,
}

impl Default for InventoryColumns {
    fn default() -> Self {
        Self {
            ip: "IP".into(),
            location_id: "vCD".into(),
            org: "Org".into(),
            name: "Name".into(),
        }
    }
}

/// Registry export headers. Defaults match the host table's column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryColumns {
    pub ip: String,
    pub hostname: String,
    pub workload_domain: String,
    pub user: String,
    pub org: String,
    /// Column compared against the requested offering.
    pub offering: String,
}

impl Default for RegistryColumns {
    fn default() -> Self {
        Self {
            ip: "ip_address".into(),
            hostname: "hostname".into(),
            workload_domain: "workload_domain".into(),
            user: "user".into(),
            org: "vcd_org".into(),
            offering: "host_type".into(),
        }
    }
}

impl InventoryColumns {
    /// Names that are empty after trimming, for config validation.
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("ip", &self.ip),
            ("location_id", &self.location_id),
            ("org", &self.org),
            ("name", &self.name),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect()
    }
}

impl RegistryColumns {
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("ip", &self.ip),
            ("hostname", &self.hostname),
            ("workload_domain", &self.workload_domain),
            ("user", &self.user),
            ("org", &self.org),
            ("offering", &self.offering),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect()
    }
}
