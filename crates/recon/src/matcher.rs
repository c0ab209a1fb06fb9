use crate::model::{InventoryRecord, PairVerdict, RegistryRecord};

/// Case-insensitive containment of `workload_domain` in `location_id`.
///
/// The extract's location identifier is a decorated form of the registry's
/// workload domain (`w381` vs `vcenter-w381-prod`), hence substring rather
/// than equality. An empty value on either side never matches.
pub fn domain_match(workload_domain: &str, location_id: &str) -> bool {
    if workload_domain.is_empty() || location_id.is_empty() {
        return false;
    }
    location_id
        .to_lowercase()
        .contains(&workload_domain.to_lowercase())
}

/// Case-insensitive org equality. Empty never equals empty.
pub fn org_match(registry_org: &str, inventory_org: &str) -> bool {
    if registry_org.is_empty() || inventory_org.is_empty() {
        return false;
    }
    registry_org.to_lowercase() == inventory_org.to_lowercase()
}

/// Compare a registry record with the inventory record sharing its IP.
pub fn evaluate_pair(registry: &RegistryRecord, inventory: &InventoryRecord) -> PairVerdict {
    PairVerdict {
        domain_match: domain_match(&registry.workload_domain, &inventory.location_id),
        org_match: org_match(&registry.org, &inventory.org),
    }
}

/// Human-readable explanation for a pair verdict.
pub fn pair_reason(
    verdict: PairVerdict,
    registry: &RegistryRecord,
    inventory: &InventoryRecord,
) -> String {
    let domain = format!(
        "workload_domain '{}' vs location_id '{}'",
        registry.workload_domain, inventory.location_id
    );
    let org = format!("org '{}' vs '{}'", registry.org, inventory.org);

    match (verdict.domain_match, verdict.org_match) {
        (true, true) => format!("{domain} and {org} agree"),
        (false, true) => format!("domain mismatch: {domain}"),
        (true, false) => format!("org mismatch: {org}"),
        (false, false) => format!("domain and org mismatch: {domain}; {org}"),
    }
}
