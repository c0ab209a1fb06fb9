use std::collections::HashMap;
use std::net::IpAddr;

use crate::index::InventoryIndex;
use crate::matcher::{evaluate_pair, pair_reason};
use crate::model::{
    DuplicateHost, MatchStatus, MatchedHost, MissingHost, NotDeployedHost, ReconDetails,
    RegistryRecord,
};

/// Classify both indices into the four report lists, sorted by IP.
///
/// Registry side: each IP lands in exactly one of matched / duplicates
/// (mismatch) / not_deployed. Inventory side: each indexed IP lands in exactly
/// one of matched / duplicates (mismatch) / missing_in_registry; conflicting
/// repeats from indexing are added to duplicates on top of that.
pub fn classify(
    registry: &HashMap<&str, &RegistryRecord>,
    inventory: &InventoryIndex<'_>,
) -> ReconDetails {
    let mut details = ReconDetails::default();

    for conflict in &inventory.conflicts {
        details.duplicates.push(DuplicateHost {
            ip: conflict.later.ip.clone(),
            match_status: MatchStatus::ConflictingDuplicate,
            match_reason: format!(
                "ip already listed with location_id '{}' and org '{}'; this row has location_id '{}' and org '{}'",
                conflict.first_seen.location_id,
                conflict.first_seen.org,
                conflict.later.location_id,
                conflict.later.org,
            ),
            registry: None,
            inventory: conflict.later.clone(),
            first_seen: Some(conflict.first_seen.clone()),
        });
    }

    for (ip, reg) in registry {
        match inventory.by_ip.get(ip) {
            Some(inv) => {
                let verdict = evaluate_pair(reg, inv);
                let match_reason = pair_reason(verdict, reg, inv);
                if verdict.is_match() {
                    details.matched.push(MatchedHost {
                        ip: reg.ip.clone(),
                        match_status: MatchStatus::Matched,
                        match_reason,
                        registry: (*reg).clone(),
                        inventory: (*inv).clone(),
                    });
                } else {
                    details.duplicates.push(DuplicateHost {
                        ip: reg.ip.clone(),
                        match_status: MatchStatus::Mismatch,
                        match_reason,
                        registry: Some((*reg).clone()),
                        inventory: (*inv).clone(),
                        first_seen: None,
                    });
                }
            }
            None => details.not_deployed.push(NotDeployedHost {
                record: (*reg).clone(),
                match_status: MatchStatus::NotDeployed,
                match_reason: "present in registry, absent from inventory extract".into(),
            }),
        }
    }

    for (ip, inv) in &inventory.by_ip {
        if !registry.contains_key(ip) {
            details.missing_in_registry.push(MissingHost {
                record: (*inv).clone(),
                match_status: MatchStatus::MissingInRegistry,
                match_reason: "present in inventory extract, absent from registry".into(),
            });
        }
    }

    sort_details(&mut details);
    details
}

/// Numeric address order where the IP parses, text order after that.
fn ip_sort_key(ip: &str) -> (bool, Option<IpAddr>, String) {
    match ip.parse::<IpAddr>() {
        Ok(addr) => (false, Some(addr), String::new()),
        Err(_) => (true, None, ip.to_string()),
    }
}

// Stable: conflicting repeats for one IP keep input order.
fn sort_details(details: &mut ReconDetails) {
    details.matched.sort_by_cached_key(|h| ip_sort_key(&h.ip));
    details.missing_in_registry.sort_by_cached_key(|h| ip_sort_key(&h.record.ip));
    details.not_deployed.sort_by_cached_key(|h| ip_sort_key(&h.record.ip));
    details.duplicates.sort_by_cached_key(|h| ip_sort_key(&h.ip));
}
