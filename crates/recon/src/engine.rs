use crate::classify::classify;
use crate::error::ReconError;
use crate::evidence::compute_summary;
use crate::index::{exclude_sentinel, index_inventory, index_registry, is_sentinel};
use crate::model::{InventoryRecord, ReconReport, RegistryRecord, Side};

/// Reconcile registry records against inventory extract records.
///
/// Pure and deterministic: output lists are sorted by IP. Fails only when the
/// inputs break their contract (empty IP, repeated registry IP); it never
/// returns a partial report.
pub fn reconcile(
    registry: &[RegistryRecord],
    inventory: &[InventoryRecord],
) -> Result<ReconReport, ReconError> {
    check_ips(registry.iter().map(|r| r.ip.as_str()).enumerate(), Side::Registry)?;
    // Sentinel rows are dropped before the ip contract applies.
    // Positions still index the caller's list.
    check_ips(
        inventory
            .iter()
            .enumerate()
            .filter(|(_, r)| !is_sentinel(r))
            .map(|(position, r)| (position, r.ip.as_str())),
        Side::Inventory,
    )?;

    let (considered, excluded) = exclude_sentinel(inventory);
    let registry_index = index_registry(registry)?;
    let inventory_index = index_inventory(&considered);

    log::debug!(
        "recon: {} registry, {} inventory ({} sentinel excluded, {} identical repeats collapsed, {} conflicting)",
        registry.len(),
        considered.len(),
        excluded,
        inventory_index.collapsed,
        inventory_index.conflicts.len(),
    );

    let details = classify(&registry_index, &inventory_index);
    let summary = compute_summary(&details, registry.len(), considered.len());

    log::debug!(
        "recon: {} matched, {} missing in registry, {} not deployed, {} duplicates",
        summary.matched,
        summary.missing_in_registry,
        summary.not_deployed,
        summary.duplicates,
    );

    Ok(ReconReport { summary, details })
}

fn check_ips<'a>(
    ips: impl Iterator<Item = (usize, &'a str)>,
    side: Side,
) -> Result<(), ReconError> {
    for (position, ip) in ips {
        if ip.is_empty() {
            return Err(ReconError::EmptyIp { side, position });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(ip: &str, domain: &str, org: &str) -> RegistryRecord {
        RegistryRecord {
            ip: ip.into(),
            hostname: String::new(),
            workload_domain: domain.into(),
            user: "admin".into(),
            org: org.into(),
        }
    }

    fn inv(ip: &str, location_id: &str, org: &str) -> InventoryRecord {
        InventoryRecord {
            ip: ip.into(),
            location_id: location_id.into(),
            org: org.into(),
            name: format!("{ip}.example.com"),
        }
    }

    #[test]
    fn empty_inputs_give_empty_report() {
        let report = reconcile(&[], &[]).unwrap();
        assert_eq!(report.summary, Default::default());
        assert_eq!(report.details, Default::default());
    }

    #[test]
    fn empty_registry_ip_fails_fast() {
        let err = reconcile(&[reg("10.0.0.1", "w", "o"), reg("", "w", "o")], &[]).unwrap_err();
        assert_eq!(err, ReconError::EmptyIp { side: Side::Registry, position: 1 });
    }

    #[test]
    fn empty_inventory_ip_fails_fast() {
        let err = reconcile(&[], &[inv("", "vc", "OrgA")]).unwrap_err();
        assert_eq!(err, ReconError::EmptyIp { side: Side::Inventory, position: 0 });
        assert_eq!(err.to_string(), "inventory record at position 0 has an empty ip");
    }

    #[test]
    fn repeated_registry_ip_fails_fast() {
        let err = reconcile(&[reg("10.0.0.1", "w", "o"), reg("10.0.0.1", "x", "y")], &[]).unwrap_err();
        assert!(matches!(err, ReconError::DuplicateRegistryIp { .. }));
    }

    #[test]
    fn total_inventory_counts_post_filter_pre_dedup() {
        let inventory = vec![
            inv("10.0.0.1", "vc", "public-catalog"),
            inv("10.0.0.2", "vc", "OrgA"),
            inv("10.0.0.2", "vc", "OrgA"),
            inv("10.0.0.2", "vc2", "OrgA"),
        ];
        let report = reconcile(&[], &inventory).unwrap();
        assert_eq!(report.summary.total_inventory, 3);
        assert_eq!(report.summary.missing_in_registry, 1);
        assert_eq!(report.summary.duplicates, 1);
    }

    #[test]
    fn sentinel_ip_shared_with_registry_is_not_deployed() {
        // The sentinel row is gone before indexing, so the registry host is unconfirmed.
        let report = reconcile(
            &[reg("10.0.0.4", "w381", "OrgA")],
            &[inv("10.0.0.4", "vcenter-w381", "Public-Catalog")],
        )
        .unwrap();
        assert_eq!(report.summary.not_deployed, 1);
        assert_eq!(report.summary.total_inventory, 0);
    }

    #[test]
    fn sentinel_row_without_ip_is_ignored() {
        let report = reconcile(&[], &[inv("", "vcd-cat", "Public-Catalog")]).unwrap();
        assert_eq!(report.summary.total_inventory, 0);
        assert!(report.details.missing_in_registry.is_empty());
    }

    #[test]
    fn empty_ip_position_counts_sentinel_rows() {
        let err = reconcile(
            &[],
            &[inv("", "vcd-cat", "public-catalog"), inv("10.0.0.1", "vc", "o"), inv("", "vc", "o")],
        )
        .unwrap_err();
        assert_eq!(err, ReconError::EmptyIp { side: Side::Inventory, position: 2 });
    }

    #[test]
    fn report_serializes_with_summary_and_details() {
        let report = reconcile(
            &[reg("10.0.0.1", "w381", "OrgA")],
            &[inv("10.0.0.1", "vcenter-w381-prod", "orga")],
        )
        .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["reconciliation_summary"]["matched_hosts"], 1);
        let matched = &json["details"]["matched"][0];
        assert_eq!(matched["ip"], "10.0.0.1");
        assert_eq!(matched["match_status"], "matched");
        assert_eq!(matched["registry"]["workload_domain"], "w381");
        assert_eq!(matched["inventory"]["location_id"], "vcenter-w381-prod");
    }
}
