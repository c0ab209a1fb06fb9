// Inventory extract rows → InventoryRecord, one record per listed address.

use vmca_recon::InventoryRecord;

use crate::columns::InventoryColumns;
use crate::error::SourceError;
use crate::table::{cell, Table};

/// Convert an extract table into inventory records.
///
/// The IP column is required; the others read as empty when the extract
/// lacks them. Rows with an empty IP cell are skipped. A cell listing several
/// addresses separated by whitespace yields one record per address, each
/// carrying the row's location, org and name.
pub fn parse_inventory(
    table: &Table,
    columns: &InventoryColumns,
    source: &str,
) -> Result<Vec<InventoryRecord>, SourceError> {
    let ip_col = table.require_column(&columns.ip, source)?;
    let location_col = table.column(&columns.location_id);
    let org_col = table.column(&columns.org);
    let name_col = table.column(&columns.name);

    for (field, col) in [
        (&columns.location_id, location_col),
        (&columns.org, org_col),
        (&columns.name, name_col),
    ] {
        if col.is_none() {
            log::warn!("{source}: no '{field}' column, values read as empty");
        }
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in &table.rows {
        let ips = cell(row, Some(ip_col));
        if ips.is_empty() {
            skipped += 1;
            continue;
        }

        let location_id = cell(row, location_col);
        let org = cell(row, org_col);
        let name = cell(row, name_col);

        for ip in ips.split_whitespace() {
            records.push(InventoryRecord {
                ip: ip.to_string(),
                location_id: location_id.to_string(),
                org: org.to_string(),
                name: name.to_string(),
            });
        }
    }

    if skipped > 0 {
        log::info!("{source}: skipped {skipped} rows without an IP");
    }
    log::debug!("{source}: {} rows → {} inventory records", table.rows.len(), records.len());

    Ok(records)
}
