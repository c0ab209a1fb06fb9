// Registry export rows → RegistryRecord, filtered by offering.

use std::path::PathBuf;

use vmca_recon::RegistryRecord;

use crate::columns::RegistryColumns;
use crate::error::SourceError;
use crate::table::{cell, load_table, Table};

/// Offering requested when none is given.
pub const DEFAULT_OFFERING: &str = "VCFaaS";

/// Supplies the registry side of a run.
pub trait RegistrySource {
    fn fetch(&self, offering: &str) -> Result<Vec<RegistryRecord>, SourceError>;
}

/// Keep the rows whose offering column equals `offering` and map them to
/// registry records. Every mapped column must be present, and every kept row
/// must carry an IP.
pub fn parse_registry(
    table: &Table,
    columns: &RegistryColumns,
    offering: &str,
    source: &str,
) -> Result<Vec<RegistryRecord>, SourceError> {
    let ip = table.require_column(&columns.ip, source)?;
    let hostname = table.require_column(&columns.hostname, source)?;
    let workload_domain = table.require_column(&columns.workload_domain, source)?;
    let user = table.require_column(&columns.user, source)?;
    let org = table.require_column(&columns.org, source)?;
    let offering_col = table.require_column(&columns.offering, source)?;

    let mut records = Vec::new();
    for (row_idx, row) in table.rows.iter().enumerate() {
        if cell(row, Some(offering_col)) != offering {
            continue;
        }
        let ip_value = cell(row, Some(ip));
        if ip_value.is_empty() {
            // +2: header line plus 1-based numbering
            return Err(SourceError::other(format!(
                "{source}: row {} has an empty '{}'",
                row_idx + 2,
                columns.ip
            )));
        }
        records.push(RegistryRecord {
            ip: ip_value.to_string(),
            hostname: cell(row, Some(hostname)).to_string(),
            workload_domain: cell(row, Some(workload_domain)).to_string(),
            user: cell(row, Some(user)).to_string(),
            org: cell(row, Some(org)).to_string(),
        });
    }

    log::debug!(
        "{source}: {} of {} rows have offering '{offering}'",
        records.len(),
        table.rows.len()
    );
    Ok(records)
}

/// Registry export read from a CSV or spreadsheet file.
#[derive(Debug, Clone)]
pub struct FileRegistry {
    pub path: PathBuf,
    /// Spreadsheet sheet name; first sheet when `None`. Ignored for CSV.
    pub sheet: Option<String>,
    pub columns: RegistryColumns,
}

impl FileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), sheet: None, columns: RegistryColumns::default() }
    }
}

impl RegistrySource for FileRegistry {
    fn fetch(&self, offering: &str) -> Result<Vec<RegistryRecord>, SourceError> {
        let table = load_table(&self.path, self.sheet.as_deref())?;
        let source = self.path.display().to_string();
        let records = parse_registry(&table, &self.columns, offering, &source)?;
        log::info!("registry {source}: {} hosts for offering '{offering}'", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse_table;
    use vmca_recon::FailureKind;

    const EXPORT: &str = "\
ip_address,hostname,workload_domain,user,vcd_org,host_type
10.0.0.1,esx01,w381,ops,org-a,VCFaaS
10.0.0.2,esx02,w382,ops,org-b,VCS
10.0.0.3,,,,org-c,VCFaaS
";

    #[test]
    fn filters_by_offering() {
        let table = parse_table(EXPORT).unwrap();
        let recs = parse_registry(&table, &RegistryColumns::default(), "VCFaaS", "hosts.csv").unwrap();
        let ips: Vec<&str> = recs.iter().map(|r| r.ip.as_str()).collect();
        assert_eq!(ips, vec!["10.0.0.1", "10.0.0.3"]);
        assert_eq!(recs[0].hostname, "esx01");
        assert_eq!(recs[0].org, "org-a");
        assert_eq!(recs[1].workload_domain, "");
    }

    #[test]
    fn other_offering() {
        let table = parse_table(EXPORT).unwrap();
        let recs = parse_registry(&table, &RegistryColumns::default(), "VCS", "hosts.csv").unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].ip, "10.0.0.2");
    }

    #[test]
    fn missing_column_is_error() {
        let table = parse_table("ip_address,hostname\n10.0.0.1,h\n").unwrap();
        let err = parse_registry(&table, &RegistryColumns::default(), "VCFaaS", "hosts.csv").unwrap_err();
        assert_eq!(err.kind, FailureKind::Other);
        assert!(err.message.contains("'workload_domain'"));
    }

    #[test]
    fn empty_ip_in_selected_row_is_error() {
        let csv = "ip_address,hostname,workload_domain,user,vcd_org,host_type\n,h,w,u,o,VCFaaS\n";
        let table = parse_table(csv).unwrap();
        let err = parse_registry(&table, &RegistryColumns::default(), "VCFaaS", "hosts.csv").unwrap_err();
        assert_eq!(err.message, "hosts.csv: row 2 has an empty 'ip_address'");
    }

    #[test]
    fn empty_ip_in_other_offering_ignored() {
        let csv = "ip_address,hostname,workload_domain,user,vcd_org,host_type\n,h,w,u,o,VCS\n";
        let table = parse_table(csv).unwrap();
        let recs = parse_registry(&table, &RegistryColumns::default(), "VCFaaS", "hosts.csv").unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn file_registry_reads_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts.csv");
        std::fs::write(&path, EXPORT).unwrap();

        let recs = FileRegistry::new(&path).fetch(DEFAULT_OFFERING).unwrap();
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn file_registry_missing_file() {
        let err = FileRegistry::new("/nonexistent/hosts.csv").fetch(DEFAULT_OFFERING).unwrap_err();
        assert_eq!(err.kind, FailureKind::NotFound);
    }
}
