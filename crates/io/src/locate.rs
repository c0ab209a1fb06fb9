// Picking the inventory extract inside a site folder.
//
// Extracts are named `MM-DD-YY_vCD_Inventory*.csv` (or `.xlsx`). Today's plain
// CSV wins; otherwise the file with the newest date prefix.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::SourceError;

static EXTRACT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2}-\d{2}-\d{2})_vCD_Inventory.*\.(csv|xlsx)$")
        .expect("EXTRACT_NAME is a valid regex pattern")
});

const DATE_PREFIX: &str = "%m-%d-%y";

/// File name of the extract written on `date`.
pub fn todays_name(date: NaiveDate) -> String {
    format!("{}_vCD_Inventory.csv", date.format(DATE_PREFIX))
}

/// Date encoded in an extract file name. `None` for names that are not
/// extracts or whose prefix is not a real date.
pub fn extract_date(file_name: &str) -> Option<NaiveDate> {
    let caps = EXTRACT_NAME.captures(file_name)?;
    NaiveDate::parse_from_str(caps.get(1)?.as_str(), DATE_PREFIX).ok()
}

/// Choose the extract to read from `folder`.
pub fn select_extract(folder: &Path, today: NaiveDate) -> Result<PathBuf, SourceError> {
    let entries = std::fs::read_dir(folder).map_err(|e| SourceError::from_io(&e, folder))?;

    let wanted = todays_name(today);
    let mut newest: Option<(NaiveDate, String)> = None;

    for entry in entries {
        let entry = entry.map_err(|e| SourceError::from_io(&e, folder))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };

        if name == wanted {
            log::debug!("{}: found today's extract {name}", folder.display());
            return Ok(folder.join(name));
        }

        let Some(date) = extract_date(&name) else {
            continue;
        };
        // Same date: lexically last name, so the choice does not depend on
        // directory listing order.
        let newer = match &newest {
            None => true,
            Some((best_date, best_name)) => (date, name.as_str()) > (*best_date, best_name.as_str()),
        };
        if newer {
            newest = Some((date, name));
        }
    }

    match newest {
        Some((date, name)) => {
            log::debug!("{}: no extract for {today}, using {name} ({date})", folder.display());
            Ok(folder.join(name))
        }
        None => Err(SourceError::not_found(format!(
            "{}: no inventory extract found (expected {wanted} or another MM-DD-YY_vCD_Inventory file)",
            folder.display()
        ))),
    }
}
