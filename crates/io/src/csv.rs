// CSV extract reading

use std::io::Read;
use std::path::Path;

use crate::error::SourceError;
use crate::table::Table;

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, SourceError> {
    let mut file = std::fs::File::open(path).map_err(|e| SourceError::from_io(&e, path))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| SourceError::from_io(&e, path))?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Drop a UTF-8 BOM and a PowerShell `Export-Csv` type line (`#TYPE ...`).
fn strip_preamble(content: &str) -> &str {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if content.starts_with("#TYPE") {
        match content.find('\n') {
            Some(nl) => &content[nl + 1..],
            None => "",
        }
    } else {
        content
    }
}

/// Pick the delimiter of an inventory extract from its first lines.
///
/// Candidates are comma, semicolon, tab and pipe (some vCD report exports).
/// Each scores by how many sampled lines agree with the header's field count;
/// a candidate that leaves the header as one field is never chosen.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b',', b';', b'\t', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the header line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Parse CSV text with a header row into a [`Table`]. Header names are trimmed;
/// rows may be shorter or longer than the header.
pub fn parse_table(content: &str) -> Result<Table, csv::Error> {
    let content = strip_preamble(content);
    let delimiter = sniff_delimiter(content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|v| v.to_string()).collect());
    }

    Ok(Table { headers, rows })
}
