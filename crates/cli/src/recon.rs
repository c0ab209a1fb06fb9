//! `vmca recon`: registry vs. inventory reconciliation from a settings file.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;

use vmca_cli::exit_codes::{
    source_exit_code, EXIT_CONFIG_INVALID, EXIT_DISCREPANCIES, EXIT_ERROR,
};
use vmca_cli::service::{respond, run_reconciliation};
use vmca_config::{ReconSettings, SiteSettings};

use crate::CliError;

/// Settings shared by every `recon` subcommand. Flags override the file.
#[derive(Args)]
pub struct SourceArgs {
    /// Settings file (default: <config dir>/vmca/recon.toml)
    #[arg(long, env = "VMCA_CONFIG")]
    config: Option<PathBuf>,

    /// Inventory site folder; repeat for several sites. Replaces configured sites.
    #[arg(long = "inventory-dir", value_name = "DIR")]
    inventory_dirs: Vec<PathBuf>,

    /// Pick extracts as if run on this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    as_of: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum ReconCommands {
    /// Reconcile the registry against the latest inventory extracts
    #[command(after_help = "\
Examples:
  vmca recon run
  vmca recon run --json
  vmca recon run --offering VCS --output result.json
  vmca recon run --registry hosts.xlsx --inventory-dir box/DALST --inventory-dir box/TOKST
  vmca recon run --fail-on-discrepancy")]
    Run {
        #[command(flatten)]
        sources: SourceArgs,

        /// Offering tag to select registry hosts (default from settings, else VCFaaS)
        #[arg(long)]
        offering: Option<String>,

        /// Registry export (CSV or spreadsheet). Replaces the configured path.
        #[arg(long, value_name = "FILE")]
        registry: Option<PathBuf>,

        /// Print the response JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write the response JSON to a file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit 8 when any host is missing, not deployed, or duplicated
        #[arg(long)]
        fail_on_discrepancy: bool,
    },

    /// Show which extract each inventory site would be read from
    #[command(after_help = "\
Examples:
  vmca recon locate
  vmca recon locate --inventory-dir box/DALST --json")]
    Locate {
        #[command(flatten)]
        sources: SourceArgs,

        /// Print JSON to stdout
        #[arg(long)]
        json: bool,
    },
}

pub fn cmd_recon(cmd: ReconCommands) -> Result<(), CliError> {
    match cmd {
        ReconCommands::Run { sources, offering, registry, json, output, fail_on_discrepancy } => {
            cmd_recon_run(sources, offering, registry, json, output, fail_on_discrepancy)
        }
        ReconCommands::Locate { sources, json } => cmd_recon_locate(sources, json),
    }
}

fn recon_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

/// Site named after its folder, for `--inventory-dir`.
fn site_from_dir(dir: &Path) -> SiteSettings {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());
    SiteSettings { name, folder: dir.to_path_buf(), token_file: None }
}

fn load_settings(sources: &SourceArgs) -> Result<ReconSettings, CliError> {
    let mut settings = ReconSettings::load_or_default(sources.config.as_deref())
        .map_err(|e| recon_err(EXIT_CONFIG_INVALID, e.to_string()))?;
    if !sources.inventory_dirs.is_empty() {
        settings.inventory.sites = sources.inventory_dirs.iter().map(|d| site_from_dir(d)).collect();
    }
    Ok(settings)
}

fn inventory_source(settings: &ReconSettings, as_of: Option<NaiveDate>) -> vmca_io::FolderInventory {
    let source = settings.inventory_source();
    match as_of {
        Some(date) => source.with_today(date),
        None => source,
    }
}

fn cmd_recon_run(
    sources: SourceArgs,
    offering: Option<String>,
    registry: Option<PathBuf>,
    json_output: bool,
    output_file: Option<PathBuf>,
    fail_on_discrepancy: bool,
) -> Result<(), CliError> {
    let mut settings = load_settings(&sources)?;
    if let Some(offering) = offering {
        settings.offering = offering;
    }
    if let Some(path) = registry {
        settings.registry.path = Some(path);
    }
    settings.validate().map_err(|e| {
        recon_err(EXIT_CONFIG_INVALID, e.to_string())
            .with_hint("pass --registry / --inventory-dir, or check the file with `vmca config check`")
    })?;

    let registry_source = settings
        .registry_source()
        .map_err(|e| recon_err(EXIT_CONFIG_INVALID, e.to_string()))?;
    let inventory_source = inventory_source(&settings, sources.as_of);

    let outcome = run_reconciliation(&registry_source, &inventory_source, &settings.offering);
    let response = respond(&settings.offering, &outcome);

    // Output
    let json_str = serde_json::to_string_pretty(&response)
        .map_err(|e| recon_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| recon_err(EXIT_ERROR, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    let report = match outcome {
        Ok(report) => report,
        Err(err) => return Err(recon_err(err.exit_code(), err.to_string())),
    };

    // Human summary to stderr
    let s = &report.summary;
    eprintln!(
        "recon '{}': {} registry hosts, {} inventory hosts: {} matched, {} missing in registry, {} not deployed, {} duplicates",
        settings.offering,
        s.total_registry,
        s.total_inventory,
        s.matched,
        s.missing_in_registry,
        s.not_deployed,
        s.duplicates,
    );

    if fail_on_discrepancy && s.has_discrepancies() {
        return Err(recon_err(EXIT_DISCREPANCIES, "discrepancies found"));
    }

    Ok(())
}

#[derive(Serialize)]
struct LocatedExtract {
    site: String,
    path: PathBuf,
}

fn cmd_recon_locate(sources: SourceArgs, json_output: bool) -> Result<(), CliError> {
    let settings = load_settings(&sources)?;
    if settings.inventory.sites.is_empty() {
        return Err(recon_err(EXIT_CONFIG_INVALID, "no inventory sites configured")
            .with_hint("pass --inventory-dir or add [[inventory.sites]] to the settings file"));
    }

    let located = inventory_source(&settings, sources.as_of)
        .locate()
        .map_err(|e| recon_err(source_exit_code(e.kind), e.to_string()))?;

    if json_output {
        let entries: Vec<LocatedExtract> = located
            .into_iter()
            .map(|(site, path)| LocatedExtract { site, path })
            .collect();
        let json_str = serde_json::to_string_pretty(&entries)
            .map_err(|e| recon_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    } else {
        for (site, path) in located {
            println!("{site}\t{}", path.display());
        }
    }

    Ok(())
}
