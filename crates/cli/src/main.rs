// vmca - host registry vs. inventory extract reconciliation

mod recon;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vmca_cli::exit_codes::{EXIT_CONFIG_INVALID, EXIT_SUCCESS};
use vmca_config::ReconSettings;

#[derive(Parser)]
#[command(name = "vmca")]
#[command(about = "Reconcile the host registry against vCD inventory extracts")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug). VMCA_LOG overrides when unset.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run or inspect a reconciliation
    #[command(subcommand)]
    Recon(recon::ReconCommands),

    /// Settings file commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Validate a settings file without running
    #[command(after_help = "\
Examples:
  vmca config check
  vmca config check --config /etc/vmca/recon.toml")]
    Check {
        /// Settings file (default: <config dir>/vmca/recon.toml)
        #[arg(long, env = "VMCA_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the default settings file location
    Path,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  vmca-recon ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

/// stderr logging. `-v` flags win; otherwise VMCA_LOG, defaulting to warn.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("VMCA_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Recon(cmd) => recon::cmd_recon(cmd),
        Commands::Config(ConfigCommands::Check { config }) => cmd_config_check(config),
        Commands::Config(ConfigCommands::Path) => {
            println!("{}", ReconSettings::default_path().display());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG_INVALID, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// config check
// ============================================================================

fn cmd_config_check(config: Option<PathBuf>) -> Result<(), CliError> {
    let path = config.unwrap_or_else(ReconSettings::default_path);
    if !path.exists() {
        return Err(CliError::config(format!("no settings file at {}", path.display()))
            .with_hint("create it, or pass --config / set VMCA_CONFIG"));
    }

    let settings = ReconSettings::load(&path).map_err(|e| CliError::config(e.to_string()))?;
    settings.validate().map_err(|e| CliError::config(e.to_string()))?;

    let registry = settings
        .registry
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    eprintln!(
        "valid: offering '{}', registry {}, {} inventory site(s)",
        settings.offering,
        registry,
        settings.inventory.sites.len(),
    );
    for site in &settings.inventory.sites {
        if !site.folder.is_dir() {
            eprintln!("warning: site '{}' folder {} does not exist", site.name, site.folder.display());
        }
    }
    Ok(())
}
