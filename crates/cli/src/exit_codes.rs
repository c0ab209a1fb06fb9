//! CLI Exit Code Registry
//!
//! Single source of truth for `vmca` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                                   |
//! |------|-----------------------------------------------------------|
//! | 0    | Success                                                   |
//! | 1    | General error (unspecified)                               |
//! | 2    | Usage error (bad arguments)                               |
//! | 3    | Settings file unreadable or invalid                       |
//! | 4    | Inventory extract or folder not found (status 404)        |
//! | 5    | Inventory credentials missing or rejected (status 401)    |
//! | 6    | Registry or inventory source failed otherwise (status 500)|
//! | 7    | Source data broke the engine's input contract (status 500)|
//! | 8    | Discrepancies found (only with `--fail-on-discrepancy`)   |

use vmca_recon::FailureKind;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure (e.g. cannot write `--output`).
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
/// clap exits with this code itself when parsing fails; `vmca` never returns it.
pub const EXIT_USAGE: u8 = 2;

/// Settings file missing, malformed, or failing validation.
pub const EXIT_CONFIG_INVALID: u8 = 3;

/// Inventory not found.
pub const EXIT_INVENTORY_NOT_FOUND: u8 = 4;

/// Inventory credentials missing, empty, or unreadable.
pub const EXIT_INVENTORY_AUTH: u8 = 5;

/// Any other registry or inventory source failure.
pub const EXIT_SOURCE_FAILED: u8 = 6;

/// Empty IP or repeated registry IP reached the engine.
pub const EXIT_ENGINE_CONTRACT: u8 = 7;

/// Run succeeded but found missing, not-deployed, or duplicate hosts.
pub const EXIT_DISCREPANCIES: u8 = 8;

/// Exit code for a source failure of the given kind.
pub fn source_exit_code(kind: FailureKind) -> u8 {
    match kind {
        FailureKind::NotFound => EXIT_INVENTORY_NOT_FOUND,
        FailureKind::AuthFailed => EXIT_INVENTORY_AUTH,
        FailureKind::Other => EXIT_SOURCE_FAILED,
    }
}
