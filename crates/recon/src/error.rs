use std::fmt;

use crate::model::Side;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconError {
    /// A record reached the engine without an IP. `position` is the index in
    /// the caller's input list.
    EmptyIp { side: Side, position: usize },
    /// The registry list carried the same IP twice.
    DuplicateRegistryIp { ip: String },
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIp { side, position } => {
                write!(f, "{side} record at position {position} has an empty ip")
            }
            Self::DuplicateRegistryIp { ip } => {
                write!(f, "registry contains ip '{ip}' more than once")
            }
        }
    }
}

impl std::error::Error for ReconError {}
