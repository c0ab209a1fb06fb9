//! Response contract for callers that expose a reconciliation run.
//!
//! Upstream failures collapse into three kinds, each with a fixed HTTP-style
//! status. The engine itself never produces a `FailureKind`.

use serde::{Deserialize, Serialize};

use crate::model::{ReconDetails, ReconReport, ReconSummary};

pub const STATUS_OK: u16 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The inventory extract (or a folder holding it) does not exist.
    NotFound,
    /// The inventory source rejected or lacked credentials.
    AuthFailed,
    Other,
}

impl FailureKind {
    pub fn http_status(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::AuthFailed => 401,
            Self::Other => 500,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::AuthFailed => write!(f, "auth_failed"),
            Self::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResponseBody {
    Success {
        offering: String,
        reconciliation_summary: ReconSummary,
        details: ReconDetails,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: ResponseBody,
}

impl ReconResponse {
    pub fn success(offering: impl Into<String>, report: ReconReport) -> Self {
        Self {
            status_code: STATUS_OK,
            body: ResponseBody::Success {
                offering: offering.into(),
                reconciliation_summary: report.summary,
                details: report.details,
            },
        }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            status_code: kind.http_status(),
            body: ResponseBody::Error { message: message.into() },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.body, ResponseBody::Success { .. })
    }

    pub fn summary(&self) -> Option<&ReconSummary> {
        match &self.body {
            ResponseBody::Success { reconciliation_summary, .. } => Some(reconciliation_summary),
            ResponseBody::Error { .. } => None,
        }
    }
}
