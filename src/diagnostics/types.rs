use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::utils::ChatError;

/// Category of a recorded send failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// The query service call failed or returned an undecodable body
    Gateway,
    /// The captured session vanished before the reply could be appended
    NotFound,
}

impl DiagnosticKind {
    pub fn display_name(&self) -> &str {
        match self {
            DiagnosticKind::Gateway => "gateway",
            DiagnosticKind::NotFound => "not-found",
        }
    }

    pub fn of(error: &ChatError) -> Self {
        match error {
            ChatError::NotFound { .. } => DiagnosticKind::NotFound,
            _ => DiagnosticKind::Gateway,
        }
    }
}

/// One failed send operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub session_id: String,
    pub request_id: String,
    pub message: String,
    pub recorded_at: DateTime<Local>,
}
