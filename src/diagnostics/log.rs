use chrono::Local;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tracing::error;

use super::types::{Diagnostic, DiagnosticKind};
use crate::constants::MAX_DIAGNOSTICS;
use crate::utils::ChatError;

/// In-memory channel for failures that never reach the transcript.
///
/// Every record is also emitted as a `tracing` error event. Only the most
/// recent `capacity` entries are kept.
#[derive(Debug)]
pub struct DiagnosticLog {
    entries: Mutex<VecDeque<Diagnostic>>,
    capacity: usize,
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::with_capacity(MAX_DIAGNOSTICS)
    }
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity.min(MAX_DIAGNOSTICS))),
            capacity: capacity.max(1),
        }
    }

    /// Record a failed send
    pub fn record(&self, session_id: &str, request_id: &str, failure: &ChatError) {
        let kind = DiagnosticKind::of(failure);
        error!(
            session_id,
            request_id,
            kind = kind.display_name(),
            "send failed: {}",
            failure
        );

        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(Diagnostic {
            kind,
            session_id: session_id.to_string(),
            request_id: request_id.to_string(),
            message: failure.to_string(),
            recorded_at: Local::now(),
        });
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.lock().iter().filter(|d| d.kind == kind).count()
    }

    pub fn last(&self) -> Option<Diagnostic> {
        self.entries.lock().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
