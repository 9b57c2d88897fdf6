//! Append-only audit trail of pipeline stages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    Success,
    Skipped,
    Failed,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Skipped => "SKIPPED",
            Self::Failed => "FAILED",
        }
    }
}

/// One entry in the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub step: String,
    pub status: AuditStatus,
    pub message: String,
    /// Structured details about the stage.
    pub metadata: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

/// Append-only sequence of audit entries for a single query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditTrail {
    entries: Vec<AuditEntry>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(
        &mut self,
        step: &str,
        status: AuditStatus,
        message: impl Into<String>,
        metadata: serde_json::Value,
    ) {
        let entry = AuditEntry {
            step: step.to_string(),
            status,
            message: message.into(),
            metadata,
            timestamp: Utc::now(),
        };
        tracing::debug!(
            event = "audit_recorded",
            step = %entry.step,
            status = entry.status.as_str(),
            message = %entry.message,
            "audit entry recorded"
        );
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Most recent entry for a step.
    pub fn last_for(&self, step: &str) -> Option<&AuditEntry> {
        self.entries.iter().rev().find(|e| e.step == step)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
