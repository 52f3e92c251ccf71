//! Audit entry data structures
//!
//! Defines the outcome of a notice generation attempt and the entry format
//! itself.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BillingError;
use crate::models::{AccountCode, BillingPeriod, PaymentNotice};

/// Result of one notice generation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// A notice was rendered and written
    Generated,
    /// Building, processing or rendering failed
    Failed,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Generated => write!(f, "GENERATED"),
            Outcome::Failed => write!(f, "FAILED"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the attempt finished (UTC)
    pub timestamp: DateTime<Utc>,

    pub outcome: Outcome,

    pub account: AccountCode,

    /// Account number, when the account could be resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,

    pub period: BillingPeriod,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,

    /// Rendered file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEntry {
    /// Entry for a notice that was written to `output`
    pub fn generated(notice: &PaymentNotice<'_>, output: &Path) -> Self {
        Self {
            timestamp: Utc::now(),
            outcome: Outcome::Generated,
            account: notice.account.code,
            account_number: Some(notice.account.number.clone()),
            period: notice.period,
            total_amount: Some(notice.total_amount),
            output: Some(output.display().to_string()),
            error: None,
        }
    }

    /// Entry for a failed attempt; `account_number` is `None` when the
    /// account itself could not be found
    pub fn failed(
        account: AccountCode,
        account_number: Option<String>,
        period: BillingPeriod,
        error: &BillingError,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            outcome: Outcome::Failed,
            account,
            account_number,
            period,
            total_amount: None,
            output: None,
            error: Some(error.to_string()),
        }
    }

    /// Human-readable one-line summary
    pub fn summary(&self) -> String {
        let who = match &self.account_number {
            Some(number) => format!("{} ({})", self.account, number),
            None => self.account.to_string(),
        };
        match self.outcome {
            Outcome::Generated => format!(
                "{} {} {}: {:.2}",
                self.outcome,
                who,
                self.period,
                self.total_amount.unwrap_or_default()
            ),
            Outcome::Failed => format!(
                "{} {} {}: {}",
                self.outcome,
                who,
                self.period,
                self.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}
