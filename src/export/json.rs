//! JSON rendering of a payment notice
//!
//! [`NoticeDocument`] is an owned snapshot of a processed notice. It is the
//! common input of every renderer.

use std::io::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, BillingResult};
use crate::models::{AccountCode, BillingPeriod, PaymentNotice};

use super::RenderOptions;

/// Current document schema version
pub const NOTICE_SCHEMA_VERSION: &str = "1.0.0";

/// One billed service on a notice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticeLine {
    /// 1-based line number
    pub number: usize,
    pub service: String,
    pub quantity: f64,
    pub tariff: f64,
    /// Undiscounted `tariff * quantity`
    pub amount: f64,
}

/// Owned, render-ready snapshot of a processed notice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeDocument {
    pub schema_version: String,
    pub generated_on: NaiveDate,
    pub app_version: String,

    pub account: AccountCode,
    pub account_number: String,
    pub holder: String,
    pub address: String,

    pub period: BillingPeriod,
    pub period_label: String,

    pub currency: String,
    pub lines: Vec<NoticeLine>,

    /// Sum of the line amounts
    pub base_amount: f64,

    /// Difference between the amount due and the base amount
    /// (negative for discounts, positive for surcharges)
    pub adjustments: f64,

    pub total_amount: f64,
}

impl NoticeDocument {
    pub fn from_notice(notice: &PaymentNotice<'_>, options: &RenderOptions) -> Self {
        let lines: Vec<NoticeLine> = notice
            .charges
            .iter()
            .enumerate()
            .map(|(i, (charge, service))| NoticeLine {
                number: i + 1,
                service: service.name.clone(),
                quantity: charge.quantity,
                tariff: service.tariff,
                amount: service.calculate_cost(charge.quantity),
            })
            .collect();

        let base_amount = notice.base_amount();

        Self {
            schema_version: NOTICE_SCHEMA_VERSION.to_string(),
            generated_on: options.generated_on,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            account: notice.account.code,
            account_number: notice.account.number.clone(),
            holder: notice.account.full_name.clone(),
            address: notice.address(),
            period: notice.period,
            period_label: notice.period.label(),
            currency: options.currency.clone(),
            lines,
            base_amount,
            adjustments: notice.total_amount - base_amount,
            total_amount: notice.total_amount,
        }
    }

    /// Whether the rule chain changed the amount due
    pub fn has_adjustments(&self) -> bool {
        self.adjustments.abs() >= 0.005
    }
}

/// Write the document as pretty-printed JSON
pub fn write_notice_json<W: Write>(document: &NoticeDocument, writer: &mut W) -> BillingResult<()> {
    serde_json::to_writer_pretty(&mut *writer, document)
        .map_err(|e| BillingError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BillingError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::{options, sample_notice, sample_storage};

    #[test]
    fn test_document_from_notice() {
        let (storage, _temp) = sample_storage();
        let notice = sample_notice(&storage, 2);
        let doc = NoticeDocument::from_notice(&notice, &options());

        assert_eq!(doc.account_number, "PA-002");
        assert_eq!(doc.address, "Pushkina, h. 25, apt. 42");
        assert_eq!(doc.period_label, "January 2025");
        assert_eq!(doc.lines.len(), 3);
        assert_eq!(doc.lines[2].service, "Heating");
        assert_eq!(doc.lines[2].amount, 5500.0);
        assert!(doc.has_adjustments());
        assert!((doc.adjustments + 275.0).abs() < 1e-6);
    }

    #[test]
    fn test_write_json() {
        let (storage, _temp) = sample_storage();
        let notice = sample_notice(&storage, 1);
        let doc = NoticeDocument::from_notice(&notice, &options());

        let mut out = Vec::new();
        write_notice_json(&doc, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["account_number"], "PA-001");
        assert_eq!(value["period"], "2025-01");
        assert_eq!(value["lines"].as_array().unwrap().len(), 3);
        assert!(!doc.has_adjustments());
    }
}
