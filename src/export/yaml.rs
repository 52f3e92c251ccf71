//! YAML rendering of a payment notice

use std::io::Write;

use crate::error::{BillingError, BillingResult};

use super::json::NoticeDocument;

/// Write the document as YAML with a short comment header
pub fn write_notice_yaml<W: Write>(document: &NoticeDocument, writer: &mut W) -> BillingResult<()> {
    let export_err = |e: std::io::Error| BillingError::Export(e.to_string());

    writeln!(writer, "# Payment notice {}", document.account_number).map_err(export_err)?;
    writeln!(writer, "# Period: {}", document.period_label).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", document.generated_on).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, document).map_err(|e| BillingError::Export(e.to_string()))?;

    Ok(())
}
