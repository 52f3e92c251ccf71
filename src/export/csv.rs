//! CSV rendering of a payment notice
//!
//! Spreadsheet-compatible layout: a header block describing the account and
//! period, then the charge table and the amount due.

use std::io::Write;

use crate::error::{BillingError, BillingResult};

use super::json::NoticeDocument;
use super::RenderOptions;

fn csv_err(e: csv::Error) -> BillingError {
    BillingError::Export(e.to_string())
}

/// Write the document as CSV
///
/// Rows have different widths (header block vs. table), so the writer is
/// flexible.
pub fn write_notice_csv<W: Write>(
    document: &NoticeDocument,
    options: &RenderOptions,
    writer: &mut W,
) -> BillingResult<()> {
    let mut csv = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    let generated = document
        .generated_on
        .format(&options.date_format)
        .to_string();

    csv.write_record(["PAYMENT NOTICE"]).map_err(csv_err)?;
    csv.write_record(["Account", document.account_number.as_str()])
        .map_err(csv_err)?;
    csv.write_record(["Holder", document.holder.as_str()])
        .map_err(csv_err)?;
    csv.write_record(["Address", document.address.as_str()])
        .map_err(csv_err)?;
    csv.write_record(["Period", document.period_label.as_str()])
        .map_err(csv_err)?;
    csv.write_record(["Generated", generated.as_str()])
        .map_err(csv_err)?;

    let amount_header = format!("Amount ({})", document.currency);
    csv.write_record(["No", "Service", "Quantity", "Tariff", amount_header.as_str()])
        .map_err(csv_err)?;

    for line in &document.lines {
        csv.write_record([
            line.number.to_string(),
            line.service.clone(),
            line.quantity.to_string(),
            format!("{:.2}", line.tariff),
            format!("{:.2}", line.amount),
        ])
        .map_err(csv_err)?;
    }

    if document.has_adjustments() {
        csv.write_record([
            "",
            "Adjustments",
            "",
            "",
            format!("{:.2}", document.adjustments).as_str(),
        ])
        .map_err(csv_err)?;
    }

    csv.write_record([
        "",
        "TOTAL DUE",
        "",
        "",
        format!("{:.2}", document.total_amount).as_str(),
    ])
    .map_err(csv_err)?;

    csv.flush()
        .map_err(|e| BillingError::Export(e.to_string()))?;

    Ok(())
}
