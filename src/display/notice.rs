//! Notice display formatting

use crate::export::NoticeDocument;

/// Format a processed notice for the terminal
pub fn format_notice(document: &NoticeDocument) -> String {
    let name_width = document
        .lines
        .iter()
        .map(|l| l.service.len())
        .max()
        .unwrap_or(7)
        .max(7);

    let mut output = String::new();

    output.push_str(&format!("Payment notice {}\n", document.account_number));
    output.push_str(&format!("  Holder:  {}\n", document.holder));
    output.push_str(&format!("  Address: {}\n", document.address));
    output.push_str(&format!(
        "  Period:  {} ({})\n",
        document.period_label, document.period
    ));
    output.push('\n');

    output.push_str(&format!(
        "{:>3}  {:<name_width$}  {:>10}  {:>10}  {:>12}\n",
        "No",
        "Service",
        "Quantity",
        "Tariff",
        "Amount",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:->3}  {:-<name_width$}  {:->10}  {:->10}  {:->12}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for line in &document.lines {
        output.push_str(&format!(
            "{:>3}  {:<name_width$}  {:>10}  {:>10.2}  {:>12.2}\n",
            line.number,
            line.service,
            line.quantity,
            line.tariff,
            line.amount,
            name_width = name_width,
        ));
    }

    let label_width = name_width + 29;
    if document.has_adjustments() {
        output.push_str(&format!(
            "{:<label_width$}  {:>12.2}\n",
            "Adjustments",
            document.adjustments,
            label_width = label_width,
        ));
    }
    output.push_str(&format!(
        "{:<label_width$}  {:>12.2} {}\n",
        "TOTAL DUE",
        document.total_amount,
        document.currency,
        label_width = label_width,
    ));

    output
}
