//! Notice rendering for billing-notice
//!
//! A processed [`PaymentNotice`] is snapshotted into a [`NoticeDocument`] and
//! rendered in one of three formats:
//! - CSV: spreadsheet-compatible notice
//! - JSON: machine-readable document
//! - YAML: human-readable document

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::settings::Settings;
use crate::error::{BillingError, BillingResult};
use crate::models::PaymentNotice;

pub use self::csv::write_notice_csv;
pub use json::{write_notice_json, NoticeDocument, NoticeLine, NOTICE_SCHEMA_VERSION};
pub use yaml::write_notice_yaml;

/// Output format of a rendered notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Presentation settings for rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub currency: String,
    /// strftime format for the generation date
    pub date_format: String,
    pub generated_on: NaiveDate,
}

impl RenderOptions {
    /// Options from user settings, dated today
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            currency: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
            generated_on: Local::now().date_naive(),
        }
    }
}

/// Render a processed notice into `writer`
pub fn render_notice<W: Write>(
    notice: &PaymentNotice<'_>,
    format: ExportFormat,
    options: &RenderOptions,
    writer: &mut W,
) -> BillingResult<()> {
    let document = NoticeDocument::from_notice(notice, options);
    match format {
        ExportFormat::Csv => write_notice_csv(&document, options, writer),
        ExportFormat::Json => write_notice_json(&document, writer),
        ExportFormat::Yaml => write_notice_yaml(&document, writer),
    }
}

/// File name for a notice: `notice_<account number>_<YYYY-MM>.<ext>`
///
/// Letters and digits of any script are kept along with `-` and `_`; path
/// separators, whitespace and other punctuation in the account number become `_`.
pub fn notice_file_name(notice: &PaymentNotice<'_>, format: ExportFormat) -> String {
    let number: String = notice
        .account
        .number
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("notice_{}_{}.{}", number, notice.period, format.extension())
}

/// Render a notice into `dir`, creating the directory if needed
///
/// Returns the path of the written file. An existing file is overwritten.
pub fn write_notice_file(
    notice: &PaymentNotice<'_>,
    format: ExportFormat,
    options: &RenderOptions,
    dir: &Path,
) -> BillingResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| {
        BillingError::Export(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    let path = dir.join(notice_file_name(notice, format));
    let file = File::create(&path).map_err(|e| {
        BillingError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;

    let mut writer = BufWriter::new(file);
    render_notice(notice, format, options, &mut writer)?;
    writer
        .flush()
        .map_err(|e| BillingError::Export(e.to_string()))?;

    Ok(path)
}


#[cfg(test)]
mod tests {
    use super::test_support::{options, sample_notice, sample_storage};
    use super::*;
    use crate::models::AccountCode;
    use tempfile::TempDir;

    #[test]
    fn test_format_extension_and_serde() {
        assert_eq!(ExportFormat::default(), ExportFormat::Csv);
        assert_eq!(ExportFormat::Yaml.extension(), "yaml");
        assert_eq!(serde_json::to_string(&ExportFormat::Json).unwrap(), "\"json\"");
    }

    #[test]
    fn test_notice_file_name() {
        let (mut storage, _temp) = sample_storage();
        {
            let notice = sample_notice(&storage, 1);
            assert_eq!(
                notice_file_name(&notice, ExportFormat::Csv),
                "notice_PA-001_2025-01.csv"
            );
        }

        let mut account = storage.accounts.get(AccountCode::new(1)).unwrap().clone();
        account.number = "PA/001 x".into();
        storage.accounts.upsert(account);
        let notice = sample_notice(&storage, 1);
        assert_eq!(
            notice_file_name(&notice, ExportFormat::Json),
            "notice_PA_001_x_2025-01.json"
        );
    }

    #[test]
    fn test_notice_file_name_keeps_non_ascii_numbers() {
        let (mut storage, _temp) = sample_storage();
        let mut first = storage.accounts.get(AccountCode::new(1)).unwrap().clone();
        first.number = "ЛС-001".into();
        storage.accounts.upsert(first);
        let mut second = storage.accounts.get(AccountCode::new(2)).unwrap().clone();
        second.number = "АБ-001".into();
        storage.accounts.upsert(second);

        let first = notice_file_name(&sample_notice(&storage, 1), ExportFormat::Csv);
        let second = notice_file_name(&sample_notice(&storage, 2), ExportFormat::Csv);
        assert_eq!(first, "notice_ЛС-001_2025-01.csv");
        assert_ne!(first, second);
    }

    #[test]
    fn test_write_notice_file() {
        let (storage, _temp) = sample_storage();
        let out_dir = TempDir::new().unwrap();
        let target = out_dir.path().join("nested");
        let notice = sample_notice(&storage, 2);

        let path = write_notice_file(&notice, ExportFormat::Csv, &options(), &target).unwrap();

        assert_eq!(path, target.join("notice_PA-002_2025-01.csv"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("TOTAL DUE"));
        assert!(content.contains("6982.00"));
    }

    #[test]
    fn test_render_each_format() {
        let (storage, _temp) = sample_storage();
        let notice = sample_notice(&storage, 1);

        for format in [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Yaml] {
            let mut out = Vec::new();
            render_notice(&notice, format, &options(), &mut out).unwrap();
            let text = String::from_utf8(out).unwrap();
            assert!(text.contains("PA-001"), "{} output missing account", format);
        }
    }
}
