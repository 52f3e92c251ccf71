//! Notice generation CLI commands
//!
//! Every generation attempt is recorded in the audit log.

use std::path::PathBuf;

use clap::Args;
use log::{info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::BillingPaths;
use crate::config::settings::Settings;
use crate::display::format_notice;
use crate::error::BillingResult;
use crate::export::{write_notice_file, ExportFormat, NoticeDocument, RenderOptions};
use crate::models::{AccountCode, BillingPeriod, PaymentNotice};
use crate::services::{ChargeProcessor, NoticeAttempt, NoticeService};
use crate::storage::{BillingStore, Storage};

/// Output selection shared by the generate commands
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Billing period (YYYY-MM, default: current month)
    #[arg(short, long)]
    pub period: Option<BillingPeriod>,

    /// Output format (default: from settings)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Output directory (default: the notices directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Resolved generation context
struct Generator<'s> {
    store: &'s Storage,
    notices: NoticeService<'s, Storage>,
    logger: AuditLogger,
    options: RenderOptions,
    format: ExportFormat,
    period: BillingPeriod,
    output_dir: PathBuf,
}

impl<'s> Generator<'s> {
    fn new(storage: &'s Storage, settings: &Settings, paths: &BillingPaths, args: OutputArgs) -> Self {
        let processor = ChargeProcessor::new(settings.charge_chain());
        Self {
            store: storage,
            notices: NoticeService::new(storage, processor),
            logger: AuditLogger::new(paths.audit_log()),
            options: RenderOptions::from_settings(settings),
            format: args.format.unwrap_or(settings.default_format),
            period: args.period.unwrap_or_default(),
            output_dir: args.output.unwrap_or_else(|| paths.output_dir()),
        }
    }

    /// Render a prepared notice and audit the attempt either way
    fn complete(
        &self,
        account: AccountCode,
        prepared: BillingResult<PaymentNotice<'s>>,
    ) -> BillingResult<(PathBuf, f64)> {
        let result = prepared.and_then(|notice| {
            let path = write_notice_file(&notice, self.format, &self.options, &self.output_dir)?;
            Ok((notice, path))
        });

        match result {
            Ok((notice, path)) => {
                info!("Wrote {} ({:.2})", path.display(), notice.total_amount);
                self.record(&AuditEntry::generated(&notice, &path));
                Ok((path, notice.total_amount))
            }
            Err(err) => {
                let number = self.store.account(account).map(|a| a.number.clone());
                self.record(&AuditEntry::failed(account, number, self.period, &err));
                Err(err)
            }
        }
    }

    fn record(&self, entry: &AuditEntry) {
        if let Err(e) = self.logger.log(entry) {
            warn!("Failed to write audit entry: {}", e);
        }
    }
}

/// Generate one account's notice
pub fn handle_generate_command(
    storage: &Storage,
    settings: &Settings,
    paths: &BillingPaths,
    account: AccountCode,
    args: OutputArgs,
) -> BillingResult<()> {
    let generator = Generator::new(storage, settings, paths, args);
    let prepared = generator.notices.prepare_notice(account, generator.period);
    let (path, total) = generator.complete(account, prepared)?;

    println!("Generated notice: {}", path.display());
    println!("  Amount due: {:.2} {}", total, generator.options.currency);

    Ok(())
}

/// Generate a notice for every account
///
/// A failure on one account is reported and the rest are still generated.
pub fn handle_generate_all_command(
    storage: &Storage,
    settings: &Settings,
    paths: &BillingPaths,
    args: OutputArgs,
) -> BillingResult<()> {
    let generator = Generator::new(storage, settings, paths, args);
    let attempts = generator.notices.prepare_all(generator.period);

    if attempts.is_empty() {
        println!("No accounts found.");
        return Ok(());
    }

    let mut generated = 0;
    let mut failed = 0;
    for NoticeAttempt { account, result } in attempts {
        match generator.complete(account, result) {
            Ok((path, total)) => {
                generated += 1;
                println!("  OK     {}  {:>12.2}  {}", account, total, path.display());
            }
            Err(e) => {
                failed += 1;
                println!("  FAILED {}  {}", account, e);
            }
        }
    }

    println!();
    println!(
        "Generated {} notice(s) for {}, {} failed",
        generated, generator.period, failed
    );

    Ok(())
}

/// Print a processed notice without writing a file
pub fn handle_show_command(
    storage: &Storage,
    settings: &Settings,
    account: AccountCode,
    period: Option<BillingPeriod>,
) -> BillingResult<()> {
    let notices = NoticeService::new(storage, ChargeProcessor::new(settings.charge_chain()));
    let notice = notices.prepare_notice(account, period.unwrap_or_default())?;

    let document = NoticeDocument::from_notice(&notice, &RenderOptions::from_settings(settings));
    print!("{}", format_notice(&document));

    Ok(())
}

/// Print the most recent audit entries
pub fn handle_audit_command(paths: &BillingPaths, limit: usize) -> BillingResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No notices generated yet.");
        return Ok(());
    }

    for entry in entries {
        println!(
            "{}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.summary()
        );
    }

    Ok(())
}
