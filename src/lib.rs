//! billing-notice - utility-billing payment notice generator
//!
//! Builds per-account, per-period payment notices from stored streets,
//! services, personal accounts and charges. Each charge is priced by an
//! ordered rule chain (validation, discount, penalty, standard tariff) and
//! the notice total is the sum of the resulting costs.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (streets, services, accounts, charges, notices)
//! - `storage`: JSON file storage layer
//! - `services`: Rule chain, charge processing and notice assembly
//! - `audit`: Audit log of notice generation
//! - `export`: CSV, JSON and YAML notice rendering
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `notice` binary
//!
//! # Example
//!
//! ```no_run
//! use billing_notice::config::{paths::BillingPaths, settings::Settings};
//! use billing_notice::models::{AccountCode, BillingPeriod};
//! use billing_notice::services::{ChargeProcessor, NoticeService};
//! use billing_notice::storage::Storage;
//!
//! fn main() -> billing_notice::BillingResult<()> {
//!     let paths = BillingPaths::new()?;
//!     let settings = Settings::load_or_create(&paths)?;
//!     let storage = Storage::open(paths)?;
//!
//!     let processor = ChargeProcessor::new(settings.charge_chain());
//!     let notices = NoticeService::new(&storage, processor);
//!     let notice = notices.prepare_notice(AccountCode::new(1), BillingPeriod::current())?;
//!     println!("{}", notice);
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BillingError, BillingResult};
