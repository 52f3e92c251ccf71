//! Service layer for billing-notice
//!
//! The service layer provides business logic on top of the storage layer:
//! the charge rule chain, notice processing and store maintenance.

pub mod catalog;
pub mod chain;
pub mod notice;
pub mod processor;

pub use catalog::{CatalogService, NewAccount};
pub use chain::{ChargeChain, ChargeRule, RuleFn, RuleOutcome};
pub use notice::{NoticeAttempt, NoticeService};
pub use processor::ChargeProcessor;
