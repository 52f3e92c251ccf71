//! Core data models for billing-notice
//!
//! This module contains the plain data records of the billing domain:
//! streets, services, personal accounts, charges, billing periods and the
//! payment notice assembled from them.

pub mod account;
pub mod charge;
pub mod codes;
pub mod notice;
pub mod period;
pub mod service;
pub mod street;

pub use account::{AccountValidationError, PersonalAccount};
pub use charge::Charge;
pub use codes::{AccountCode, ChargeCode, ServiceCode, StreetCode};
pub use notice::PaymentNotice;
pub use period::{BillingPeriod, PeriodParseError};
pub use service::Service;
pub use street::Street;
