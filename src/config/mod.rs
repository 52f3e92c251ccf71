//! Configuration module for billing-notice
//!
//! This module provides configuration management including:
//! - Base directory resolution
//! - User settings persistence
//! - Charge rule chain composition

pub mod paths;
pub mod settings;

pub use paths::BillingPaths;
pub use settings::{RuleConfig, Settings};
