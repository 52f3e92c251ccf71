//! Service model
//!
//! A billable offering (water, electricity, heating...) with a per-unit tariff.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::codes::ServiceCode;

/// A tariffed utility service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub code: ServiceCode,

    /// Display name (e.g., "Cold water")
    pub name: String,

    /// Price per unit consumed. Negative tariffs are representable and are
    /// rejected when a charge is processed, not here.
    pub tariff: f64,
}

impl Service {
    pub fn new(code: ServiceCode, name: impl Into<String>, tariff: f64) -> Self {
        Self {
            code,
            name: name.into(),
            tariff,
        }
    }

    /// Base cost of `quantity` units at this service's tariff
    pub fn calculate_cost(&self, quantity: f64) -> f64 {
        self.tariff * quantity
    }

    /// Validate the service
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Service name cannot be empty".into());
        }
        if !self.tariff.is_finite() {
            return Err(format!("Service tariff must be a number, got {}", self.tariff));
        }
        Ok(())
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (tariff: {:.2})", self.name, self.tariff)
    }
}
