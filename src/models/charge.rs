//! Charge model
//!
//! A billable record: how much of a service an account consumed.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::codes::{AccountCode, ChargeCode, ServiceCode};

/// A per-account charge for one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub code: ChargeCode,
    pub account: AccountCode,
    pub service: ServiceCode,

    /// Units consumed. Negative quantities are rejected by the validation
    /// rule when the charge is processed.
    pub quantity: f64,
}

impl Charge {
    pub fn new(
        code: ChargeCode,
        account: AccountCode,
        service: ServiceCode,
        quantity: f64,
    ) -> Self {
        Self {
            code,
            account,
            service,
            quantity,
        }
    }
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Charge {}: account {}, service {}, quantity {}",
            self.code, self.account, self.service, self.quantity
        )
    }
}
