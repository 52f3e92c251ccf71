//! Payment notice model
//!
//! A notice is transient: it borrows the account, street, charges and
//! services from the store for the duration of one (account, period) request.
//! `total_amount` is zero until the charge processor has run over it.

use std::fmt;

use super::account::PersonalAccount;
use super::charge::Charge;
use super::period::BillingPeriod;
use super::service::Service;
use super::street::Street;

/// A per-account, per-period payment notice
#[derive(Debug, Clone)]
pub struct PaymentNotice<'a> {
    pub account: &'a PersonalAccount,
    pub street: &'a Street,

    /// Charges paired with their resolved services, in charge order
    pub charges: Vec<(&'a Charge, &'a Service)>,

    pub period: BillingPeriod,

    /// Final amount due; overwritten by each processing run
    pub total_amount: f64,
}

impl<'a> PaymentNotice<'a> {
    /// Create an unprocessed notice
    pub fn new(
        account: &'a PersonalAccount,
        street: &'a Street,
        charges: Vec<(&'a Charge, &'a Service)>,
        period: BillingPeriod,
    ) -> Self {
        Self {
            account,
            street,
            charges,
            period,
            total_amount: 0.0,
        }
    }

    /// Account address with the resolved street
    pub fn address(&self) -> String {
        self.account.address(Some(self.street))
    }

    /// Sum of undiscounted `tariff * quantity` over all charges
    pub fn base_amount(&self) -> f64 {
        self.charges
            .iter()
            .map(|(charge, service)| service.calculate_cost(charge.quantity))
            .sum()
    }
}

impl fmt::Display for PaymentNotice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Payment notice for {}, period {}, amount due: {:.2}",
            self.account.number, self.period, self.total_amount
        )
    }
}
