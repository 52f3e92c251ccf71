//! Lookup interface the notice builder reads from

use crate::models::{AccountCode, Charge, PersonalAccount, Service, ServiceCode, Street, StreetCode};

/// Read-only, side-effect-free entity lookups
///
/// Returned references borrow from the store, so notices built from it live
/// no longer than the store itself.
pub trait BillingStore {
    fn account(&self, code: AccountCode) -> Option<&PersonalAccount>;

    fn street(&self, code: StreetCode) -> Option<&Street>;

    fn service(&self, code: ServiceCode) -> Option<&Service>;

    /// All charges recorded for an account, ordered by charge code
    fn charges_for_account(&self, code: AccountCode) -> Vec<&Charge>;

    /// Codes of every stored account, ascending
    fn account_codes(&self) -> Vec<AccountCode>;
}
