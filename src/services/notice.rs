//! Notice service
//!
//! Resolves an account, its street and its charges from a [`BillingStore`],
//! then runs the charge processor to produce a payable notice.

use log::warn;

use crate::error::{BillingError, BillingResult};
use crate::models::{AccountCode, BillingPeriod, PaymentNotice};
use crate::storage::BillingStore;

use super::processor::ChargeProcessor;

/// Outcome of preparing one account's notice in a batch
#[derive(Debug)]
pub struct NoticeAttempt<'s> {
    pub account: AccountCode,
    pub result: BillingResult<PaymentNotice<'s>>,
}

/// Service building and processing payment notices
pub struct NoticeService<'s, S: BillingStore + ?Sized> {
    store: &'s S,
    processor: ChargeProcessor,
}

impl<'s, S: BillingStore + ?Sized> NoticeService<'s, S> {
    pub fn new(store: &'s S, processor: ChargeProcessor) -> Self {
        Self { store, processor }
    }

    /// Build an unprocessed notice (`total_amount == 0.0`)
    ///
    /// Charges whose service is unknown are skipped.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the account or its street does not exist
    /// - `EmptyResult` if no charge could be paired with a service
    pub fn build_notice(
        &self,
        account_code: AccountCode,
        period: BillingPeriod,
    ) -> BillingResult<PaymentNotice<'s>> {
        let store = self.store;

        let account = store
            .account(account_code)
            .ok_or_else(|| BillingError::account_not_found(account_code.to_string()))?;

        let street = store
            .street(account.street)
            .ok_or_else(|| BillingError::street_not_found(account.street.to_string()))?;

        let mut pairs = Vec::new();
        for charge in store.charges_for_account(account_code) {
            match store.service(charge.service) {
                Some(service) => pairs.push((charge, service)),
                None => warn!(
                    "Skipping charge {}: service {} not found",
                    charge.code, charge.service
                ),
            }
        }

        if pairs.is_empty() {
            return Err(BillingError::EmptyResult(format!(
                "account {} has no billable charges",
                account_code
            )));
        }

        Ok(PaymentNotice::new(account, street, pairs, period))
    }

    /// Build a notice and compute its total
    pub fn prepare_notice(
        &self,
        account_code: AccountCode,
        period: BillingPeriod,
    ) -> BillingResult<PaymentNotice<'s>> {
        let notice = self.build_notice(account_code, period)?;
        self.processor.process_notice(notice)
    }

    /// Prepare a notice for every stored account
    ///
    /// Each account is attempted on its own; a failure is reported in its
    /// attempt and does not stop the others.
    pub fn prepare_all(&self, period: BillingPeriod) -> Vec<NoticeAttempt<'s>> {
        self.store
            .account_codes()
            .into_iter()
            .map(|account| NoticeAttempt {
                account,
                result: self.prepare_notice(account, period),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BillingPaths;
    use crate::models::{Charge, ChargeCode, PersonalAccount, ServiceCode, StreetCode};
    use crate::storage::init::seed_sample_data;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BillingPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        seed_sample_data(&mut storage);
        (temp_dir, storage)
    }

    fn period() -> BillingPeriod {
        BillingPeriod::new(2025, 1).unwrap()
    }

    #[test]
    fn test_build_notice() {
        let (_temp, storage) = create_test_storage();
        let service = NoticeService::new(&storage, ChargeProcessor::default());

        let notice = service.build_notice(AccountCode::new(1), period()).unwrap();
        assert_eq!(notice.account.number, "PA-001");
        assert_eq!(notice.street.name, "Lenina");
        assert_eq!(notice.charges.len(), 3);
        assert_eq!(notice.total_amount, 0.0);
        assert_eq!(notice.period, period());
    }

    #[test]
    fn test_prepare_sample_account_one() {
        let (_temp, storage) = create_test_storage();
        let service = NoticeService::new(&storage, ChargeProcessor::default());

        let notice = service.prepare_notice(AccountCode::new(1), period()).unwrap();
        let expected = 0.0 + 45.50 * 15.5 + 180.30 * 12.3 + 4.65 * 350.0;
        assert_eq!(notice.total_amount, expected);
    }

    #[test]
    fn test_prepare_sample_account_two_gets_discount() {
        let (_temp, storage) = create_test_storage();
        let service = NoticeService::new(&storage, ChargeProcessor::default());

        // heating line: 2.5 * 2200.00 = 5500.00, discounted to 5225.00
        let notice = service.prepare_notice(AccountCode::new(2), period()).unwrap();
        assert!((notice.total_amount - (455.0 + 1302.0 + 5225.0)).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_account() {
        let (_temp, storage) = create_test_storage();
        let service = NoticeService::new(&storage, ChargeProcessor::default());

        let err = service.build_notice(AccountCode::new(99), period()).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().starts_with("Account not found"));
    }

    #[test]
    fn test_unknown_street() {
        let (_temp, mut storage) = create_test_storage();
        storage.streets.delete(StreetCode::new(1));
        let service = NoticeService::new(&storage, ChargeProcessor::default());

        let err = service.build_notice(AccountCode::new(1), period()).unwrap_err();
        assert!(matches!(err, BillingError::NotFound { entity_type: "Street", .. }));
    }

    #[test]
    fn test_account_without_charges() {
        let (_temp, mut storage) = create_test_storage();
        storage.accounts.upsert(PersonalAccount::new(
            AccountCode::new(4),
            "PA-004",
            StreetCode::new(1),
            "1",
            "1",
            "Empty Account",
        ));
        let service = NoticeService::new(&storage, ChargeProcessor::default());

        let err = service.build_notice(AccountCode::new(4), period()).unwrap_err();
        assert!(err.is_empty_result());
    }

    #[test]
    fn test_charges_with_unknown_service_skipped() {
        let (_temp, mut storage) = create_test_storage();
        storage.charges.upsert(Charge::new(
            ChargeCode::new(11),
            AccountCode::new(1),
            ServiceCode::new(42),
            1.0,
        ));
        let service = NoticeService::new(&storage, ChargeProcessor::default());

        let notice = service.build_notice(AccountCode::new(1), period()).unwrap();
        assert_eq!(notice.charges.len(), 3);
    }

    #[test]
    fn test_only_unknown_services_is_empty_result() {
        let (_temp, mut storage) = create_test_storage();
        for code in [1, 2, 3] {
            storage.services.delete(ServiceCode::new(code));
        }
        let service = NoticeService::new(&storage, ChargeProcessor::default());

        let err = service.build_notice(AccountCode::new(1), period()).unwrap_err();
        assert!(err.is_empty_result());
    }

    #[test]
    fn test_prepare_all_isolates_failures() {
        let (_temp, mut storage) = create_test_storage();
        // break account 2 only
        storage.charges.upsert(Charge::new(
            ChargeCode::new(5),
            AccountCode::new(2),
            ServiceCode::new(3),
            -280.0,
        ));
        let service = NoticeService::new(&storage, ChargeProcessor::default());

        let attempts = service.prepare_all(period());
        assert_eq!(attempts.len(), 3);
        assert!(attempts[0].result.is_ok());
        assert!(attempts[1]
            .result
            .as_ref()
            .unwrap_err()
            .is_invalid_input());
        assert_eq!(attempts[2].account, AccountCode::new(3));
        assert!(attempts[2].result.is_ok());
    }
}
