//! Charge processor
//!
//! Runs the rule chain over every charge of a notice and records the total.

use crate::error::BillingResult;
use crate::models::{Charge, PaymentNotice, Service};

use super::chain::ChargeChain;

/// Applies a [`ChargeChain`] to charges and whole notices
#[derive(Debug, Clone, Default)]
pub struct ChargeProcessor {
    chain: ChargeChain,
}

impl ChargeProcessor {
    /// Create a processor around a chain
    pub fn new(chain: ChargeChain) -> Self {
        Self { chain }
    }

    /// Cost of a single charge
    pub fn process_charge(&self, charge: &Charge, service: &Service) -> BillingResult<f64> {
        self.chain.evaluate(charge, service)
    }

    /// Compute the notice total
    ///
    /// Costs are summed in charge order. The notice is consumed on failure so a
    /// partially totalled notice can never reach the caller. Processing the
    /// returned notice again recomputes the total from scratch.
    pub fn process_notice<'a>(
        &self,
        mut notice: PaymentNotice<'a>,
    ) -> BillingResult<PaymentNotice<'a>> {
        let mut total_amount = 0.0;
        for (charge, service) in &notice.charges {
            total_amount += self.process_charge(charge, service)?;
        }

        notice.total_amount = total_amount;
        Ok(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AccountCode, BillingPeriod, ChargeCode, PersonalAccount, ServiceCode, Street, StreetCode,
    };
    use crate::services::chain::ChargeRule;

    struct Fixture {
        street: Street,
        account: PersonalAccount,
        services: Vec<Service>,
        charges: Vec<Charge>,
    }

    impl Fixture {
        /// Account #1 of the sample data set
        fn sample() -> Self {
            let street = Street::new(StreetCode::new(1), "Lenina");
            let account = PersonalAccount::new(
                AccountCode::new(1),
                "PA-001",
                street.code,
                "10",
                "15",
                "Ivanov Ivan Ivanovich",
            );
            let services = vec![
                Service::new(ServiceCode::new(1), "Cold water", 45.50),
                Service::new(ServiceCode::new(2), "Hot water", 180.30),
                Service::new(ServiceCode::new(3), "Electricity", 4.65),
            ];
            let charges = vec![
                Charge::new(ChargeCode::new(1), account.code, ServiceCode::new(1), 15.5),
                Charge::new(ChargeCode::new(2), account.code, ServiceCode::new(2), 12.3),
                Charge::new(ChargeCode::new(3), account.code, ServiceCode::new(3), 350.0),
            ];
            Self {
                street,
                account,
                services,
                charges,
            }
        }

        fn notice(&self) -> PaymentNotice<'_> {
            let pairs = self.charges.iter().zip(self.services.iter()).collect();
            PaymentNotice::new(
                &self.account,
                &self.street,
                pairs,
                BillingPeriod::new(2025, 1).unwrap(),
            )
        }
    }

    #[test]
    fn test_sample_account_total() {
        let fixture = Fixture::sample();
        let notice = ChargeProcessor::default()
            .process_notice(fixture.notice())
            .unwrap();

        // no line reaches the discount threshold
        let expected = 0.0 + 45.50 * 15.5 + 180.30 * 12.3 + 4.65 * 350.0;
        assert_eq!(notice.total_amount, expected);
        assert!((notice.total_amount - 4550.44).abs() < 1e-6);
    }

    #[test]
    fn test_charges_preserved() {
        let fixture = Fixture::sample();
        let notice = ChargeProcessor::default()
            .process_notice(fixture.notice())
            .unwrap();

        assert_eq!(notice.charges.len(), 3);
        assert_eq!(notice.charges[0].0.code, ChargeCode::new(1));
        assert_eq!(notice.charges[2].1.name, "Electricity");
        assert_eq!(fixture.charges[1].quantity, 12.3);
    }

    #[test]
    fn test_reprocessing_overwrites_total() {
        let fixture = Fixture::sample();
        let processor = ChargeProcessor::default();

        let once = processor.process_notice(fixture.notice()).unwrap();
        let first_total = once.total_amount;
        let twice = processor.process_notice(once).unwrap();

        assert_eq!(twice.total_amount, first_total);
    }

    #[test]
    fn test_failure_aborts_whole_notice() {
        let mut fixture = Fixture::sample();
        fixture.charges[2].quantity = -1.0;

        let err = ChargeProcessor::default()
            .process_notice(fixture.notice())
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("chg-3"));
    }

    #[test]
    fn test_custom_chain() {
        let fixture = Fixture::sample();
        let processor = ChargeProcessor::new(ChargeChain::new(vec![
            ChargeRule::Validation,
            ChargeRule::Penalty { percent: 10.0 },
        ]));

        let notice = processor.process_notice(fixture.notice()).unwrap();
        let base = fixture.notice().base_amount();
        assert!((notice.total_amount - base * 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_process_charge_uses_chain() {
        let fixture = Fixture::sample();
        let processor = ChargeProcessor::default();
        let cost = processor
            .process_charge(&fixture.charges[0], &fixture.services[0])
            .unwrap();
        assert_eq!(cost, 705.25);
    }
}
