//! Charge rule chain
//!
//! Turns a `(charge, service)` pair into the amount billed for it. A chain is
//! an ordered list of [`ChargeRule`]s; each rule either resolves a cost or
//! passes to the next one. The first rule that resolves wins.
//!
//! Guard rules (currently only [`ChargeRule::Validation`]) never produce a
//! cost. They are checked against the input before any cost rule runs, so a
//! guard placed after a terminal rule still rejects bad data.
//!
//! New behaviour is added through [`ChargeRule::Custom`] without touching the
//! existing variants:
//!
//! ```rust
//! use billing_notice::services::chain::{ChargeChain, ChargeRule, RuleOutcome};
//!
//! let mut chain = ChargeChain::default();
//! chain.insert(1, ChargeRule::Custom {
//!     name: "free-below-one-unit",
//!     rule: |charge, _service| {
//!         Ok(if charge.quantity < 1.0 { RuleOutcome::Resolved(0.0) } else { RuleOutcome::Pass })
//!     },
//! });
//! assert_eq!(chain.len(), 4);
//! ```

use log::debug;

use crate::error::{BillingError, BillingResult};
use crate::models::{Charge, Service};

/// Base cost at or above which the default discount applies
pub const DEFAULT_DISCOUNT_THRESHOLD: f64 = 5000.0;

/// Default discount percentage
pub const DEFAULT_DISCOUNT_PERCENT: f64 = 5.0;

/// Result of applying one rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleOutcome {
    /// Final cost for the charge; later rules are not consulted
    Resolved(f64),
    /// Defer to the next rule in the chain
    Pass,
}

/// Signature of a user-supplied rule
pub type RuleFn = fn(&Charge, &Service) -> BillingResult<RuleOutcome>;

/// One link of the charge rule chain
#[derive(Debug, Clone, Copy)]
pub enum ChargeRule {
    /// Rejects negative quantities and tariffs; never resolves
    Validation,

    /// `base * (1 - percent/100)` when `base >= threshold`, otherwise pass
    Discount { threshold: f64, percent: f64 },

    /// `base * (1 + percent/100)`, always resolves
    Penalty { percent: f64 },

    /// `tariff * quantity`, always resolves
    Standard,

    /// Named plain function
    Custom { name: &'static str, rule: RuleFn },
}

impl ChargeRule {
    /// Short name used in logs and listings
    pub fn name(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Discount { .. } => "discount",
            Self::Penalty { .. } => "penalty",
            Self::Standard => "standard",
            Self::Custom { name, .. } => *name,
        }
    }

    /// Guards check input and never produce a cost
    pub fn is_guard(&self) -> bool {
        matches!(self, Self::Validation)
    }

    /// Apply this rule to a single charge
    pub fn apply(&self, charge: &Charge, service: &Service) -> BillingResult<RuleOutcome> {
        match *self {
            Self::Validation => {
                if charge.quantity.is_nan() || charge.quantity < 0.0 {
                    return Err(BillingError::negative_quantity(charge.code));
                }
                if service.tariff.is_nan() || service.tariff < 0.0 {
                    return Err(BillingError::negative_tariff(service.code));
                }
                Ok(RuleOutcome::Pass)
            }
            Self::Discount { threshold, percent } => {
                let base = service.calculate_cost(charge.quantity);
                if base >= threshold {
                    Ok(RuleOutcome::Resolved(base * (1.0 - percent / 100.0)))
                } else {
                    Ok(RuleOutcome::Pass)
                }
            }
            Self::Penalty { percent } => {
                let base = service.calculate_cost(charge.quantity);
                Ok(RuleOutcome::Resolved(base * (1.0 + percent / 100.0)))
            }
            Self::Standard => Ok(RuleOutcome::Resolved(
                service.calculate_cost(charge.quantity),
            )),
            Self::Custom { rule, .. } => rule(charge, service),
        }
    }
}

impl PartialEq for ChargeRule {
    // custom rules compare by name; function addresses are not stable
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation, Self::Validation) | (Self::Standard, Self::Standard) => true,
            (
                Self::Discount {
                    threshold: t1,
                    percent: p1,
                },
                Self::Discount {
                    threshold: t2,
                    percent: p2,
                },
            ) => t1 == t2 && p1 == p2,
            (Self::Penalty { percent: p1 }, Self::Penalty { percent: p2 }) => p1 == p2,
            (Self::Custom { name: n1, .. }, Self::Custom { name: n2, .. }) => n1 == n2,
            _ => false,
        }
    }
}

/// Ordered sequence of charge rules
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeChain {
    rules: Vec<ChargeRule>,
}

impl ChargeChain {
    /// Create a chain from rules in evaluation order
    pub fn new(rules: Vec<ChargeRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ChargeRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Append a rule at the end of the chain
    pub fn push(&mut self, rule: ChargeRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Insert a rule at `index`; indexes past the end append
    pub fn insert(&mut self, index: usize, rule: ChargeRule) -> &mut Self {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule);
        self
    }

    /// Compute the cost of one charge
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when a guard rejects the charge or service
    /// - `Unresolved` when every rule passed
    pub fn evaluate(&self, charge: &Charge, service: &Service) -> BillingResult<f64> {
        for guard in self.rules.iter().filter(|r| r.is_guard()) {
            guard.apply(charge, service)?;
        }

        for rule in self.rules.iter().filter(|r| !r.is_guard()) {
            if let RuleOutcome::Resolved(cost) = rule.apply(charge, service)? {
                debug!(
                    "{} rule resolved charge {} to {:.2}",
                    rule.name(),
                    charge.code,
                    cost
                );
                return Ok(cost);
            }
        }

        Err(BillingError::Unresolved {
            charge: charge.code.to_string(),
        })
    }
}

impl Default for ChargeChain {
    /// Validation, then a 5% discount from 5000.00, then the plain tariff
    fn default() -> Self {
        Self::new(vec![
            ChargeRule::Validation,
            ChargeRule::Discount {
                threshold: DEFAULT_DISCOUNT_THRESHOLD,
                percent: DEFAULT_DISCOUNT_PERCENT,
            },
            ChargeRule::Standard,
        ])
    }
}
