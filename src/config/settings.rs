//! User settings for billing-notice
//!
//! Holds display preferences and the composition of the charge rule chain.
//! Missing fields fall back to defaults, so an empty `config.json` yields the
//! standard chain: validation, 5% discount from 5000.00, standard tariff.

use serde::{Deserialize, Serialize};

use super::paths::BillingPaths;
use crate::error::BillingError;
use crate::export::ExportFormat;
use crate::services::chain::{
    ChargeChain, ChargeRule, DEFAULT_DISCOUNT_PERCENT, DEFAULT_DISCOUNT_THRESHOLD,
};

/// One configured link of the charge rule chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RuleConfig {
    /// Reject negative quantities and tariffs
    Validation,
    /// Percentage discount for charges at or above a threshold
    Discount { threshold: f64, percent: f64 },
    /// Percentage surcharge on every charge
    Penalty { percent: f64 },
    /// Plain tariff * quantity
    Standard,
}

impl RuleConfig {
    fn validate(&self) -> Result<(), String> {
        match self {
            Self::Discount { threshold, percent } => {
                if !threshold.is_finite() || *threshold < 0.0 {
                    return Err(format!("discount threshold must be >= 0, got {}", threshold));
                }
                check_percent("discount", *percent)
            }
            Self::Penalty { percent } => check_percent("penalty", *percent),
            Self::Validation | Self::Standard => Ok(()),
        }
    }
}

fn check_percent(rule: &str, percent: f64) -> Result<(), String> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(format!("{} percent must be within 0-100, got {}", rule, percent));
    }
    Ok(())
}

impl From<&RuleConfig> for ChargeRule {
    fn from(config: &RuleConfig) -> Self {
        match *config {
            RuleConfig::Validation => ChargeRule::Validation,
            RuleConfig::Discount { threshold, percent } => {
                ChargeRule::Discount { threshold, percent }
            }
            RuleConfig::Penalty { percent } => ChargeRule::Penalty { percent },
            RuleConfig::Standard => ChargeRule::Standard,
        }
    }
}

/// User settings for billing-notice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency label printed next to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for the notice generation date (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Output format used when none is given on the command line
    #[serde(default)]
    pub default_format: ExportFormat,

    /// Charge rule chain, evaluated in order
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleConfig>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "RUB".to_string()
}

fn default_date_format() -> String {
    "%d.%m.%Y".to_string()
}

fn default_rules() -> Vec<RuleConfig> {
    vec![
        RuleConfig::Validation,
        RuleConfig::Discount {
            threshold: DEFAULT_DISCOUNT_THRESHOLD,
            percent: DEFAULT_DISCOUNT_PERCENT,
        },
        RuleConfig::Standard,
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_format: ExportFormat::default(),
            rules: default_rules(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BillingPaths) -> Result<Self, BillingError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BillingError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BillingError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BillingPaths) -> Result<(), BillingError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BillingError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BillingError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check the configured rules
    pub fn validate(&self) -> Result<(), BillingError> {
        if self.rules.is_empty() {
            return Err(BillingError::Config("rule chain cannot be empty".into()));
        }
        for rule in &self.rules {
            rule.validate().map_err(BillingError::Config)?;
        }
        Ok(())
    }

    /// Build the charge rule chain described by these settings
    pub fn charge_chain(&self) -> ChargeChain {
        ChargeChain::new(self.rules.iter().map(ChargeRule::from).collect())
    }
}
