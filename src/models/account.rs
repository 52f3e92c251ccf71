//! Personal account model
//!
//! A billed household: the account number printed on notices, the holder and
//! the address the account is registered at.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::codes::{AccountCode, StreetCode};
use super::street::Street;

/// A personal (household) account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalAccount {
    /// Internal key
    pub code: AccountCode,

    /// External-facing account number (e.g., "PA-001"), used on notices and
    /// in output file names
    pub number: String,

    /// Street the address belongs to
    pub street: StreetCode,

    pub house: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,

    pub apartment: String,

    /// Account holder's full name
    pub full_name: String,
}

impl PersonalAccount {
    /// Create a new account without a building
    pub fn new(
        code: AccountCode,
        number: impl Into<String>,
        street: StreetCode,
        house: impl Into<String>,
        apartment: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            code,
            number: number.into(),
            street,
            house: house.into(),
            building: None,
            apartment: apartment.into(),
            full_name: full_name.into(),
        }
    }

    /// Set the building
    pub fn with_building(mut self, building: impl Into<String>) -> Self {
        self.building = Some(building.into());
        self
    }

    /// Postal address of the account
    ///
    /// Falls back to `Street #<code>` when the street could not be resolved.
    pub fn address(&self, street: Option<&Street>) -> String {
        let street_name = match street {
            Some(street) => street.name.clone(),
            None => format!("Street #{}", self.street.value()),
        };
        let building = match &self.building {
            Some(b) if !b.is_empty() => format!(", bldg. {}", b),
            _ => String::new(),
        };
        format!(
            "{}, h. {}{}, apt. {}",
            street_name, self.house, building, self.apartment
        )
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.number.trim().is_empty() {
            return Err(AccountValidationError::EmptyNumber);
        }

        if self.full_name.trim().is_empty() {
            return Err(AccountValidationError::EmptyHolder);
        }

        if self.house.trim().is_empty() {
            return Err(AccountValidationError::EmptyHouse);
        }

        Ok(())
    }
}

impl fmt::Display for PersonalAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number, self.full_name)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyNumber,
    EmptyHolder,
    EmptyHouse,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNumber => write!(f, "Account number cannot be empty"),
            Self::EmptyHolder => write!(f, "Account holder name cannot be empty"),
            Self::EmptyHouse => write!(f, "House number cannot be empty"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PersonalAccount {
        PersonalAccount::new(
            AccountCode::new(1),
            "PA-001",
            StreetCode::new(1),
            "10",
            "15",
            "Ivanov Ivan",
        )
    }

    #[test]
    fn test_address_with_street() {
        let street = Street::new(StreetCode::new(1), "Lenina");
        let account = sample().with_building("A");
        assert_eq!(
            account.address(Some(&street)),
            "Lenina, h. 10, bldg. A, apt. 15"
        );
    }

    #[test]
    fn test_address_without_building_or_street() {
        let account = sample();
        assert_eq!(account.address(None), "Street #1, h. 10, apt. 15");
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());

        let mut account = sample();
        account.number = " ".into();
        assert_eq!(account.validate(), Err(AccountValidationError::EmptyNumber));

        let mut account = sample();
        account.full_name.clear();
        assert_eq!(account.validate(), Err(AccountValidationError::EmptyHolder));
    }

    #[test]
    fn test_serialization_skips_missing_building() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(!json.contains("building"));
        let back: PersonalAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
