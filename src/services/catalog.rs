//! Catalog service
//!
//! Business rules for maintaining the store: field validation, unique codes
//! and referential checks (an account's street and a charge's account and
//! service must exist). Tariff and quantity signs are not checked here; the
//! charge rule chain rejects negative values when a notice is processed.

use crate::error::{BillingError, BillingResult};
use crate::models::{
    AccountCode, Charge, ChargeCode, PersonalAccount, Service, ServiceCode, Street, StreetCode,
};
use crate::storage::Storage;

/// New account fields, everything except the code
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub number: String,
    pub street: StreetCode,
    pub house: String,
    pub building: Option<String>,
    pub apartment: String,
    pub full_name: String,
}

/// Service for adding entities to the store
pub struct CatalogService<'a> {
    storage: &'a mut Storage,
}

impl<'a> CatalogService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Add a street; `code` defaults to the next free code
    pub fn add_street(&mut self, code: Option<StreetCode>, name: &str) -> BillingResult<Street> {
        let code = code.unwrap_or_else(|| self.storage.streets.next_code());
        let street = Street::new(code, name.trim());
        street.validate().map_err(BillingError::Validation)?;

        self.storage.streets.insert(street.clone())?;
        self.storage.streets.save()?;
        Ok(street)
    }

    /// Add a service; `code` defaults to the next free code
    pub fn add_service(
        &mut self,
        code: Option<ServiceCode>,
        name: &str,
        tariff: f64,
    ) -> BillingResult<Service> {
        let code = code.unwrap_or_else(|| self.storage.services.next_code());
        let service = Service::new(code, name.trim(), tariff);
        service.validate().map_err(BillingError::Validation)?;

        self.storage.services.insert(service.clone())?;
        self.storage.services.save()?;
        Ok(service)
    }

    /// Add an account; the street must exist and the number must be unique
    pub fn add_account(
        &mut self,
        code: Option<AccountCode>,
        fields: NewAccount,
    ) -> BillingResult<PersonalAccount> {
        if !self.storage.streets.exists(fields.street) {
            return Err(BillingError::street_not_found(fields.street.to_string()));
        }

        let number = fields.number.trim();
        if self.storage.accounts.iter().any(|a| a.number == number) {
            return Err(BillingError::Duplicate {
                entity_type: "Account",
                identifier: number.to_string(),
            });
        }

        let code = code.unwrap_or_else(|| self.storage.accounts.next_code());
        let mut account = PersonalAccount::new(
            code,
            number,
            fields.street,
            fields.house.trim(),
            fields.apartment.trim(),
            fields.full_name.trim(),
        );
        if let Some(building) = fields.building.filter(|b| !b.trim().is_empty()) {
            account = account.with_building(building.trim());
        }

        account
            .validate()
            .map_err(|e| BillingError::Validation(e.to_string()))?;

        self.storage.accounts.insert(account.clone())?;
        self.storage.accounts.save()?;
        Ok(account)
    }

    /// Record a charge against an existing account and service
    pub fn add_charge(
        &mut self,
        code: Option<ChargeCode>,
        account: AccountCode,
        service: ServiceCode,
        quantity: f64,
    ) -> BillingResult<Charge> {
        if !self.storage.accounts.exists(account) {
            return Err(BillingError::account_not_found(account.to_string()));
        }
        if !self.storage.services.exists(service) {
            return Err(BillingError::service_not_found(service.to_string()));
        }
        if !quantity.is_finite() {
            return Err(BillingError::Validation(format!(
                "Charge quantity must be a number, got {}",
                quantity
            )));
        }

        let code = code.unwrap_or_else(|| self.storage.charges.next_code());
        let charge = Charge::new(code, account, service, quantity);

        self.storage.charges.insert(charge.clone())?;
        self.storage.charges.save()?;
        Ok(charge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BillingPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BillingPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn new_account(street: StreetCode) -> NewAccount {
        NewAccount {
            number: "PA-100".into(),
            street,
            house: "7".into(),
            building: Some(" ".into()),
            apartment: "3".into(),
            full_name: "Test Holder".into(),
        }
    }

    #[test]
    fn test_add_street_assigns_codes() {
        let (_temp, mut storage) = create_test_storage();
        let mut catalog = CatalogService::new(&mut storage);

        let first = catalog.add_street(None, "Lenina").unwrap();
        let second = catalog.add_street(None, " Pushkina ").unwrap();
        assert_eq!(first.code, StreetCode::new(1));
        assert_eq!(second.code, StreetCode::new(2));
        assert_eq!(second.name, "Pushkina");

        assert!(storage.paths().streets_file().exists());
    }

    #[test]
    fn test_add_street_duplicate_code() {
        let (_temp, mut storage) = create_test_storage();
        let mut catalog = CatalogService::new(&mut storage);

        catalog.add_street(Some(StreetCode::new(5)), "Lenina").unwrap();
        let err = catalog
            .add_street(Some(StreetCode::new(5)), "Gagarina")
            .unwrap_err();
        assert!(matches!(err, BillingError::Duplicate { .. }));
    }

    #[test]
    fn test_add_service_validation() {
        let (_temp, mut storage) = create_test_storage();
        let mut catalog = CatalogService::new(&mut storage);

        assert!(matches!(
            catalog.add_service(None, "  ", 1.0),
            Err(BillingError::Validation(_))
        ));
        let service = catalog.add_service(None, "Gas", 6.40).unwrap();
        assert_eq!(service.code, ServiceCode::new(1));
    }

    #[test]
    fn test_add_account_requires_street() {
        let (_temp, mut storage) = create_test_storage();
        let mut catalog = CatalogService::new(&mut storage);

        let err = catalog
            .add_account(None, new_account(StreetCode::new(1)))
            .unwrap_err();
        assert!(err.is_not_found());

        let street = catalog.add_street(None, "Lenina").unwrap();
        let account = catalog.add_account(None, new_account(street.code)).unwrap();
        assert_eq!(account.number, "PA-100");
        assert_eq!(account.building, None);
    }

    #[test]
    fn test_add_account_unique_number() {
        let (_temp, mut storage) = create_test_storage();
        let mut catalog = CatalogService::new(&mut storage);
        let street = catalog.add_street(None, "Lenina").unwrap();

        catalog.add_account(None, new_account(street.code)).unwrap();
        let err = catalog
            .add_account(None, new_account(street.code))
            .unwrap_err();
        assert!(matches!(err, BillingError::Duplicate { entity_type: "Account", .. }));
    }

    #[test]
    fn test_add_charge_checks_references() {
        let (_temp, mut storage) = create_test_storage();
        let mut catalog = CatalogService::new(&mut storage);
        let street = catalog.add_street(None, "Lenina").unwrap();
        let account = catalog.add_account(None, new_account(street.code)).unwrap();

        let err = catalog
            .add_charge(None, account.code, ServiceCode::new(1), 1.0)
            .unwrap_err();
        assert!(matches!(err, BillingError::NotFound { entity_type: "Service", .. }));

        let service = catalog.add_service(None, "Gas", 6.40).unwrap();
        let charge = catalog
            .add_charge(None, account.code, service.code, 25.0)
            .unwrap();
        assert_eq!(charge.code, ChargeCode::new(1));

        // negative quantities are stored and rejected later by the rule chain
        assert!(catalog
            .add_charge(None, account.code, service.code, -1.0)
            .is_ok());
    }
}
