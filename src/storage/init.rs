//! Storage initialization
//!
//! Handles first-run setup and the optional sample data set.

use crate::config::paths::BillingPaths;
use crate::error::BillingError;
use crate::models::{
    AccountCode, Charge, ChargeCode, PersonalAccount, Service, ServiceCode, Street, StreetCode,
};

use super::Storage;

/// Initialize storage for a fresh installation
///
/// Creates the directory layout. With `with_sample_data`, seeds three streets,
/// five services, three accounts and ten charges, unless accounts already
/// exist.
pub fn initialize_storage(paths: &BillingPaths, with_sample_data: bool) -> Result<(), BillingError> {
    paths.ensure_directories()?;

    if with_sample_data {
        let mut storage = Storage::open(paths.clone())?;
        if storage.accounts.count() == 0 {
            seed_sample_data(&mut storage);
            storage.save_all()?;
        }
    }

    Ok(())
}

/// Fill storage with the sample data set
pub fn seed_sample_data(storage: &mut Storage) {
    for (code, name) in [(1, "Lenina"), (2, "Pushkina"), (3, "Gagarina")] {
        storage.streets.upsert(Street::new(StreetCode::new(code), name));
    }

    for (code, name, tariff) in [
        (1, "Cold water", 45.50),
        (2, "Hot water", 180.30),
        (3, "Electricity", 4.65),
        (4, "Heating", 2200.00),
        (5, "Gas", 6.40),
    ] {
        storage
            .services
            .upsert(Service::new(ServiceCode::new(code), name, tariff));
    }

    storage.accounts.upsert(
        PersonalAccount::new(
            AccountCode::new(1),
            "PA-001",
            StreetCode::new(1),
            "10",
            "15",
            "Ivanov Ivan Ivanovich",
        )
        .with_building("A"),
    );
    storage.accounts.upsert(PersonalAccount::new(
        AccountCode::new(2),
        "PA-002",
        StreetCode::new(2),
        "25",
        "42",
        "Petrova Maria Sergeevna",
    ));
    storage.accounts.upsert(
        PersonalAccount::new(
            AccountCode::new(3),
            "PA-003",
            StreetCode::new(3),
            "5",
            "8",
            "Sidorov Petr Aleksandrovich",
        )
        .with_building("B"),
    );

    for (code, account, service, quantity) in [
        (1, 1, 1, 15.5),
        (2, 1, 2, 12.3),
        (3, 1, 3, 350.0),
        (4, 2, 1, 10.0),
        (5, 2, 3, 280.0),
        (6, 2, 4, 2.5),
        (7, 3, 1, 18.0),
        (8, 3, 2, 14.5),
        (9, 3, 3, 420.0),
        (10, 3, 5, 25.0),
    ] {
        storage.charges.upsert(Charge::new(
            ChargeCode::new(code),
            AccountCode::new(account),
            ServiceCode::new(service),
            quantity,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BillingStore;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_empty() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BillingPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths, false).unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.accounts_file().exists());
    }

    #[test]
    fn test_sample_data_created() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BillingPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths, true).unwrap();

        let storage = Storage::open(paths).unwrap();
        assert_eq!(storage.streets.count(), 3);
        assert_eq!(storage.services.count(), 5);
        assert_eq!(storage.accounts.count(), 3);
        assert_eq!(storage.charges.count(), 10);
        assert_eq!(storage.charges_for_account(AccountCode::new(3)).len(), 4);
    }

    #[test]
    fn test_sample_data_not_seeded_twice() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BillingPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths, true).unwrap();
        {
            let mut storage = Storage::open(paths.clone()).unwrap();
            storage.charges.delete(ChargeCode::new(10));
            storage.save_all().unwrap();
        }
        initialize_storage(&paths, true).unwrap();

        let storage = Storage::open(paths).unwrap();
        assert_eq!(storage.charges.count(), 9);
    }
}
