//! Storage layer for billing-notice
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Entities are loaded into memory once and looked up by code.

pub mod file_io;
pub mod init;
pub mod repository;
pub mod traits;

pub use init::initialize_storage;
pub use repository::{Record, Repository};
pub use traits::BillingStore;

use crate::config::paths::BillingPaths;
use crate::error::BillingError;
use crate::models::{
    AccountCode, Charge, PersonalAccount, Service, ServiceCode, Street, StreetCode,
};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BillingPaths,
    pub streets: Repository<Street>,
    pub services: Repository<Service>,
    pub accounts: Repository<PersonalAccount>,
    pub charges: Repository<Charge>,
}

impl Storage {
    /// Create a new, empty Storage instance
    pub fn new(paths: BillingPaths) -> Result<Self, BillingError> {
        paths.ensure_directories()?;

        Ok(Self {
            streets: Repository::new(paths.streets_file()),
            services: Repository::new(paths.services_file()),
            accounts: Repository::new(paths.accounts_file()),
            charges: Repository::new(paths.charges_file()),
            paths,
        })
    }

    /// Create a Storage instance and load everything from disk
    pub fn open(paths: BillingPaths) -> Result<Self, BillingError> {
        let mut storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &BillingPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), BillingError> {
        self.streets.load()?;
        self.services.load()?;
        self.accounts.load()?;
        self.charges.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BillingError> {
        self.streets.save()?;
        self.services.save()?;
        self.accounts.save()?;
        self.charges.save()?;
        Ok(())
    }
}

impl BillingStore for Storage {
    fn account(&self, code: AccountCode) -> Option<&PersonalAccount> {
        self.accounts.get(code)
    }

    fn street(&self, code: StreetCode) -> Option<&Street> {
        self.streets.get(code)
    }

    fn service(&self, code: ServiceCode) -> Option<&Service> {
        self.services.get(code)
    }

    fn charges_for_account(&self, code: AccountCode) -> Vec<&Charge> {
        self.charges.iter().filter(|c| c.account == code).collect()
    }

    fn account_codes(&self) -> Vec<AccountCode> {
        self.accounts.iter().map(|a| a.code).collect()
    }
}
