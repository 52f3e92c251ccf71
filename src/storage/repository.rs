//! Generic JSON-backed repository
//!
//! Each entity kind lives in its own JSON file as an array of records.
//! Records are held in a `BTreeMap` keyed by code so iteration order is
//! always ascending by code.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::BillingError;
use crate::models::{
    AccountCode, Charge, ChargeCode, PersonalAccount, Service, ServiceCode, Street, StreetCode,
};

use super::file_io::{load_records, save_records};

/// An entity stored in a [`Repository`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Code: Copy + Ord + fmt::Display + From<u32> + Into<u32>;

    /// Entity name used in error messages
    const ENTITY: &'static str;

    fn code(&self) -> Self::Code;
}

impl Record for Street {
    type Code = StreetCode;
    const ENTITY: &'static str = "Street";

    fn code(&self) -> StreetCode {
        self.code
    }
}

impl Record for Service {
    type Code = ServiceCode;
    const ENTITY: &'static str = "Service";

    fn code(&self) -> ServiceCode {
        self.code
    }
}

impl Record for PersonalAccount {
    type Code = AccountCode;
    const ENTITY: &'static str = "Account";

    fn code(&self) -> AccountCode {
        self.code
    }
}

impl Record for Charge {
    type Code = ChargeCode;
    const ENTITY: &'static str = "Charge";

    fn code(&self) -> ChargeCode {
        self.code
    }
}

/// Repository for one entity kind
#[derive(Debug)]
pub struct Repository<T: Record> {
    path: PathBuf,
    data: BTreeMap<T::Code, T>,
}

impl<T: Record> Repository<T> {
    /// Create an empty repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: BTreeMap::new(),
        }
    }

    /// Load records from disk, replacing anything in memory
    pub fn load(&mut self) -> Result<(), BillingError> {
        let records: Vec<T> = load_records(&self.path)?;

        self.data.clear();
        for record in records {
            let code = record.code();
            if self.data.insert(code, record).is_some() {
                return Err(BillingError::Storage(format!(
                    "{} {} appears twice in {}",
                    T::ENTITY,
                    code,
                    self.path.display()
                )));
            }
        }

        Ok(())
    }

    /// Save records to disk
    pub fn save(&self) -> Result<(), BillingError> {
        let records: Vec<&T> = self.data.values().collect();
        save_records(&self.path, &records)
    }

    pub fn get(&self, code: T::Code) -> Option<&T> {
        self.data.get(&code)
    }

    /// All records, ascending by code
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.values()
    }

    /// Insert or replace a record
    pub fn upsert(&mut self, record: T) {
        self.data.insert(record.code(), record);
    }

    /// Insert a record whose code must not be taken yet
    pub fn insert(&mut self, record: T) -> Result<(), BillingError> {
        let code = record.code();
        if self.data.contains_key(&code) {
            return Err(BillingError::Duplicate {
                entity_type: T::ENTITY,
                identifier: code.to_string(),
            });
        }
        self.data.insert(code, record);
        Ok(())
    }

    pub fn delete(&mut self, code: T::Code) -> bool {
        self.data.remove(&code).is_some()
    }

    pub fn exists(&self, code: T::Code) -> bool {
        self.data.contains_key(&code)
    }

    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Smallest code above every stored code
    pub fn next_code(&self) -> T::Code {
        let next = match self.data.keys().next_back() {
            Some(&last) => {
                let last: u32 = last.into();
                last.saturating_add(1)
            }
            None => 1,
        };
        T::Code::from(next)
    }
}
