//! Path management for billing-notice
//!
//! ## Path Resolution Order
//!
//! 1. `BILLING_NOTICE_DATA_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/billing-notice` on Linux, `%APPDATA%` on Windows, ...)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BillingError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BILLING_NOTICE_DATA_DIR";

/// Manages all paths used by billing-notice
#[derive(Debug, Clone)]
pub struct BillingPaths {
    /// Base directory for all billing-notice data
    base_dir: PathBuf,
}

impl BillingPaths {
    /// Create a new BillingPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BillingError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create BillingPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the entity JSON files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default directory for rendered notices
    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join("notices")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn streets_file(&self) -> PathBuf {
        self.data_dir().join("streets.json")
    }

    pub fn services_file(&self) -> PathBuf {
        self.data_dir().join("services.json")
    }

    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join("accounts.json")
    }

    pub fn charges_file(&self) -> PathBuf {
        self.data_dir().join("charges.json")
    }

    /// Ensure the base, data and output directories exist
    pub fn ensure_directories(&self) -> Result<(), BillingError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BillingError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BillingError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.output_dir())
            .map_err(|e| BillingError::Io(format!("Failed to create output directory: {}", e)))?;

        Ok(())
    }

    /// Check if billing-notice has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, BillingError> {
    ProjectDirs::from("", "", "billing-notice")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| BillingError::Config("Could not determine a home directory".into()))
}
