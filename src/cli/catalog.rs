//! Catalog CLI commands
//!
//! Add and list streets, services, accounts and charges.

use clap::Subcommand;

use crate::display::{
    format_account_details, format_account_list, format_charge_list, format_service_list,
    format_street_list,
};
use crate::error::{BillingError, BillingResult};
use crate::models::{AccountCode, ChargeCode, ServiceCode, StreetCode};
use crate::services::{CatalogService, NewAccount};
use crate::storage::Storage;

/// Street subcommands
#[derive(Subcommand)]
pub enum StreetCommands {
    /// Add a street
    Add {
        /// Street name
        name: String,
        /// Explicit code (default: next free code)
        #[arg(long)]
        code: Option<StreetCode>,
    },
    /// List all streets
    List,
}

/// Service subcommands
#[derive(Subcommand)]
pub enum ServiceCommands {
    /// Add a tariffed service
    Add {
        /// Service name (e.g., "Cold water")
        name: String,
        /// Price per unit
        #[arg(short, long, allow_negative_numbers = true)]
        tariff: f64,
        /// Explicit code (default: next free code)
        #[arg(long)]
        code: Option<ServiceCode>,
    },
    /// List all services
    List,
}

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Open a personal account
    Add {
        /// Account number (e.g., "PA-004")
        number: String,
        /// Account holder's full name
        #[arg(long)]
        holder: String,
        /// Street code
        #[arg(short, long)]
        street: StreetCode,
        /// House number
        #[arg(long)]
        house: String,
        /// Building (optional)
        #[arg(short, long)]
        building: Option<String>,
        /// Apartment number
        #[arg(short, long)]
        apartment: String,
        /// Explicit code (default: next free code)
        #[arg(long)]
        code: Option<AccountCode>,
    },
    /// List all accounts
    List,
    /// Show account details
    Show {
        /// Account code
        account: AccountCode,
    },
}

/// Charge subcommands
#[derive(Subcommand)]
pub enum ChargeCommands {
    /// Record consumption of a service
    Add {
        /// Account code
        account: AccountCode,
        /// Service code
        service: ServiceCode,
        /// Units consumed
        #[arg(allow_negative_numbers = true)]
        quantity: f64,
        /// Explicit code (default: next free code)
        #[arg(long)]
        code: Option<ChargeCode>,
    },
    /// List charges
    List {
        /// Only charges of this account
        #[arg(short, long)]
        account: Option<AccountCode>,
    },
}

/// Handle a street command
pub fn handle_street_command(storage: &mut Storage, cmd: StreetCommands) -> BillingResult<()> {
    match cmd {
        StreetCommands::Add { name, code } => {
            let street = CatalogService::new(storage).add_street(code, &name)?;
            println!("Created street: {}", street.name);
            println!("  Code: {}", street.code);
        }
        StreetCommands::List => {
            print!("{}", format_street_list(storage.streets.iter()));
        }
    }

    Ok(())
}

/// Handle a service command
pub fn handle_service_command(storage: &mut Storage, cmd: ServiceCommands) -> BillingResult<()> {
    match cmd {
        ServiceCommands::Add { name, tariff, code } => {
            let service = CatalogService::new(storage).add_service(code, &name, tariff)?;
            println!("Created service: {}", service);
            println!("  Code: {}", service.code);
        }
        ServiceCommands::List => {
            print!("{}", format_service_list(storage.services.iter()));
        }
    }

    Ok(())
}

/// Handle an account command
pub fn handle_account_command(storage: &mut Storage, cmd: AccountCommands) -> BillingResult<()> {
    match cmd {
        AccountCommands::Add {
            number,
            holder,
            street,
            house,
            building,
            apartment,
            code,
        } => {
            let fields = NewAccount {
                number,
                street,
                house,
                building,
                apartment,
                full_name: holder,
            };
            let account = CatalogService::new(storage).add_account(code, fields)?;
            println!("Created account: {}", account.number);
            println!("  Code:    {}", account.code);
            println!(
                "  Address: {}",
                account.address(storage.streets.get(account.street))
            );
        }
        AccountCommands::List => {
            print!("{}", format_account_list(storage.accounts.iter(), &*storage));
        }
        AccountCommands::Show { account } => {
            let found = storage
                .accounts
                .get(account)
                .ok_or_else(|| BillingError::account_not_found(account.to_string()))?;
            print!("{}", format_account_details(found, &*storage));
        }
    }

    Ok(())
}

/// Handle a charge command
pub fn handle_charge_command(storage: &mut Storage, cmd: ChargeCommands) -> BillingResult<()> {
    match cmd {
        ChargeCommands::Add {
            account,
            service,
            quantity,
            code,
        } => {
            let charge = CatalogService::new(storage).add_charge(code, account, service, quantity)?;
            println!(
                "Recorded charge {}: {} x {} for {}",
                charge.code, charge.quantity, charge.service, charge.account
            );
        }
        ChargeCommands::List { account } => {
            let charges = storage
                .charges
                .iter()
                .filter(|c| account.map_or(true, |a| c.account == a));
            print!("{}", format_charge_list(charges, &*storage));
        }
    }

    Ok(())
}
