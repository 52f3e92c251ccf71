//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod catalog;
pub mod generate;

pub use catalog::{
    handle_account_command, handle_charge_command, handle_service_command, handle_street_command,
    AccountCommands, ChargeCommands, ServiceCommands, StreetCommands,
};
pub use generate::{
    handle_audit_command, handle_generate_all_command, handle_generate_command,
    handle_show_command, OutputArgs,
};
