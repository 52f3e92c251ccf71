//! Display formatting for terminal output
//!
//! Tables for the stored catalog and a detail view of payment notices.

pub mod catalog;
pub mod notice;

pub use catalog::{
    format_account_details, format_account_list, format_charge_list, format_service_list,
    format_street_list,
};
pub use notice::format_notice;
