//! Catalog display formatting
//!
//! Tables of streets, services, accounts and charges.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Charge, PersonalAccount, Service, Street};
use crate::storage::BillingStore;

#[derive(Tabled)]
struct StreetRow {
    #[tabled(rename = "Code")]
    code: u32,
    #[tabled(rename = "Street")]
    name: String,
}

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Code")]
    code: u32,
    #[tabled(rename = "Service")]
    name: String,
    #[tabled(rename = "Tariff")]
    tariff: String,
}

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Code")]
    code: u32,
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Holder")]
    holder: String,
    #[tabled(rename = "Address")]
    address: String,
}

#[derive(Tabled)]
struct ChargeRow {
    #[tabled(rename = "Code")]
    code: u32,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
}

fn render<R: Tabled>(rows: Vec<R>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format streets as a table
pub fn format_street_list<'a>(streets: impl IntoIterator<Item = &'a Street>) -> String {
    let rows: Vec<StreetRow> = streets
        .into_iter()
        .map(|s| StreetRow {
            code: s.code.value(),
            name: s.name.clone(),
        })
        .collect();

    if rows.is_empty() {
        return "No streets found.\n".to_string();
    }
    render(rows)
}

/// Format services as a table
pub fn format_service_list<'a>(services: impl IntoIterator<Item = &'a Service>) -> String {
    let rows: Vec<ServiceRow> = services
        .into_iter()
        .map(|s| ServiceRow {
            code: s.code.value(),
            name: s.name.clone(),
            tariff: format!("{:.2}", s.tariff),
        })
        .collect();

    if rows.is_empty() {
        return "No services found.\n".to_string();
    }
    render(rows)
}

/// Format accounts as a table, resolving street names through `store`
pub fn format_account_list<'a, S: BillingStore + ?Sized>(
    accounts: impl IntoIterator<Item = &'a PersonalAccount>,
    store: &S,
) -> String {
    let rows: Vec<AccountRow> = accounts
        .into_iter()
        .map(|a| AccountRow {
            code: a.code.value(),
            number: a.number.clone(),
            holder: a.full_name.clone(),
            address: a.address(store.street(a.street)),
        })
        .collect();

    if rows.is_empty() {
        return "No accounts found.\n".to_string();
    }
    render(rows)
}

/// Format charges as a table
///
/// Unknown accounts and services are shown by code.
pub fn format_charge_list<'a, S: BillingStore + ?Sized>(
    charges: impl IntoIterator<Item = &'a Charge>,
    store: &S,
) -> String {
    let rows: Vec<ChargeRow> = charges
        .into_iter()
        .map(|c| ChargeRow {
            code: c.code.value(),
            account: store
                .account(c.account)
                .map(|a| a.number.clone())
                .unwrap_or_else(|| c.account.to_string()),
            service: store
                .service(c.service)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| c.service.to_string()),
            quantity: c.quantity.to_string(),
        })
        .collect();

    if rows.is_empty() {
        return "No charges found.\n".to_string();
    }
    render(rows)
}

/// Format a single account's details
pub fn format_account_details<S: BillingStore + ?Sized>(
    account: &PersonalAccount,
    store: &S,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.number));
    output.push_str(&format!("  Code:    {}\n", account.code));
    output.push_str(&format!("  Holder:  {}\n", account.full_name));
    output.push_str(&format!(
        "  Address: {}\n",
        account.address(store.street(account.street))
    ));

    let charges = store.charges_for_account(account.code);
    output.push_str(&format!("  Charges: {}\n", charges.len()));

    output
}
