use anyhow::Result;
use clap::{Parser, Subcommand};

use billing_notice::cli::{
    handle_account_command, handle_audit_command, handle_charge_command,
    handle_generate_all_command, handle_generate_command, handle_service_command,
    handle_show_command, handle_street_command, OutputArgs,
};
use billing_notice::audit::AuditLogger;
use billing_notice::config::{paths::BillingPaths, settings::Settings};
use billing_notice::models::{AccountCode, BillingPeriod};
use billing_notice::storage::Storage;

#[derive(Parser)]
#[command(
    name = "notice",
    version,
    about = "Utility-billing payment notice generator",
    long_about = "Generates per-account payment notices from stored streets, services, \
                  accounts and charges. Each charge is priced by a configurable rule \
                  chain (validation, discount, penalty, standard tariff)."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init {
        /// Seed the sample streets, services, accounts and charges
        #[arg(long)]
        sample: bool,
    },

    /// Show current configuration and paths
    Config,

    /// Street management commands
    #[command(subcommand)]
    Street(billing_notice::cli::StreetCommands),

    /// Service management commands
    #[command(subcommand)]
    Service(billing_notice::cli::ServiceCommands),

    /// Account management commands
    #[command(subcommand)]
    Account(billing_notice::cli::AccountCommands),

    /// Charge management commands
    #[command(subcommand)]
    Charge(billing_notice::cli::ChargeCommands),

    /// Generate the payment notice of one account
    Generate {
        /// Account code
        account: AccountCode,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate payment notices for all accounts
    GenerateAll {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print a processed notice to the terminal
    Show {
        /// Account code
        account: AccountCode,
        /// Billing period (YYYY-MM, default: current month)
        #[arg(short, long)]
        period: Option<BillingPeriod>,
    },

    /// Show recent notice generation attempts
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = BillingPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Init { sample }) => {
            println!("Initializing billing-notice at: {}", paths.base_dir().display());
            billing_notice::storage::init::initialize_storage(&paths, sample)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            if sample {
                println!();
                println!("Sample data has been loaded:");
                println!("  - 3 streets, 5 services");
                println!("  - 3 accounts with 10 charges");
                println!();
                println!("Run 'notice generate-all' to produce their notices.");
            }
        }
        Some(Commands::Config) => {
            println!("billing-notice Configuration");
            println!("============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Output directory: {}", paths.output_dir().display());
            println!(
                "Initialized:      {}",
                if paths.is_initialized() { "yes" } else { "no (run 'notice init')" }
            );
            println!(
                "Audit entries:    {}",
                AuditLogger::new(paths.audit_log()).entry_count()?
            );
            println!();
            println!("Settings:");
            println!("  Currency:       {}", settings.currency_symbol);
            println!("  Date format:    {}", settings.date_format);
            println!("  Default format: {}", settings.default_format);
            println!("  Rule chain:");
            for rule in settings.charge_chain().rules() {
                println!("    - {}", rule.name());
            }
        }
        Some(Commands::Street(cmd)) => handle_street_command(&mut storage, cmd)?,
        Some(Commands::Service(cmd)) => handle_service_command(&mut storage, cmd)?,
        Some(Commands::Account(cmd)) => handle_account_command(&mut storage, cmd)?,
        Some(Commands::Charge(cmd)) => handle_charge_command(&mut storage, cmd)?,
        Some(Commands::Generate { account, output }) => {
            handle_generate_command(&storage, &settings, &paths, account, output)?;
        }
        Some(Commands::GenerateAll { output }) => {
            handle_generate_all_command(&storage, &settings, &paths, output)?;
        }
        Some(Commands::Show { account, period }) => {
            handle_show_command(&storage, &settings, account, period)?;
        }
        Some(Commands::Audit { limit }) => handle_audit_command(&paths, limit)?,
        None => {
            println!("billing-notice - utility payment notices");
            println!();
            println!("Run 'notice --help' for usage information.");
            println!("Run 'notice init --sample' to start with sample data.");
        }
    }

    Ok(())
}
