use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use configuration::LoggingConfig;
use core_types::{DateFilter, ExpenseKind, InvestmentKind};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

mod commands;
mod display;

/// The main entry point for the FinancePro command-line tool.
#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the variables may come from the shell.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => configuration::load_config_from(path),
        None => configuration::load_config(),
    }
    .context("Failed to load configuration")?;

    let _guard = init_tracing(&config.logging)?;

    commands::run(cli, config).await
}

/// Installs a stderr logger, plus a daily rolling file when a log directory is
/// configured. The returned guard must live until exit to flush the file.
fn init_tracing(logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .context("Invalid log filter")?;

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match &logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "financepro.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            Ok(None)
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Break-even, margin and profit analysis for small businesses.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (defaults to ./config.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Login username.
    #[arg(short, long, global = true, env = "FINANCEPRO_USERNAME")]
    pub username: Option<String>,

    /// Login password.
    #[arg(short, long, global = true, env = "FINANCEPRO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Client to act on. Required for the administrator, implied for client users.
    #[arg(long, global = true)]
    pub client: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check the credentials and show who is logged in.
    Login,
    /// Compute the financial summary for a period.
    Summary(SummaryArgs),
    /// Project profit under a price and volume change.
    Simulate(SimulateArgs),
    /// Ask the AI advisor for recommendations on a period.
    Advise(PeriodArgs),
    /// Manage sales.
    #[command(subcommand)]
    Sales(SalesCommand),
    /// Manage expenses.
    #[command(subcommand)]
    Expenses(ExpensesCommand),
    /// Manage investments and their yields.
    #[command(subcommand)]
    Investments(InvestmentsCommand),
    /// Manage client accounts (administrator only).
    #[command(subcommand)]
    Clients(ClientsCommand),
    /// Portal-wide settings (administrator only).
    #[command(subcommand)]
    Portal(PortalCommand),
}

/// A date range; leaving either bound out means all time.
#[derive(Args, Clone, Default)]
pub struct PeriodArgs {
    /// First day of the period (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day of the period, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl PeriodArgs {
    pub fn filter(&self) -> DateFilter {
        DateFilter::from_bounds(self.from, self.to)
    }
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// First day of a reference period to compare against.
    #[arg(long, requires = "compare_to")]
    pub compare_from: Option<NaiveDate>,

    /// Last day of the reference period.
    #[arg(long, requires = "compare_from")]
    pub compare_to: Option<NaiveDate>,

    /// Print the summary as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Period whose fixed costs and net profit are the baseline. The averages
    /// still come from every sale.
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Price change in percent, e.g. 10 or -5.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub price_pct: Decimal,

    /// Volume change in percent, e.g. 10 or -5.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub volume_pct: Decimal,
}

#[derive(Subcommand)]
pub enum SalesCommand {
    /// List all sales.
    List,
    /// Record a sale.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        quantity: u32,
        /// Variable cost per unit sold.
        #[arg(long, default_value = "0")]
        unit_cost: Decimal,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Delete a sale.
    Remove { id: Uuid },
}

#[derive(Subcommand)]
pub enum ExpensesCommand {
    /// List all expenses.
    List,
    /// Record an expense.
    Add {
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: Decimal,
        /// FIXED or VARIABLE.
        #[arg(long)]
        kind: ExpenseKind,
        #[arg(long, default_value = "General")]
        category: String,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Delete an expense.
    Remove { id: Uuid },
}

#[derive(Subcommand)]
pub enum InvestmentsCommand {
    /// List all investments.
    List,
    /// Record an investment.
    Add {
        #[arg(long)]
        name: String,
        /// MACHINERY, VEHICLE, STOCK, BOND or REAL_ESTATE.
        #[arg(long)]
        kind: InvestmentKind,
        #[arg(long)]
        value: Decimal,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Record a yield against an investment.
    AddYield {
        investment: Uuid,
        #[arg(long, allow_hyphen_values = true)]
        amount: Decimal,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        percentage: Option<Decimal>,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Delete an investment and its yields.
    Remove { id: Uuid },
}

#[derive(Subcommand)]
pub enum ClientsCommand {
    /// List every client with its figures for a period.
    List(PeriodArgs),
    /// Register a client.
    Add {
        #[arg(long)]
        business_name: String,
        #[arg(long = "login")]
        login: String,
        #[arg(long = "secret")]
        secret: String,
    },
    /// Change a client's name or credentials.
    Update {
        id: String,
        #[arg(long)]
        business_name: Option<String>,
        #[arg(long = "login")]
        login: Option<String>,
        #[arg(long = "secret")]
        secret: Option<String>,
    },
    /// Delete a client and its entire ledger.
    Remove { id: String },
    /// Print the invitation message for a client.
    Share { id: String },
}

#[derive(Subcommand)]
pub enum PortalCommand {
    /// Show the portal settings.
    Show,
    /// Set the public URL included in invitations.
    SetUrl { url: String },
}

