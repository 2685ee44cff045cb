//! `FinTrack` command-line interface.
//!
//! Thin binary over the library crate: bootstraps tracing, environment, and
//! the database, then dispatches to the core operations.

use clap::{Parser, Subcommand};
use chrono::Utc;
use dotenvy::dotenv;
use fintrack::{
    config,
    core::{
        Module, bank_pdc, business_in_hand, cashflow, currency::format_currency, excel, expense,
        export::{self, DateRange},
        future_need, liability, salary, sale, seed,
    },
    errors::{Error, Result},
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fintrack", about = "Small-business finance tracker", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Insert the PKR sample catalog into every module
    Seed,
    /// Remove previously seeded sample data, preserving user records
    RemoveSeeded,
    /// Delete every record in every module
    Clear {
        /// Confirm the irreversible wipe
        #[arg(long)]
        yes: bool,
    },
    /// Export financial data as a spreadsheet workbook or JSON
    Export {
        /// Inclusive start date (YYYY-MM-DD); empty means unbounded
        #[arg(long)]
        start_date: Option<String>,
        /// Inclusive end date (YYYY-MM-DD); empty means unbounded
        #[arg(long)]
        end_date: Option<String>,
        /// Comma-separated module ids (default: all)
        #[arg(long, value_delimiter = ',')]
        modules: Option<Vec<Module>>,
        /// Output path for the workbook (default: export dir, timestamped name)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the export document as JSON instead of writing a workbook
        #[arg(long)]
        json: bool,
    },
    /// Print a per-module financial summary
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenv().ok();

    let cli = Cli::parse();

    let app_config = config::app::load_app_config()?;
    let db = config::database::create_connection(&app_config.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db).await?;

    match cli.command {
        Command::Seed => {
            let report = seed::seed_database(&db).await?;
            println!("{}", report.message);
            let added = report.records_added;
            println!("  sales:            {}", added.sales);
            println!("  expenses:         {}", added.expenses);
            println!("  liabilities:      {}", added.liabilities);
            println!("  salaries:         {}", added.salaries);
            println!("  bank PDC:         {}", added.bank_pdc);
            println!("  future needs:     {}", added.future_needs);
            println!("  business in hand: {}", added.business_in_hand);
        }
        Command::RemoveSeeded => {
            let removed = seed::remove_seeded_data(&db).await?;
            println!("Removed {removed} seeded records; user data preserved.");
        }
        Command::Clear { yes } => {
            if !yes {
                return Err(Error::validation(
                    "refusing to clear all data without --yes",
                ));
            }
            let cleared = seed::clear_all_data(&db).await?;
            println!("Cleared {cleared} records from all modules.");
        }
        Command::Export {
            start_date,
            end_date,
            modules,
            out,
            json,
        } => {
            let range = if start_date.is_some() || end_date.is_some() {
                Some(DateRange {
                    start_date: start_date.unwrap_or_default(),
                    end_date: end_date.unwrap_or_default(),
                })
            } else {
                None
            };
            let doc = export::export_data(&db, range, modules.clone()).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                let included = modules.unwrap_or_else(|| Module::ALL.to_vec());
                let path = match out {
                    Some(path) => path,
                    None => {
                        std::fs::create_dir_all(&app_config.export_dir)?;
                        app_config
                            .export_dir
                            .join(excel::export_filename("finance", Utc::now()))
                    }
                };
                excel::write_workbook(&doc, &included, &path)?;
                info!(path = %path.display(), "workbook written");
                println!("Exported workbook to {}", path.display());
            }
        }
        Command::Summary => {
            print_summary(&db).await?;
        }
    }

    Ok(())
}

async fn print_summary(db: &sea_orm::DatabaseConnection) -> Result<()> {
    let sales = sale::summarize_sales(db).await?;
    let expenses = expense::summarize_expenses(db).await?;
    let liabilities = liability::summarize_liabilities(db).await?;
    let salaries = salary::summarize_salaries(db).await?;
    let cashflow = cashflow::summarize_cashflow(db).await?;
    let pdc = bank_pdc::summarize_bank_pdc(db).await?;
    let business = business_in_hand::summarize_business_in_hand(db).await?;
    let needs = future_need::summarize_future_needs(db).await?;

    println!("Sales ({} records)", sales.count);
    println!("  revenue:        {}", format_currency(sales.total_revenue));
    println!("  net profit:     {}", format_currency(sales.total_net_profit));
    println!("Expenses ({} records)", expenses.count);
    println!("  total:          {}", format_currency(expenses.total));
    println!("  unpaid:         {}", format_currency(expenses.unpaid_total));
    println!("Liabilities ({} records)", liabilities.count);
    println!(
        "  outstanding:    {}",
        format_currency(liabilities.total_outstanding)
    );
    println!("Salaries ({} records)", salaries.count);
    println!("  total:          {}", format_currency(salaries.total));
    println!("  pending:        {}", format_currency(salaries.pending_total));
    println!("Cash Flow ({} entries)", cashflow.count);
    println!("  inflows:        {}", format_currency(cashflow.total_inflows));
    println!("  outflows:       {}", format_currency(cashflow.total_outflows));
    println!("  net:            {}", format_currency(cashflow.net_cashflow));
    println!("Bank PDC ({} records)", pdc.count);
    println!("  pending:        {}", format_currency(pdc.pending_total));
    println!("Business In Hand ({} records)", business.count);
    println!(
        "  pipeline value: {}",
        format_currency(business.pipeline_value)
    );
    println!("Future Needs ({} records)", needs.count);
    println!(
        "  projected:      {}",
        format_currency(needs.total_projected)
    );

    Ok(())
}
