//! `resort-admin` - one-shot maintenance routines against the database.
//!
//! Every subcommand opens one connection, runs one batch, prints a report and
//! closes the connection whether or not the batch succeeded.

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use resort_kitchen::{
    config::{
        database,
        roster::{builtin_roster, load_roster},
        settings::AppSettings,
    },
    core::{
        auth::{self, NewUser},
        employee,
        maintenance::{self, InsertOutcome, TestEmployeeOutcome},
        summary::{self, Month},
    },
    entities::Role,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resort-admin")]
#[command(about = "Resort kitchen maintenance routines")]
struct Cli {
    /// Database URL; overrides DATABASE_URL and the settings file
    #[arg(long, global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all employees ordered by identifier
    ListEmployees,
    /// Create the fixed test employee if it does not exist
    CreateTestEmployee,
    /// Insert every employee of a roster file (or the built-in roster)
    SeedRoster {
        /// TOML roster with [[employees]] tables
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Assign EMP### identifiers to employees that have none
    BackfillIds,
    /// Create a user account linked to an existing employee
    CreateUser {
        #[arg(long)]
        employee_id: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        /// Grant the admin role instead of staff
        #[arg(long, default_value_t = false)]
        admin: bool,
    },
    /// Record revenue for a month; expenditure is taken from the bills
    RecordSummary {
        /// Month as YYYY-MM
        #[arg(long)]
        month: String,
        #[arg(long)]
        revenue: f64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    dotenv().ok();

    let cli = Cli::parse();
    let settings = match AppSettings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let database_url = cli
        .database_url
        .clone()
        .unwrap_or_else(|| settings.database_url.clone());

    let db = match database::connect(&database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to the database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = run(cli.command, &db, &settings).await;

    if let Err(e) = db.close().await {
        error!("Failed to close the database connection: {}", e);
    } else {
        info!("Database connection closed.");
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, db: &DatabaseConnection, settings: &AppSettings) -> Result<()> {
    match command {
        Command::ListEmployees => list_employees(db).await,
        Command::CreateTestEmployee => {
            match maintenance::create_test_employee(db).await? {
                TestEmployeeOutcome::Created(created) => {
                    println!("Created test employee {} ({})", created.name, created.id);
                }
                TestEmployeeOutcome::AlreadyExists(existing) => {
                    println!(
                        "Test employee {} already exists ({}); nothing changed",
                        existing.name, existing.id
                    );
                }
            }
            Ok(())
        }
        Command::SeedRoster { file } => {
            let roster = match file {
                Some(path) => load_roster(path)?,
                None => builtin_roster()?,
            };
            let report = maintenance::seed_roster(db, roster.employees).await;
            for outcome in &report.outcomes {
                match outcome {
                    InsertOutcome::Created { employee_id, name } => {
                        println!("  ok      {employee_id}  {name}");
                    }
                    InsertOutcome::Failed {
                        employee_id,
                        name,
                        reason,
                    } => println!("  FAILED  {employee_id}  {name}: {reason}"),
                }
            }
            println!("{}", report.summary_line());
            Ok(())
        }
        Command::BackfillIds => {
            let assigned = maintenance::backfill_employee_ids(db).await?;
            if assigned.is_empty() {
                println!("Every employee already has an identifier");
            }
            for id in &assigned {
                println!("  {}  {} (row {})", id.employee_id, id.name, id.id);
            }
            println!("Assigned {} identifiers", assigned.len());
            Ok(())
        }
        Command::CreateUser {
            employee_id,
            username,
            email,
            password,
            first_name,
            last_name,
            admin,
        } => {
            let role = if admin { Role::Admin } else { Role::Staff };
            let new = NewUser {
                username,
                email,
                password,
                employee_id,
                first_name,
                last_name,
            };
            let created = auth::create_user(db, new, role, settings.bcrypt_cost).await?;
            println!(
                "Created {} account {} (id {})",
                created.role, created.username, created.id
            );
            Ok(())
        }
        Command::RecordSummary { month, revenue } => {
            let month: Month = month.parse()?;
            let recorded = summary::record_from_books(db, month, revenue).await?;
            println!("{}", summary::format_summary(&recorded));
            Ok(())
        }
    }
}

async fn list_employees(db: &DatabaseConnection) -> Result<()> {
    let employees = employee::list_employees(db).await?;
    if employees.is_empty() {
        println!("No employees found");
        return Ok(());
    }
    for e in &employees {
        let status = if e.is_active { "active" } else { "inactive" };
        println!(
            "{:<8} {:<24} {:<20} {:>10.2} {} {} {}",
            e.employee_id.as_deref().unwrap_or("-"),
            e.name,
            e.position,
            e.monthly_rate,
            e.start_date,
            e.role,
            status
        );
    }
    println!("{} employees", employees.len());
    Ok(())
}

