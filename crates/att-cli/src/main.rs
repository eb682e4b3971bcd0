use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use att_cli::commands::util::{parse_date, resolve_range, today};
use att_cli::commands::{
    daily, department, employee, report, stats, status, summary, sync, watch,
};
use att_cli::{Cli, Commands, Config, DepartmentAction, EmployeeAction};
use att_core::Aggregator;
use att_db::EventQuery;

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(att_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = att_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

#[expect(
    clippy::too_many_lines,
    reason = "CLI command dispatch is inherently verbose"
)]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // try_init: tests may have installed a subscriber already
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match &cli.command {
        Some(Commands::Status) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let stdout = std::io::stdout();
            status::run(&mut stdout.lock(), &db, &config.database_path)?;
        }
        Some(Commands::Department(action)) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            match action {
                DepartmentAction::Add { name } => department::add(&mut db, name)?,
                DepartmentAction::List { json } => department::list(&db, *json)?,
            }
        }
        Some(Commands::Employee(action)) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            match action {
                EmployeeAction::Add(args) => employee::add(&mut db, args)?,
                EmployeeAction::Update(args) => employee::update(&mut db, args)?,
                EmployeeAction::Delete { code } => employee::delete(&mut db, code)?,
                EmployeeAction::Show { code, json } => employee::show(&db, code, *json)?,
                EmployeeAction::List(args) => employee::list(&db, args)?,
            }
        }
        Some(Commands::Sync(args)) => {
            let (mut db, config) = open_database(cli.config.as_deref())?;
            sync::run(&mut db, &config, args)?;
        }
        Some(Commands::Watch(args)) => {
            // The timer thread opens its own connection per cycle.
            let (_db, config) = open_database(cli.config.as_deref())?;
            watch::run(&config, args)?;
        }
        Some(Commands::Daily { date, json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let today = today();
            let date = date
                .as_deref()
                .map_or(Ok(today), |s| parse_date(s, today))?;
            daily::run(&db, &Aggregator::new(config.rules), date, *json)?;
        }
        Some(Commands::Stats {
            from,
            to,
            employee,
            department,
            json,
        }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let query = EventQuery {
                range: resolve_range(from.as_deref(), to.as_deref(), today())?,
                employee_code: employee.clone(),
                department: department.clone(),
            };
            stats::run(&db, &Aggregator::new(config.rules), &query, *json)?;
        }
        Some(Commands::Summary {
            code,
            from,
            to,
            json,
        }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let range = resolve_range(from.as_deref(), to.as_deref(), today())?;
            summary::run(&db, &Aggregator::new(config.rules), code, range, *json)?;
        }
        Some(Commands::Report(args)) => {
            let (mut db, config) = open_database(cli.config.as_deref())?;
            let aggregator = Aggregator::new(config.rules.clone());
            report::run(&mut db, &config, &aggregator, args, today())?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
