use clap::Parser;
use event_ledger::args::{
    Args, AssignmentsAction, AttendanceAction, Command, DonationsAction, ExpensesAction,
    YearsAction,
};
use event_ledger::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().ledger_home().path();
    let json = args.common().json();

    match args.command() {
        Command::Init => commands::init(home).await?.emit(json),

        Command::Years(years_args) => {
            let config = Config::load(home).await?;
            match years_args.action() {
                YearsAction::List => commands::list_years(config).await?.emit(json),
                YearsAction::Add { year } => commands::add_year(config, *year).await?.emit(json),
            }
        }

        Command::Donations(donations_args) => {
            let config = Config::load(home).await?;
            match donations_args.action() {
                DonationsAction::List(opt) => commands::list_donations(config, opt.year())
                    .await?
                    .emit(json),
                DonationsAction::Add(add) => commands::add_donation(config, add.clone())
                    .await?
                    .emit(json),
            }
        }

        Command::Expenses(expenses_args) => {
            let config = Config::load(home).await?;
            match expenses_args.action() {
                ExpensesAction::List(opt) => commands::list_expenses(config, opt.year())
                    .await?
                    .emit(json),
                ExpensesAction::Add(add) => commands::add_expense(config, add.clone())
                    .await?
                    .emit(json),
            }
        }

        Command::Assignments(assignments_args) => {
            let config = Config::load(home).await?;
            match assignments_args.action() {
                AssignmentsAction::List(opt) => commands::list_assignments(config, opt.year())
                    .await?
                    .emit(json),
                AssignmentsAction::Add(add) => commands::add_assignment(config, add.clone())
                    .await?
                    .emit(json),
            }
        }

        Command::Attendance(attendance_args) => {
            let config = Config::load(home).await?;
            match attendance_args.action() {
                AttendanceAction::List(opt) => commands::list_attendance(config, opt.year())
                    .await?
                    .emit(json),
                AttendanceAction::Add(add) => commands::add_attendance(config, add.clone())
                    .await?
                    .emit(json),
                AttendanceAction::Update(update) => {
                    commands::update_attendance(config, update.clone())
                        .await?
                        .emit(json)
                }
            }
        }

        Command::Stats(stats_args) => commands::stats(Config::load(home).await?, stats_args.year())
            .await?
            .emit(json),

        Command::Export(export_args) => {
            commands::export(Config::load(home).await?, export_args.clone())
                .await?
                .emit(json)
        }

        Command::Backup => commands::backup(Config::load(home).await?)
            .await?
            .emit(json),
    }
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for the library and binary only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
