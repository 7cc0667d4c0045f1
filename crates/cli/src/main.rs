use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser};
use engine::Engine;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing_subscriber::EnvFilter;

use crate::{
    commands::Command,
    error::Result,
    settings::{DatabaseSettings, Settings},
};

mod commands;
mod error;
mod render;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "charity", version)]
#[command(about = "Register charities, take donations and print receipts")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the database file location.
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,
    /// Use an in-memory database that is discarded on exit.
    #[arg(long, global = true)]
    pub memory: bool,
    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

async fn connect_db(settings: &DatabaseSettings) -> Result<DatabaseConnection> {
    if let Some(parent) = settings.parent_dir() {
        std::fs::create_dir_all(parent)?;
    }
    let url = settings.url();
    tracing::debug!(%url, "opening database");
    let db = Database::connect(url).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    let db = connect_db(&settings.database).await?;
    let engine = Engine::builder().database(db).build().await?;
    let mut out = std::io::stdout();
    commands::execute(&engine, command, &mut out).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load(&cli.global) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?settings, "loaded settings");

    match run(cli.command, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("command failed: {err:?}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
