use clap::{Parser, Subcommand};
use configuration::{Config, LoggingSettings};
use database::{connect, run_migrations, DbRepository};
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// The main entry point for the Global Trust Index API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => configuration::load_config_from(path)?,
        None => configuration::load_config()?,
    };

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_tracing(&config.logging);
    tracing::debug!(
        bind_addr = %config.server.bind_addr(),
        max_connections = config.database.max_connections,
        "Configuration loaded."
    );

    // Execute the appropriate command
    let result = match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => {
            if let Some(host) = args.host {
                config.server.host = host;
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
            handle_serve(&config, args.skip_migrations).await
        }
        Commands::Migrate => handle_migrate(&config).await,
        Commands::Seed => handle_seed(&config).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed.");
    }
    result
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Serves the Global Trust Index: country catalog, yearly snapshots and
/// per-country detail.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read this TOML file instead of ./config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (the default).
    Serve(ServeArgs),
    /// Apply database migrations and exit.
    Migrate,
    /// Apply migrations, then insert the development countries.
    Seed,
}

#[derive(Parser, Default)]
struct ServeArgs {
    /// Overrides `server.host`.
    #[arg(long)]
    host: Option<IpAddr>,

    /// Overrides `server.port`.
    #[arg(long)]
    port: Option<u16>,

    /// Start without applying migrations.
    #[arg(long)]
    skip_migrations: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(config: &Config, skip_migrations: bool) -> anyhow::Result<()> {
    let db_pool = connect(&config.database)?;
    if skip_migrations {
        tracing::info!("Skipping database migrations.");
    } else {
        run_migrations(&db_pool).await?;
    }

    let db_repo = DbRepository::new(db_pool);
    web_server::run_server(config, Arc::new(db_repo)).await
}

async fn handle_migrate(config: &Config) -> anyhow::Result<()> {
    let db_pool = connect(&config.database)?;
    run_migrations(&db_pool).await?;
    tracing::info!("Database migrations applied.");
    Ok(())
}

async fn handle_seed(config: &Config) -> anyhow::Result<()> {
    let db_pool = connect(&config.database)?;
    run_migrations(&db_pool).await?;

    let inserted = DbRepository::new(db_pool).seed_countries().await?;
    tracing::info!(inserted, "Seeded development countries.");
    Ok(())
}

/// Installs the global subscriber: stdout always, plus a daily rolling file
/// when a log directory is configured. `RUST_LOG` overrides the configured level.
fn init_tracing(settings: &LoggingSettings) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, &settings.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}
