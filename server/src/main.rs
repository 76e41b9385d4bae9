//! Groundwork backend entrypoint.
//!
//! Three commands: `serve` runs the HTTP server, `task import` runs the
//! CSV item import, and `migrate [up|down]` applies or reverts schema
//! migrations (prompting for credentials when run standalone).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use groundwork_config::{Config, DatabaseConfig};
use groundwork_database::{
    prepare_database, revert_last_migration, run_migrations, ItemRepository, TxManager,
};
use groundwork_gateway::{create_router, AppState};
use groundwork_items::ItemImportService;
use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::AnyPool;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "groundwork", version, about = "Clean-architecture starter backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the backend HTTP server
    Serve,
    /// One-off batch tasks; an exact subcommand is required
    Task {
        #[command(subcommand)]
        task: TaskCommand,
    },
    /// Apply schema migrations from the environment, or prompt with up/down
    Migrate {
        #[command(subcommand)]
        direction: Option<MigrateCommand>,
    },
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    /// Import items from CSV files
    Import {
        /// Directory containing CSV files
        #[arg(long, default_value = "./data/items")]
        source_dir: PathBuf,
        /// Validate files without importing
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply all pending migrations
    Up,
    /// Revert the most recent migration
    Down,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => serve().await,
        Command::Task {
            task: TaskCommand::Import {
                source_dir,
                dry_run,
            },
        } => import_items(source_dir, dry_run).await,
        Command::Migrate { direction: None } => migrate_from_env().await,
        Command::Migrate {
            direction: Some(MigrateCommand::Up),
        } => migrate_interactive(true).await,
        Command::Migrate {
            direction: Some(MigrateCommand::Down),
        } => migrate_interactive(false).await,
    }
}

async fn serve() -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.app.log_level);
    info!("starting server by `serve` command");

    let pool = prepare_database(&config.database).await?;

    if config.app.env == "local" {
        run_migrations(&pool).await?;
    }

    let app = create_router(AppState::new(pool.clone()));

    let address = format!("0.0.0.0:{}", config.app.listen_port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;
    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    pool.close().await;
    info!("backend shut down");
    Ok(())
}

async fn import_items(source_dir: PathBuf, dry_run: bool) -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.app.log_level);
    info!(source_dir = %source_dir.display(), dry_run, "importing items");

    let pool = prepare_database(&config.database).await?;

    if config.app.env == "local" {
        run_migrations(&pool).await?;
    }

    let task = ItemImportService::new(TxManager::new(pool.clone()), ItemRepository::new());
    task.import_items(&source_dir, dry_run).await?;

    info!("item import finished");
    pool.close().await;
    Ok(())
}

async fn migrate_from_env() -> Result<()> {
    init_tracing("info");

    let config = DatabaseConfig::load().context("failed to load database configuration")?;
    let pool = migration_pool(&config.url()).await?;
    run_migrations(&pool).await?;

    pool.close().await;
    Ok(())
}

async fn migrate_interactive(up: bool) -> Result<()> {
    init_tracing("info");

    let url = prompt_datasource()?;
    let pool = migration_pool(&url).await?;

    if up {
        run_migrations(&pool).await?;
        info!("successfully upped");
    } else {
        revert_last_migration(&pool).await?;
        info!("successfully downed");
    }

    pool.close().await;
    Ok(())
}

/// A small dedicated pool for migration runs.
async fn migration_pool(url: &str) -> Result<AnyPool> {
    install_default_drivers();

    AnyPoolOptions::new()
        .max_connections(1)
        .connect(url)
        .await
        .context("failed to connect to migration database")
}

/// Prompt for connection info on stdin, defaulting to the environment.
fn prompt_datasource() -> Result<String> {
    println!("Enter database connection info.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let host = prompt_with_default(&mut lines, "Host", &env_default("DB_HOST"))?;
    let port = prompt_with_default(&mut lines, "Port", &env_default("DB_PORT"))?;
    let name = prompt_with_default(&mut lines, "DB Name", &env_default("DB_NAME"))?;
    let user = prompt_with_default(&mut lines, "Username", &env_default("DB_USER"))?;

    print!("Password > ");
    io::stdout().flush().context("failed to flush stdout")?;
    let password = lines
        .next()
        .transpose()
        .context("failed to read password")?
        .unwrap_or_default();

    let ssl_mode = {
        let value = env_default("PGSSLMODE");
        if value.is_empty() {
            "disable".to_string()
        } else {
            value
        }
    };

    Ok(format!(
        "postgres://{}:{}@{}:{}/{}?sslmode={}",
        user.trim(),
        password.trim(),
        host.trim(),
        port.trim(),
        name.trim(),
        ssl_mode,
    ))
}

fn prompt_with_default(
    lines: &mut io::Lines<io::StdinLock<'_>>,
    label: &str,
    default: &str,
) -> Result<String> {
    print!("{label} (default: {default})> ");
    io::stdout().flush().context("failed to flush stdout")?;

    let value = lines
        .next()
        .transpose()
        .with_context(|| format!("failed to read {label}"))?
        .unwrap_or_default();

    if value.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(value)
    }
}

fn env_default(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

fn init_tracing(level: &str) {
    let fallback = match level {
        "debug" => "debug",
        "warning" | "warn" => "warn",
        "error" => "error",
        _ => "info",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).finish();
    // Keep whatever subscriber is already installed (tests).
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn shutdown_signal() -> impl std::future::Future<Output = ()> {
    async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to listen for shutdown signal");
        }
        info!("shutdown signal received");
    }
}
