use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use db::DBService;
use server::{AppState, router};
use services::services::{
    config::Config, database_validator::DatabaseValidator, seed::SeedService,
};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

/// Resort booking site: public booking API and admin back office.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// SQLite connection string, e.g. `sqlite://resort.db`
    #[arg(long, global = true, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(long, global = true, env = "HOST")]
    host: Option<String>,

    #[arg(long, global = true, env = "PORT")]
    port: Option<u16>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create the admin account and demo rooms, customers and bookings
    Seed,
    /// Verify the database schema and exit
    Check,
}

impl Cli {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(url) = &self.database_url {
            config.database_url = url.clone();
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment may already be set.
    dotenvy::dotenv().ok();
    utils::logging::init();

    let cli = Cli::parse();
    let config = cli.apply(Config::load().context("invalid configuration")?);

    let command = cli.command.unwrap_or(Command::Serve);
    // `check` inspects the schema as it is on disk, so it must not migrate.
    let db = match command {
        Command::Check => DBService::connect(&config.database_url).await,
        Command::Serve | Command::Seed => DBService::new(&config.database_url).await,
    }
    .with_context(|| format!("failed to open database {}", config.database_url))?;

    match command {
        Command::Serve => serve(db, config).await,
        Command::Seed => seed(db, &config).await,
        Command::Check => check(db).await,
    }
}

async fn check(db: DBService) -> anyhow::Result<()> {
    let result = DatabaseValidator::new(db.pool).validate().await?;
    if !result.is_ok() {
        bail!("database check failed: {}", result.summary());
    }
    info!("{}", result.summary());
    Ok(())
}

async fn seed(db: DBService, config: &Config) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    let summary = SeedService::run(&db.pool, &config.admin_password, today).await?;
    info!(
        rooms = summary.rooms_created,
        customers = summary.customers_created,
        bookings = summary.bookings_created,
        "Database seeded"
    );
    Ok(())
}

async fn serve(db: DBService, config: Config) -> anyhow::Result<()> {
    let validation = DatabaseValidator::new(db.pool.clone()).validate().await?;
    if !validation.is_ok() {
        warn!("{}", validation.summary());
    }

    let address = config.bind_address();
    let state = AppState::new(db, config)?;
    let app = router(state);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("Server running on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
