use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use jotter::cli::{AdminCommands, UserCommands, run_init, run_user_add, run_user_list};
use jotter::config::{
    DEFAULT_DATABASE_URL, DEFAULT_RETENTION_LIMIT, RetentionPolicy, ServerConfig, SessionConfig,
};
use jotter::server::{AppState, ImageBank, create_router};
use jotter::store::{SqliteSessionStore, SqliteStore, Store};

const SESSION_CLEANUP_PERIOD: Duration = Duration::from_secs(60 * 60);

#[derive(Parser)]
#[command(name = "jotter")]
#[command(about = "A small note-taking web server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, default_value = "4999")]
        port: u16,

        /// Database URL (sqlite://path or a file path)
        #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
        database_url: String,

        /// Secret used to sign session cookies
        #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
        secret_key: String,

        /// Directory served under /static; images are picked from its img/ subdirectory
        #[arg(long, default_value = "./static")]
        static_dir: PathBuf,

        /// Account whose notes are purged once they exceed --retention-limit
        #[arg(long, env = "RETENTION_ACCOUNT_ID")]
        retention_account_id: Option<i64>,

        /// Maximum notes the retention account may hold
        #[arg(long, default_value_t = DEFAULT_RETENTION_LIMIT)]
        retention_limit: usize,

        /// Only send the session cookie over HTTPS
        #[arg(long)]
        secure_cookies: bool,

        /// Days of inactivity before a session expires
        #[arg(long, default_value = "7")]
        session_days: u64,
    },
}

async fn run_serve(config: ServerConfig) -> anyhow::Result<()> {
    let db_path = config.db_path()?;
    let store = Arc::new(SqliteStore::new(&db_path)?);
    store.initialize()?;
    info!("Using database {}", db_path.display());

    if let Some(account_id) = config.retention.account_id {
        match store.get_user(account_id)? {
            Some(user) => info!(
                "Retention cap of {} notes applies to '{}'",
                config.retention.max_notes, user.name
            ),
            None => tracing::warn!("Retention account {account_id} does not exist"),
        }
    }

    let state = Arc::new(AppState {
        store: store.clone(),
        images: ImageBank::load(&config.image_dir())?,
        retention: config.retention,
        static_dir: config.static_dir.clone(),
    });

    let sessions = SqliteSessionStore::new(store);
    let cleanup = tokio::spawn(
        sessions
            .clone()
            .continuously_delete_expired(SESSION_CLEANUP_PERIOD),
    );

    let app = create_router(state, sessions, &config.session)?;
    let addr = config.socket_addr()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    cleanup.abort();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("jotter=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Admin { command } => match command {
            AdminCommands::Init { database_url } => run_init(&database_url)?,
            AdminCommands::User { command } => match command {
                UserCommands::Add {
                    database_url,
                    name,
                    password,
                    non_interactive,
                } => run_user_add(database_url, name, password, non_interactive)?,
                UserCommands::List { database_url, json } => run_user_list(database_url, json)?,
            },
        },
        Commands::Serve {
            host,
            port,
            database_url,
            secret_key,
            static_dir,
            retention_account_id,
            retention_limit,
            secure_cookies,
            session_days,
        } => {
            let config = ServerConfig {
                host,
                port,
                database_url,
                static_dir,
                session: SessionConfig {
                    secret: secret_key,
                    secure: secure_cookies,
                    inactivity_timeout: Duration::from_secs(session_days * 24 * 60 * 60),
                },
                retention: RetentionPolicy {
                    account_id: retention_account_id,
                    max_notes: retention_limit,
                },
            };

            run_serve(config).await?;
        }
    }

    Ok(())
}
