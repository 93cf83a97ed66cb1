//! Bookshelf HTTP server entry point.
//!
//! # Responsibility
//! - Load configuration, start logging, open the database and serve the API.
//! - Abort before serving traffic when any bootstrap step fails.

use bookshelf_api::{build_router, serve, LISTEN_PORT};
use bookshelf_core::db::{open_db, share, DbError};
use bookshelf_core::{
    core_version, flush_logging, init_logging, load_env_file, AppConfig, BookService, EnvFile,
    SqliteBookRepository,
};
use log::{error, info, warn};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::process::ExitCode;
use tokio::net::TcpListener;

#[derive(Debug)]
enum StartupError {
    Database(DbError),
    Bind(SocketAddr, std::io::Error),
    Serve(std::io::Error),
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Database(err) => write!(f, "database bootstrap failed: {err}"),
            Self::Bind(addr, err) => write!(f, "failed to bind {addr}: {err}"),
            Self::Serve(err) => write!(f, "server failed: {err}"),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_file = load_env_file();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Logging is not up yet, so stderr is the only channel for this failure.
    if let Err(err) = init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match env_file {
        EnvFile::Loaded(path) => info!(
            "event=env_file module=server status=ok path={}",
            path.display()
        ),
        EnvFile::Missing(reason) => warn!(
            "event=env_file module=server status=missing fallback=process_env reason={}",
            reason
        ),
    }

    let exit_code = match run(config).await {
        Ok(()) => {
            info!("event=server_exit module=server status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=server_exit module=server status=error error={}", err);
            ExitCode::FAILURE
        }
    };

    // The logger buffers; nothing reaches stderr or the log file without this.
    flush_logging();
    exit_code
}

async fn run(config: AppConfig) -> Result<(), StartupError> {
    info!(
        "event=server_bootstrap module=server status=start version={} db_path={}",
        core_version(),
        config.db_path.display()
    );

    let conn = open_db(&config.db_path).map_err(StartupError::Database)?;
    let service = BookService::new(SqliteBookRepository::new(share(conn)));
    let router = build_router(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], LISTEN_PORT));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| StartupError::Bind(addr, err))?;

    serve(listener, router).await.map_err(StartupError::Serve)
}
