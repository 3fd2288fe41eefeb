use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use graph_core::{GraphModel, InMemoryModel};
use graph_pg::{PgEngine, PgModel};
use graph_server::app;
use graph_server::bootstrap_error::BootstrapError;
use graph_server::config::{Backend, Config};

/// Serves the acyclic graph store's HTTP surface for a single named service.
#[derive(Debug, Parser)]
#[command(name = "graph-server")]
struct Cli {
    /// Service name; config is read from `config/services/<name>/config.yaml`.
    service_name: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(&cli.service_name).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(service_name: &str) -> Result<(), BootstrapError> {
    let base_dir = std::env::current_dir().map_err(|e| BootstrapError::Bind {
        addr: "<cwd>".to_owned(),
        detail: e.to_string(),
    })?;
    let config = Config::load(&base_dir, service_name)?;

    let model: Arc<dyn GraphModel> = match config.db {
        Backend::Mem => Arc::new(InMemoryModel::new()),
        Backend::Pg => {
            // Config::load already rejects `db: pg` without a postgres section.
            let pg_config = config.postgres.as_ref().ok_or_else(|| {
                BootstrapError::Connect("missing postgres configuration".to_owned())
            })?;
            let engine = PgEngine::connect(pg_config)
                .await
                .map_err(|e| BootstrapError::Connect(e.to_string()))?;
            Arc::new(PgModel::new(engine))
        }
    };

    let router = app::build_router(model);
    let addr = format!("{}:{}", config.api.host, config.api.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BootstrapError::Bind {
            addr: addr.clone(),
            detail: e.to_string(),
        })?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, router)
        .await
        .map_err(|e| BootstrapError::Serve(e.to_string()))
}
