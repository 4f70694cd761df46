use keypanel::application::context::AppContext;
use keypanel::config::{self, StorageBackend};
use keypanel::domain::services::clock::SystemClock;
use keypanel::infrastructure::db::postgres::PostgresDatabase;
use keypanel::infrastructure::db::repositories::Repositories;
use keypanel::interface::http;
use keypanel::interface::http::auth::SharedSecretAuthenticator;
use keypanel::interface::http::state::AppState;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("KEYPANEL_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        error!(error = %err, "keypanel stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BoxError> {
    // Step 1: Load configuration.
    let settings = config::load()?;

    // Step 2: Install the Prometheus recorder; the service still runs without it.
    let metrics = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(err) => {
            warn!(error = %err, "metrics recorder not installed");
            None
        }
    };

    // Step 3: Build the key store.
    let repos = match settings.db.backend {
        StorageBackend::Postgres => {
            let db = PostgresDatabase::connect(&settings.db.url, settings.db.max_connections).await?;
            db.migrate().await?;
            Repositories::postgres(Arc::new(db))
        }
        StorageBackend::Memory => {
            warn!("using in-memory key store; keys are lost on restart");
            Repositories::in_memory()
        }
    };

    // Step 4: Assemble shared application context and HTTP state.
    let admin = SharedSecretAuthenticator::from_hex_digest(&settings.admin.token_sha256)?;
    let ctx = AppContext::new(repos, Arc::new(SystemClock), settings.keys.prefix.clone());
    let state = AppState {
        ctx: Arc::new(ctx),
        admin: Arc::new(admin),
        metrics,
    };

    // Step 5: Bind and serve.
    let app = http::app(state);
    let bind_addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, backend = ?settings.db.backend, "keypanel listening");

    axum::serve(listener, app).await?;
    Ok(())
}
