use msc_admin_api::{
    AppState, ROLE_NAMES,
    config::{AppConfig, Env},
    create_router,
    repository::{PostgresRepository, RepositoryState},
    storage::{S3StorageClient, StorageState},
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Asynchronous entry point: loads configuration fail-fast, wires logging,
/// database, storage and the role seed, then hands the router to the server.
#[tokio::main]
async fn main() {
    // Load .env settings before configuration is read.
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // RUST_LOG takes priority; the fallback keeps local development chatty.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "msc_admin_api=debug,tower_http=info,axum=trace".into());

    // Pretty output for humans locally, JSON for log aggregation in production.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.db_url)
        .await
        .expect("FATAL: Failed to connect to Postgres. Check DATABASE_URL.");

    let repo = Arc::new(PostgresRepository::new(pool)) as RepositoryState;

    // Role vocabulary seed. Idempotent, so safe on every start.
    repo.seed_roles(ROLE_NAMES)
        .await
        .expect("FATAL: Failed to seed roles.");

    let s3_client = S3StorageClient::new(
        &config.s3_endpoint,
        &config.s3_region,
        &config.s3_key,
        &config.s3_secret,
        &config.s3_bucket,
    )
    .await;

    // Local convenience: provision the MinIO bucket on first run.
    if config.env == Env::Local {
        use msc_admin_api::storage::StorageService;
        s3_client.ensure_bucket_exists().await;
    }

    let storage = Arc::new(s3_client) as StorageState;

    let port = config.port;
    let app_state = AppState {
        repo,
        storage,
        config,
    };

    let app = create_router(app_state);

    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("FATAL: Failed to bind listener.");

    tracing::info!("Listening on 0.0.0.0:{port}");
    tracing::info!("API documentation (Swagger UI) at: http://localhost:{port}/swagger-ui");

    axum::serve(listener, app).await.unwrap();
}
