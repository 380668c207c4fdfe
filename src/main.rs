// src/main.rs

use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use trivia_api::config::Config;
use trivia_api::db::{self, Backend};
use trivia_api::routes;
use trivia_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "trivia.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let backend = Backend::from_url(&config.database_url)
        .ok_or("DATABASE_URL must start with postgres:// or sqlite:")?;

    // Initialize Database Pool with Retry
    let pool = db::connect(&config.database_url).await.map_err(|e| {
        tracing::error!("Failed to connect to database: {}", e);
        e
    })?;
    tracing::info!("Database connected ({:?})...", backend);

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    db::migrate(&pool, backend).await?;
    tracing::info!("Migrations applied successfully.");

    let addr = config.listen_addr();

    // Create AppState
    let state = AppState { pool, config };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    // Start the server
    axum::serve(listener, app).await?;

    Ok(())
}
