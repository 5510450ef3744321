//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{DbAdapter, OpenAiSentimentAdapter, SentimentChartBuilder},
    classifier::SentimentClassifier,
    config::Config,
    error::ApiError,
    web::{dashboard_handler, rest::ApiDoc, state::AppState, ws_handler},
};
use async_openai::{config::OpenAIConfig, Client};
use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let db_adapter = Arc::new(DbAdapter::new(db_pool.clone()));
    info!("Running database migrations...");
    db_adapter.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Initialize the Sentiment Classifier ---
    // Without an API key the service runs on the keyword scorer alone.
    let remote_classifier = match config.openai_api_key.as_ref() {
        Some(api_key) => {
            info!(
                "Remote sentiment classification enabled (model: {})",
                config.sentiment_model
            );
            let openai_config = OpenAIConfig::new().with_api_key(api_key);
            let openai_client = Client::with_config(openai_config);
            Some(Arc::new(OpenAiSentimentAdapter::new(
                openai_client,
                config.sentiment_model.clone(),
            )) as Arc<dyn feedback_core::ports::SentimentAnalysisService>)
        }
        None => {
            info!("No OPENAI_API_KEY configured; using the keyword scorer only");
            None
        }
    };
    let classifier = SentimentClassifier::new(remote_classifier, config.classify_timeout);

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        store: db_adapter,
        classifier,
        charts: Arc::new(SentimentChartBuilder::new()),
        events: AppState::event_channel(),
    });

    // Dashboards connect from arbitrary hosts, so CORS stays permissive.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // --- 5. Create the Web Router ---
    let api_router = Router::new()
        .route("/ws", get(ws_handler))
        .route("/dashboard", get(dashboard_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
