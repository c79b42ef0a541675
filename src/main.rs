//! Hatflow server entry point.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use hatflow::adapters::ai::{AnthropicEngine, AnthropicEngineConfig};
use hatflow::adapters::http::{app_router, decisions::DecisionHandlers};
use hatflow::adapters::postgres::{PostgresDecisionRepository, PostgresEventLog};
use hatflow::application::handlers::decision::{
    CreateDecisionHandler, DeleteDecisionHandler, GenerateQuestionsHandler,
    GenerateSummaryHandler, GetDecisionHandler, GetEventsHandler, ListDecisionsHandler,
    SaveResponsesHandler, SkipStageHandler, UpdateDecisionHandler,
};
use hatflow::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hatflow=info")),
        )
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let repository = Arc::new(PostgresDecisionRepository::new(pool.clone()));
    let event_log = Arc::new(PostgresEventLog::new(pool));

    let engine_config = AnthropicEngineConfig::new(config.ai.api_key())
        .with_model(config.ai.model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(config.ai.timeout())
        .with_max_tokens(config.ai.max_tokens);
    let engine = Arc::new(AnthropicEngine::new(engine_config)?);

    let handlers = DecisionHandlers {
        create: Arc::new(CreateDecisionHandler::new(repository.clone())),
        list: Arc::new(ListDecisionsHandler::new(repository.clone())),
        get: Arc::new(GetDecisionHandler::new(repository.clone())),
        update: Arc::new(UpdateDecisionHandler::new(repository.clone())),
        delete: Arc::new(DeleteDecisionHandler::new(
            repository.clone(),
            event_log.clone(),
        )),
        get_events: Arc::new(GetEventsHandler::new(
            repository.clone(),
            event_log.clone(),
        )),
        generate_questions: Arc::new(GenerateQuestionsHandler::new(
            repository.clone(),
            engine.clone(),
        )),
        save_responses: Arc::new(SaveResponsesHandler::new(
            repository.clone(),
            event_log.clone(),
            engine.clone(),
        )),
        skip_stage: Arc::new(SkipStageHandler::new(
            repository.clone(),
            event_log.clone(),
            engine.clone(),
        )),
        generate_summary: Arc::new(GenerateSummaryHandler::new(
            repository,
            event_log,
            engine,
        )),
    };

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "Hatflow listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app_router(handlers)).await?;

    Ok(())
}
