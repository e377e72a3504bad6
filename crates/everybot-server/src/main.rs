//! EveryBot — chat front-end answering from retrieved citations.

use std::sync::Arc;

use everybot_core::EverybotConfig;
use everybot_server::{build_router, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--help" | "-h" | "help" => {
                println!("EveryBot — chat front-end with retrieval citations");
                println!();
                println!("Usage: everybot");
                println!();
                println!("Environment:");
                println!("  OPENAI_API_KEY           Completion API key (required for /api/chat)");
                println!("  OPENAI_MODEL             Completion model (default gpt-4o-mini)");
                println!("  OPENAI_BASE_URL          Completion API root (default https://api.openai.com/v1)");
                println!("  SEARCH_ENDPOINT          Search service URL (default http://localhost:8000/search)");
                println!("  PORT                     Listen port (default 3000)");
                println!("  ALLOWED_ORIGINS          CORS origins, comma-separated or * (default *)");
                println!("  SEARCH_TIMEOUT_SECS      Search request timeout (default 30)");
                println!("  COMPLETION_TIMEOUT_SECS  Completion request timeout (default 120)");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'everybot help' for usage.", arg);
                std::process::exit(1);
            }
        }
    }

    let config = EverybotConfig::from_env()?;
    let port = config.port;

    info!("Search endpoint: {}", config.search.endpoint);
    info!("Completion model: {}", config.completion.model);
    if config.completion.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; /api/chat will answer 503");
    }

    let state = Arc::new(AppState::from_config(config)?);
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("EveryBot server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
