use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mentorhub_core::recommendation::Suggester;
use mentorhub_db::session_cache::{FileSessionCache, MemorySessionCache, SessionCache};
use mentorhub_suggest::{GeminiClient, GeminiSuggester, MockSuggester};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mentorhub_api::config::ServerConfig;
use mentorhub_api::router::build_app_router;
use mentorhub_api::state::AppState;
use mentorhub_api::sweeper::{SessionSweeper, SWEEP_INTERVAL};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mentorhub_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Store ---
    let pool = mentorhub_db::create_pool();
    if config.seed_mock_data {
        let summary = mentorhub_db::seed::seed_mock_data(&pool, chrono::Utc::now())
            .await
            .expect("Failed to seed mock data");
        tracing::info!(
            mentors = summary.mentors,
            mentees = summary.mentees,
            group_sessions = summary.group_sessions,
            webinars = summary.webinars,
            "Mock data seeded"
        );
    }

    // --- Session cache ---
    let session_cache: Arc<dyn SessionCache> = match &config.session_cache_dir {
        Some(dir) => {
            let cache = FileSessionCache::open(dir)
                .await
                .expect("Failed to open session cache directory");
            tracing::info!(dir = %dir.display(), "File session cache ready");
            Arc::new(cache)
        }
        None => Arc::new(MemorySessionCache::new()),
    };

    // --- Suggester ---
    let suggester: Arc<dyn Suggester> = match &config.gemini {
        Some(gemini) => {
            let client = GeminiClient::new(gemini.api_key.clone(), gemini.model.clone())
                .with_base_url(gemini.base_url.clone());
            tracing::info!(model = %client.model(), "Using Gemini suggester");
            Arc::new(GeminiSuggester::new(client))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set, using keyword mock suggester");
            Arc::new(MockSuggester::new())
        }
    };

    // --- Event bus ---
    let event_bus = Arc::new(mentorhub_events::EventBus::default());
    let logger_handle = tokio::spawn(mentorhub_events::EventLogger::run(event_bus.subscribe()));

    // --- Session sweeper ---
    let sweep_cancel = tokio_util::sync::CancellationToken::new();
    let sweeper = SessionSweeper::new(pool.clone(), Arc::clone(&session_cache), SWEEP_INTERVAL);
    let sweep_cancel_clone = sweep_cancel.clone();
    let sweep_handle = tokio::spawn(async move {
        sweeper.run(sweep_cancel_clone).await;
    });

    tracing::info!("Background services started (event logger, session sweeper)");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        suggester,
        session_cache,
        event_bus: Arc::clone(&event_bus),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweep_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), sweep_handle).await;

    // Dropping the last sender closes the channel and stops the logger.
    drop(event_bus);
    if let Ok(Ok(handled)) = tokio::time::timeout(Duration::from_secs(5), logger_handle).await {
        tracing::info!(handled, "Event logger stopped");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
