mod api;
mod middleware;
mod scheduler;
mod state;

use tracing_subscriber::EnvFilter;

use dspmon_annotations::{AnnotationSession, AnnotationStore};
use dspmon_feed::FeedClient;

use crate::api::build_app;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dspmon_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let feed = FeedClient::new(
        &config.feed_url,
        config.feed_request_timeout_secs,
        &config.feed_user_agent,
    )?;
    let store = AnnotationStore::new(config.annotations_path.clone());

    let (session, annotation_load_error) = match store.load() {
        Ok(map) => {
            tracing::info!(entries = map.len(), "loaded annotation document");
            (AnnotationSession::new(map), None)
        }
        Err(e) => {
            tracing::warn!(error = %e, "annotation document unreadable; starting with empty annotations");
            (
                AnnotationSession::default(),
                Some(format!("annotation document could not be loaded: {e}")),
            )
        }
    };

    let bind_addr = config.bind_addr;
    let state = AppState::new(config, feed, store, session, annotation_load_error);

    // Warm the cache so the first dashboard request is served from memory.
    let outcome = state.load_feed().await;
    if let Some(error) = outcome.error {
        tracing::warn!(%error, "initial feed load failed; dashboard will show an error state");
    }

    let _scheduler = scheduler::build_scheduler(state.clone()).await?;

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %bind_addr, "dspmon server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
