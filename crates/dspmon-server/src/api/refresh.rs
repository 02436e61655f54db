//! Manual refresh-now endpoint: drop the feed cache and reload.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ApiResponse, ResponseMeta};
use crate::middleware::RequestId;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub(super) struct RefreshData {
    refreshed: bool,
    total_stores: usize,
    last_refreshed_at: Option<DateTime<Utc>>,
    feed_error: Option<String>,
    /// Unsaved in-memory edits always survive a refresh; this flag lets
    /// the page warn the operator that a save is still pending.
    unsaved_changes: bool,
}

pub(super) async fn refresh_now(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    state.invalidate_feed().await;
    let outcome = state.load_feed().await;
    let unsaved_changes = state.session.lock().await.is_dirty();

    let data = RefreshData {
        refreshed: outcome.error.is_none(),
        total_stores: outcome.snapshot.as_ref().map_or(0, |s| s.table.len()),
        last_refreshed_at: outcome.snapshot.as_ref().map(|s| s.fetched_at),
        feed_error: outcome.error,
        unsaved_changes,
    };

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
    .into_response()
}
