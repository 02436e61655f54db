//! Annotation edit and save endpoints.
//!
//! Edits land in the in-memory session immediately; nothing touches the
//! durable document until the explicit save action, which replaces it
//! with the full current map.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use dspmon_core::Status;

use super::{ApiError, ApiResponse, ResponseMeta};
use crate::middleware::RequestId;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct StatusUpdate {
    status: String,
}

#[derive(Debug, Serialize)]
pub(super) struct StatusUpdateData {
    store_id: String,
    status: Status,
    unsaved_changes: bool,
}

pub(super) async fn update_store_status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(store_id): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> Response {
    let Some(status) = Status::parse(&body.status) else {
        return ApiError::new(
            req_id.0,
            "validation_error",
            format!("unknown status \"{}\"", body.status),
        )
        .into_response();
    };

    let mut session = state.session.lock().await;
    if !session.set_status(&store_id, status) {
        drop(session);
        return ApiError::new(
            req_id.0,
            "not_found",
            format!("unknown store identifier \"{store_id}\""),
        )
        .into_response();
    }

    let data = StatusUpdateData {
        store_id,
        status,
        unsaved_changes: session.is_dirty(),
    };
    drop(session);

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
    .into_response()
}

#[derive(Debug, Serialize)]
pub(super) struct SaveData {
    saved_entries: usize,
    message: &'static str,
}

pub(super) async fn save_annotations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    let mut session = state.session.lock().await;

    match state.store.save(session.map()) {
        Ok(()) => {
            session.mark_saved();
            let saved_entries = session.map().len();
            drop(session);

            tracing::info!(saved_entries, "annotation document saved");
            Json(ApiResponse {
                data: SaveData {
                    saved_entries,
                    message: "status changes saved",
                },
                meta: ResponseMeta::new(req_id.0),
            })
            .into_response()
        }
        Err(e) => {
            drop(session);
            tracing::error!(error = %e, "failed to save annotation document");
            ApiError::new(req_id.0, "internal_error", "failed to save status changes")
                .into_response()
        }
    }
}
