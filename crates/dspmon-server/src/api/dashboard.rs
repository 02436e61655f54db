//! The dashboard view model: rows, summary counts, filters, advisories.
//!
//! `build_view` is a pure function over the feed snapshot, the annotation
//! session, and the filter — it never mutates either input, so filtering
//! and rendering are independently testable without HTTP.

use std::collections::BTreeSet;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dspmon_annotations::AnnotationSession;
use dspmon_core::Status;
use dspmon_feed::{FeedSnapshot, ResolutionAdvisory};

use super::{ApiError, ApiResponse, ResponseMeta};
use crate::middleware::RequestId;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub(super) struct DashboardQuery {
    /// Comma-separated status labels to keep, e.g. `status=Dormant,Fixed`.
    status: Option<String>,
    /// Comma-separated inactive-platform names to keep.
    platform: Option<String>,
}

/// Parsed multi-select filters. Empty sets mean "keep everything".
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ViewFilter {
    statuses: Vec<Status>,
    platforms: Vec<String>,
}

impl ViewFilter {
    fn from_query(query: &DashboardQuery) -> Result<Self, String> {
        let mut statuses = Vec::new();
        if let Some(raw) = &query.status {
            for label in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let status = Status::parse(label)
                    .ok_or_else(|| format!("unknown status \"{label}\""))?;
                statuses.push(status);
            }
        }

        let platforms = query
            .platform
            .iter()
            .flat_map(|raw| raw.split(','))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        Ok(Self {
            statuses,
            platforms,
        })
    }

    #[cfg(test)]
    fn with_statuses(statuses: Vec<Status>) -> Self {
        Self {
            statuses,
            platforms: Vec::new(),
        }
    }

    fn keeps(&self, status: Status, platforms: &[String]) -> bool {
        let status_ok = self.statuses.is_empty() || self.statuses.contains(&status);
        let platform_ok = self.platforms.is_empty()
            || platforms.iter().any(|p| self.platforms.contains(p));
        status_ok && platform_ok
    }
}

/// One rendered store row.
#[derive(Debug, Serialize)]
pub(crate) struct DashboardRow {
    /// 1-based position in the unfiltered feed.
    pub position: usize,
    pub store_id: String,
    pub store_name: String,
    pub company: String,
    /// Display form: the raw cell, `"None"` when blank, `"N/A"` when the
    /// feed resolved no inactive-platform column.
    pub inactive_platforms: String,
    /// Deep link into the external store-management page.
    pub store_url: String,
    pub status: Status,
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardView {
    pub total_stores: usize,
    pub shown_stores: usize,
    pub last_refreshed_at: Option<DateTime<Utc>>,
    pub inactive_platforms_available: bool,
    pub unsaved_changes: bool,
    pub feed_error: Option<String>,
    pub annotation_error: Option<String>,
    pub advisories: Vec<ResolutionAdvisory>,
    /// The fixed dropdown option set, in display order.
    pub status_options: Vec<&'static str>,
    /// Distinct inactive-platform names across the whole feed, sorted;
    /// the option list for the platform multi-select.
    pub platform_options: Vec<String>,
    pub rows: Vec<DashboardRow>,
}

pub(super) async fn get_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let filter = match ViewFilter::from_query(&query) {
        Ok(filter) => filter,
        Err(message) => {
            return ApiError::new(req_id.0, "validation_error", message).into_response()
        }
    };

    let outcome = state.load_feed().await;
    let session = state.session.lock().await;
    let view = build_view(
        outcome.snapshot.as_ref(),
        &session,
        &filter,
        &state.config.store_manager_base_url,
        outcome.error,
        state.annotation_load_error.as_deref().map(ToOwned::to_owned),
    );
    drop(session);

    Json(ApiResponse {
        data: view,
        meta: ResponseMeta::new(req_id.0),
    })
    .into_response()
}

/// Compose the view model from a snapshot, the session, and the filters.
pub(crate) fn build_view(
    snapshot: Option<&FeedSnapshot>,
    session: &AnnotationSession,
    filter: &ViewFilter,
    store_manager_base_url: &str,
    feed_error: Option<String>,
    annotation_error: Option<String>,
) -> DashboardView {
    let mut platform_options = BTreeSet::new();
    let mut candidates: Vec<(DashboardRow, Vec<String>)> = Vec::new();
    let mut total_stores = 0;

    if let Some(snap) = snapshot {
        total_stores = snap.table.len();
        for row in 0..snap.table.len() {
            let store_id = snap.store_id(row);

            let store_name = snap
                .mapping
                .name
                .and_then(|c| snap.table.cell(row, c))
                .filter(|v| !v.is_empty())
                .map_or_else(|| format!("Store {row}"), ToOwned::to_owned);

            let company = snap
                .mapping
                .company
                .and_then(|c| snap.table.cell(row, c))
                .filter(|v| !v.is_empty())
                .map_or_else(|| "N/A".to_string(), ToOwned::to_owned);

            let platform_cell = snap
                .mapping
                .inactive_platforms
                .and_then(|c| snap.table.cell(row, c));
            let platforms = split_platforms(platform_cell);
            platform_options.extend(platforms.iter().cloned());

            let inactive_platforms = match (snap.mapping.inactive_platforms, platform_cell) {
                (None, _) => "N/A".to_string(),
                (Some(_), Some(cell)) if !cell.is_empty() => cell.to_string(),
                (Some(_), _) => "None".to_string(),
            };

            let status = session.status_of(&store_id);
            let store_url = format!("{store_manager_base_url}/stores/{store_id}");

            candidates.push((
                DashboardRow {
                    position: row + 1,
                    store_id,
                    store_name,
                    company,
                    inactive_platforms,
                    store_url,
                    status,
                },
                platforms,
            ));
        }
    }

    let rows: Vec<DashboardRow> = candidates
        .into_iter()
        .filter(|(row, platforms)| filter.keeps(row.status, platforms))
        .map(|(row, _)| row)
        .collect();

    DashboardView {
        total_stores,
        shown_stores: rows.len(),
        last_refreshed_at: snapshot.map(|s| s.fetched_at),
        inactive_platforms_available: snapshot
            .is_some_and(|s| s.mapping.inactive_platforms.is_some()),
        unsaved_changes: session.is_dirty(),
        feed_error,
        annotation_error,
        advisories: snapshot.map(|s| s.advisories.clone()).unwrap_or_default(),
        status_options: Status::ALL.iter().map(|s| s.as_str()).collect(),
        platform_options: platform_options.into_iter().collect(),
        rows,
    }
}

/// Split a comma-delimited inactive-platform cell into trimmed names.
fn split_platforms(cell: Option<&str>) -> Vec<String> {
    cell.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dspmon_feed::{resolve_columns, FeedTable};

    fn snapshot_from_csv(body: &str) -> FeedSnapshot {
        let table = FeedTable::parse(body).expect("parse csv");
        let (mapping, advisories) = resolve_columns(table.headers());
        FeedSnapshot {
            table,
            mapping,
            advisories,
            fetched_at: Utc::now(),
        }
    }

    fn seeded_session(snapshot: &FeedSnapshot) -> AnnotationSession {
        let mut session = AnnotationSession::default();
        let ids = snapshot.store_ids();
        session.seed_defaults(ids.iter().map(String::as_str));
        session
    }

    const FEED: &str = "\
store_id,store_name,company_name,inactive_dsps
S1,Alpha Mart,Alpha Holdings,\"DoorDash, UberEats\"
S2,Beta Deli,Beta LLC,
S3,Gamma Stop,Gamma Inc,GrubHub
";

    #[test]
    fn renders_one_row_per_data_row() {
        let snap = snapshot_from_csv(FEED);
        let session = seeded_session(&snap);
        let view = build_view(
            Some(&snap),
            &session,
            &ViewFilter::default(),
            "https://stores.example.com",
            None,
            None,
        );

        assert_eq!(view.total_stores, 3);
        assert_eq!(view.shown_stores, 3);
        assert_eq!(view.rows.len(), 3, "no silent row drops");
        assert!(view.advisories.is_empty());
        assert!(view.inactive_platforms_available);
    }

    #[test]
    fn row_fields_come_from_resolved_columns() {
        let snap = snapshot_from_csv(FEED);
        let session = seeded_session(&snap);
        let view = build_view(
            Some(&snap),
            &session,
            &ViewFilter::default(),
            "https://stores.example.com",
            None,
            None,
        );

        let row = &view.rows[0];
        assert_eq!(row.position, 1);
        assert_eq!(row.store_id, "S1");
        assert_eq!(row.store_name, "Alpha Mart");
        assert_eq!(row.company, "Alpha Holdings");
        assert_eq!(row.inactive_platforms, "DoorDash, UberEats");
        assert_eq!(row.store_url, "https://stores.example.com/stores/S1");
        assert_eq!(row.status, Status::Unset);
    }

    #[test]
    fn blank_platform_cell_displays_as_none() {
        let snap = snapshot_from_csv(FEED);
        let session = seeded_session(&snap);
        let view = build_view(
            Some(&snap),
            &session,
            &ViewFilter::default(),
            "https://stores.example.com",
            None,
            None,
        );
        assert_eq!(view.rows[1].inactive_platforms, "None");
    }

    #[test]
    fn missing_platform_column_displays_as_not_available() {
        let snap = snapshot_from_csv("store_id,store_name,company_name\nS1,Alpha,AlphaCo\n");
        let session = seeded_session(&snap);
        let view = build_view(
            Some(&snap),
            &session,
            &ViewFilter::default(),
            "https://stores.example.com",
            None,
            None,
        );

        assert!(!view.inactive_platforms_available);
        assert_eq!(view.rows[0].inactive_platforms, "N/A");
        assert!(view.platform_options.is_empty());
    }

    #[test]
    fn platform_options_are_distinct_and_sorted() {
        let snap = snapshot_from_csv(FEED);
        let session = seeded_session(&snap);
        let view = build_view(
            Some(&snap),
            &session,
            &ViewFilter::default(),
            "https://stores.example.com",
            None,
            None,
        );
        assert_eq!(view.platform_options, ["DoorDash", "GrubHub", "UberEats"]);
    }

    #[test]
    fn status_filter_keeps_exactly_matching_rows() {
        let snap = snapshot_from_csv(FEED);
        let mut session = seeded_session(&snap);
        session.set_status("S2", Status::Dormant);

        let view = build_view(
            Some(&snap),
            &session,
            &ViewFilter::with_statuses(vec![Status::Dormant]),
            "https://stores.example.com",
            None,
            None,
        );

        assert_eq!(view.total_stores, 3);
        assert_eq!(view.shown_stores, 1);
        assert_eq!(view.rows[0].store_id, "S2");
    }

    #[test]
    fn empty_filter_returns_all_rows() {
        let snap = snapshot_from_csv(FEED);
        let session = seeded_session(&snap);
        let view = build_view(
            Some(&snap),
            &session,
            &ViewFilter::default(),
            "https://stores.example.com",
            None,
            None,
        );
        assert_eq!(view.rows.len(), view.total_stores);
    }

    #[test]
    fn platform_filter_matches_any_listed_platform() {
        let snap = snapshot_from_csv(FEED);
        let session = seeded_session(&snap);
        let filter = ViewFilter::from_query(&DashboardQuery {
            status: None,
            platform: Some("UberEats".to_string()),
        })
        .expect("filter");

        let view = build_view(
            Some(&snap),
            &session,
            &filter,
            "https://stores.example.com",
            None,
            None,
        );
        assert_eq!(view.shown_stores, 1);
        assert_eq!(view.rows[0].store_id, "S1");
    }

    #[test]
    fn filtering_does_not_mutate_the_session() {
        let snap = snapshot_from_csv(FEED);
        let mut session = seeded_session(&snap);
        session.set_status("S1", Status::Fixed);

        let before = session.map().clone();
        let _ = build_view(
            Some(&snap),
            &session,
            &ViewFilter::with_statuses(vec![Status::Dormant]),
            "https://stores.example.com",
            None,
            None,
        );
        assert_eq!(session.map(), &before);
    }

    #[test]
    fn missing_snapshot_renders_error_state() {
        let session = AnnotationSession::default();
        let view = build_view(
            None,
            &session,
            &ViewFilter::default(),
            "https://stores.example.com",
            Some("error loading data: boom".to_string()),
            None,
        );

        assert_eq!(view.total_stores, 0);
        assert!(view.rows.is_empty());
        assert_eq!(
            view.feed_error.as_deref(),
            Some("error loading data: boom")
        );
        assert!(view.last_refreshed_at.is_none());
    }

    #[test]
    fn fallback_headers_surface_advisories_in_view() {
        let snap = snapshot_from_csv("a,b,c\nS1,Alpha,AlphaCo\n");
        let session = seeded_session(&snap);
        let view = build_view(
            Some(&snap),
            &session,
            &ViewFilter::default(),
            "https://stores.example.com",
            None,
            None,
        );
        assert_eq!(view.advisories.len(), 3);
    }

    #[test]
    fn query_with_unknown_status_label_is_rejected() {
        let query = DashboardQuery {
            status: Some("Dormant,Bogus".to_string()),
            platform: None,
        };
        let result = ViewFilter::from_query(&query);
        assert!(result.is_err(), "expected error, got: {result:?}");
    }

    #[test]
    fn query_parsing_ignores_blank_segments() {
        let query = DashboardQuery {
            status: Some(" ,Dormant, ".to_string()),
            platform: Some("DoorDash, ,".to_string()),
        };
        let filter = ViewFilter::from_query(&query).expect("filter");
        assert_eq!(filter.statuses, [Status::Dormant]);
        assert_eq!(filter.platforms, ["DoorDash"]);
    }
}
