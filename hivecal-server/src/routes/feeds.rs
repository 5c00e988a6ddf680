//! Calendar feed endpoints

use axum::{
    Router,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use hivecal_core::feed::{Feed, FeedRequest, FeedScope, build_feed};

use crate::routes::AppError;
use crate::state::AppState;

const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/feeds/inspections.ics", get(all_feed))
        .route("/feeds/{slug}/inspections.ics", get(apiary_feed))
}

/// Optional query parameters for feed requests
#[derive(Deserialize)]
pub struct FeedParams {
    /// Days ahead to schedule, overriding horizon_days from config (capped at MAX_HORIZON_DAYS)
    pub horizon: Option<u32>,
}

/// GET /feeds/inspections.ics - Feed covering every apiary
async fn all_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<impl IntoResponse, AppError> {
    let feed = render(&state, FeedScope::All, params)?;
    Ok(calendar_response(feed, "inspections.ics".to_string()))
}

/// GET /feeds/:slug/inspections.ics - Feed for a single apiary
async fn apiary_feed(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<FeedParams>,
) -> Result<impl IntoResponse, AppError> {
    let filename = format!("{}-inspections.ics", slug);
    let feed = render(&state, FeedScope::Apiary(slug), params)?;
    Ok(calendar_response(feed, filename))
}

fn render(state: &AppState, scope: FeedScope, params: FeedParams) -> Result<Feed, AppError> {
    let config = state.config();
    let request = FeedRequest {
        scope,
        now: config.localize(Utc::now())?,
        horizon_days: params.horizon.unwrap_or(config.horizon_days),
    };

    let feed = build_feed(&state.source(), request)?;
    info!(title = %feed.title, events = feed.occurrences.len(), "served feed");
    Ok(feed)
}

fn calendar_response(feed: Feed, filename: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, CALENDAR_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", filename),
            ),
        ],
        feed.body,
    )
}
