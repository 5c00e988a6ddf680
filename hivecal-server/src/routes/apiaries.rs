//! Apiary overview endpoint

use axum::{Json, Router, extract::State, routing::get};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

use hivecal_core::apiary::HiveSource;
use hivecal_core::schedule::next_due;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/apiaries", get(list_apiaries))
}

/// Apiary info returned by API
#[derive(Serialize)]
pub struct ApiaryInfo {
    pub slug: String,
    pub name: String,
    pub hives: usize,
    pub active_hives: usize,
    pub overdue_hives: usize,
    pub next_inspection: Option<NaiveDate>,
    pub feed_url: String,
}

/// GET /apiaries - List apiaries with their inspection status
async fn list_apiaries(State(state): State<AppState>) -> Result<Json<Vec<ApiaryInfo>>, AppError> {
    let today = state.config().today(Utc::now())?;

    let apiaries = state
        .source()
        .apiaries()?
        .into_iter()
        .map(|apiary| {
            let due: Vec<_> = apiary
                .hives
                .iter()
                .filter_map(|hive| next_due(hive, today))
                .collect();

            ApiaryInfo {
                feed_url: format!("/feeds/{}/inspections.ics", apiary.slug),
                hives: apiary.hives.len(),
                active_hives: due.len(),
                overdue_hives: due.iter().filter(|d| d.overdue).count(),
                next_inspection: due.iter().map(|d| d.date).min(),
                slug: apiary.slug,
                name: apiary.name,
            }
        })
        .collect();

    Ok(Json(apiaries))
}
