use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use crate::error::AppError;
use crate::services::past_events::{self, PastEventsResponse, PAST_EVENTS_MESSAGE};
use crate::state::AppState;

/// `GET /admin/events/past?club_id=<n>`
///
/// The query string is taken as raw pairs so a repeated `club_id` reaches
/// validation instead of failing in the extractor.
pub async fn get_past_events_by_club(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<PastEventsResponse>, AppError> {
    let values: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key == "club_id")
        .map(|(_, value)| value.as_str())
        .collect();
    tracing::info!(club_id = ?values, "club_id from query");

    let club_id = parse_club_id(&values)?;
    let data = past_events::past_events_for_club(state.events(), club_id, Utc::now()).await?;

    tracing::debug!(club_id, count = data.len(), "past events loaded");

    Ok(Json(PastEventsResponse {
        message: PAST_EVENTS_MESSAGE.to_string(),
        data,
    }))
}

/// Validate every `club_id` value from the query string. Exactly one
/// non-blank integer is accepted; more than one value is never a number.
pub fn parse_club_id(values: &[&str]) -> Result<i32, AppError> {
    match values {
        [] => Err(AppError::MissingClubId),
        [raw] => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(AppError::MissingClubId);
            }
            raw.parse().map_err(|_| AppError::InvalidClubId)
        }
        _ => Err(AppError::InvalidClubId),
    }
}
