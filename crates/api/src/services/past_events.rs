use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use infra::models::{EventConvenorRow, EventWinnerRow, FeedbackRow, PastEventRecord};
use infra::repos::PastEventStore;

pub const PAST_EVENTS_MESSAGE: &str = "Past events details retrieved successfully.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvenorView {
    pub name: Option<String>,
    pub department: Option<String>,
    pub yearofstudy: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinnerView {
    pub position: i32,
    pub team_name: Option<String>,
}

/// Flattened view of one past event as returned to admin clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PastEventSummary {
    pub name: String,
    pub about: Option<String>,
    pub date: DateTime<Utc>,
    pub event_type: String,
    pub event_category: Option<String>,
    #[serde(rename = "eventConvenors")]
    pub event_convenors: Vec<ConvenorView>,
    #[serde(rename = "eventWinners")]
    pub event_winners: Vec<WinnerView>,
    pub average_rating: f64,
    pub total_registered_teams: usize,
    pub total_attendance: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PastEventsResponse {
    pub message: String,
    pub data: Vec<PastEventSummary>,
}

/// Load every event `club_id` organized before `now` and summarize each one,
/// keeping the store's order.
pub async fn past_events_for_club(
    store: &dyn PastEventStore,
    club_id: i32,
    now: DateTime<Utc>,
) -> sqlx::Result<Vec<PastEventSummary>> {
    let records = store.past_events_for_club(club_id, now).await?;
    Ok(records.into_iter().map(summarize_event).collect())
}

pub fn summarize_event(record: PastEventRecord) -> PastEventSummary {
    let PastEventRecord {
        event,
        convenors,
        winners,
        feedback,
        registrations,
        team_members,
    } = record;

    PastEventSummary {
        name: event.name,
        about: event.about,
        date: event.date,
        event_type: event.event_type,
        event_category: event.event_category,
        event_convenors: convenors.into_iter().map(convenor_view).collect(),
        event_winners: winners.into_iter().map(winner_view).collect(),
        average_rating: average_rating(&feedback),
        total_registered_teams: registrations.len(),
        total_attendance: team_members.iter().filter(|m| m.is_present).count(),
    }
}

/// Mean rating rounded to two decimals. Feedback without a rating counts
/// as 0; no feedback at all yields 0.
pub fn average_rating(feedback: &[FeedbackRow]) -> f64 {
    if feedback.is_empty() {
        return 0.0;
    }
    let sum: i64 = feedback
        .iter()
        .map(|f| i64::from(f.rating.unwrap_or(0)))
        .sum();
    round2(sum as f64 / feedback.len() as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn convenor_view(row: EventConvenorRow) -> ConvenorView {
    ConvenorView {
        name: non_empty(row.name),
        department: non_empty(row.department),
        yearofstudy: row.yearofstudy.filter(|&y| y != 0),
    }
}

fn winner_view(row: EventWinnerRow) -> WinnerView {
    WinnerView {
        position: row.position,
        team_name: non_empty(row.team_name),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
