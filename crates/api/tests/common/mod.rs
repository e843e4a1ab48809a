#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use api::{AppConfig, AppState};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use infra::models::{
    EventConvenorRow, EventRegistrationRow, EventRow, EventWinnerRow, FeedbackRow,
    PastEventRecord, TeamMemberRow,
};
use infra::repos::PastEventStore;
use tower::ServiceExt;

/// In-memory store that applies the same club/date filter as the
/// Postgres repository.
#[derive(Default)]
pub struct FakeStore {
    events: Vec<(Vec<i32>, PastEventRecord)>,
    fail: bool,
    calls: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_event(mut self, club_ids: &[i32], record: PastEventRecord) -> Self {
        self.events.push((club_ids.to_vec(), record));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PastEventStore for FakeStore {
    async fn past_events_for_club(
        &self,
        club_id: i32,
        before: DateTime<Utc>,
    ) -> sqlx::Result<Vec<PastEventRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(self
            .events
            .iter()
            .filter(|(clubs, r)| clubs.contains(&club_id) && r.event.date < before)
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn ping(&self) -> sqlx::Result<()> {
        if self.fail {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

pub fn app_state(store: Arc<FakeStore>) -> AppState {
    AppState::with_store(store, AppConfig::default())
}

/// Issue a GET against a fresh router and return status plus raw body.
pub async fn get(state: AppState, uri: &str) -> (StatusCode, Vec<u8>) {
    let app = api::app::build_router(state);
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

pub async fn get_json(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(state, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

pub fn event(id: i32, name: &str, days_ago: i64) -> PastEventRecord {
    PastEventRecord::new(EventRow {
        id,
        name: name.to_string(),
        about: Some(format!("About {name}")),
        date: Utc::now() - Duration::days(days_ago),
        event_type: "competition".to_string(),
        event_category: Some("technical".to_string()),
    })
}

pub fn feedback(event_id: i32, ratings: &[Option<i32>]) -> Vec<FeedbackRow> {
    ratings
        .iter()
        .enumerate()
        .map(|(i, rating)| FeedbackRow {
            id: i as i32 + 1,
            event_id,
            rating: *rating,
        })
        .collect()
}

pub fn convenor(
    event_id: i32,
    name: Option<&str>,
    department: Option<&str>,
    yearofstudy: Option<i32>,
) -> EventConvenorRow {
    EventConvenorRow {
        id: 1,
        event_id,
        user_id: name.map(|_| 1),
        name: name.map(str::to_string),
        department: department.map(str::to_string),
        yearofstudy,
    }
}

pub fn winner(event_id: i32, position: i32, team_name: Option<&str>) -> EventWinnerRow {
    EventWinnerRow {
        id: position,
        event_id,
        team_id: team_name.map(|_| position),
        position,
        team_name: team_name.map(str::to_string),
    }
}

pub fn registrations(event_id: i32, count: i32) -> Vec<EventRegistrationRow> {
    (1..=count)
        .map(|id| EventRegistrationRow {
            id,
            event_id,
            team_id: Some(id),
        })
        .collect()
}

pub fn members(event_id: i32, presence: &[bool]) -> Vec<TeamMemberRow> {
    presence
        .iter()
        .enumerate()
        .map(|(i, present)| TeamMemberRow {
            id: i as i32 + 1,
            event_id,
            team_id: Some(1),
            user_id: Some(i as i32 + 1),
            is_present: *present,
        })
        .collect()
}
