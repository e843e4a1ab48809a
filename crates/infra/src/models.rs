use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct EventRow {
    pub id: i32,
    pub name: String,
    pub about: Option<String>,
    pub date: DateTime<Utc>,
    pub event_type: String,
    pub event_category: Option<String>,
}

/// Convenor link joined with the convenor's user profile.
///
/// `user_id` is `None` when the user was deleted; the profile columns are
/// then all `None` as well.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct EventConvenorRow {
    pub id: i32,
    pub event_id: i32,
    pub user_id: Option<i32>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub yearofstudy: Option<i32>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct EventWinnerRow {
    pub id: i32,
    pub event_id: i32,
    pub team_id: Option<i32>,
    pub position: i32,
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct FeedbackRow {
    pub id: i32,
    pub event_id: i32,
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct EventRegistrationRow {
    pub id: i32,
    pub event_id: i32,
    pub team_id: Option<i32>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TeamMemberRow {
    pub id: i32,
    pub event_id: i32,
    pub team_id: Option<i32>,
    pub user_id: Option<i32>,
    pub is_present: bool,
}

/// An event together with every association the past-events view needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PastEventRecord {
    pub event: EventRow,
    pub convenors: Vec<EventConvenorRow>,
    pub winners: Vec<EventWinnerRow>,
    pub feedback: Vec<FeedbackRow>,
    pub registrations: Vec<EventRegistrationRow>,
    pub team_members: Vec<TeamMemberRow>,
}

impl PastEventRecord {
    pub fn new(event: EventRow) -> Self {
        Self {
            event,
            convenors: Vec::new(),
            winners: Vec::new(),
            feedback: Vec::new(),
            registrations: Vec::new(),
            team_members: Vec::new(),
        }
    }
}
