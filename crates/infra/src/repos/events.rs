use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, Result};

use crate::db::Db;
use crate::models::{
    EventConvenorRow, EventRegistrationRow, EventRow, EventWinnerRow, FeedbackRow,
    PastEventRecord, TeamMemberRow,
};

/// Read access to past events, injected into the HTTP layer so handlers can
/// run against Postgres or an in-memory double.
#[async_trait]
pub trait PastEventStore: Send + Sync {
    /// Events dated strictly before `before` that `club_id` organizes,
    /// each loaded with its convenors, winners, feedback, registrations
    /// and team members.
    async fn past_events_for_club(
        &self,
        club_id: i32,
        before: DateTime<Utc>,
    ) -> Result<Vec<PastEventRecord>>;

    /// Cheap round-trip used by the health endpoint.
    async fn ping(&self) -> Result<()>;
}

#[derive(Clone)]
pub struct EventRepo {
    pool: Db,
}

impl EventRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PastEventStore for EventRepo {
    async fn past_events_for_club(
        &self,
        club_id: i32,
        before: DateTime<Utc>,
    ) -> Result<Vec<PastEventRecord>> {
        // One snapshot for the events and all of their associations
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let events = list_past_by_club(&mut *tx, club_id, before).await?;
        if events.is_empty() {
            tx.commit().await?;
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = events.iter().map(|e| e.id).collect();

        let associations = EventAssociations {
            convenors: list_convenors(&mut *tx, &ids).await?,
            winners: list_winners(&mut *tx, &ids).await?,
            feedback: list_feedback(&mut *tx, &ids).await?,
            registrations: list_registrations(&mut *tx, &ids).await?,
            team_members: list_team_members(&mut *tx, &ids).await?,
        };
        tx.commit().await?;

        Ok(assemble_records(events, associations))
    }

    async fn ping(&self) -> Result<()> {
        let _one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

/// Association rows for a batch of events, not yet grouped per event.
#[derive(Debug, Default)]
pub struct EventAssociations {
    pub convenors: Vec<EventConvenorRow>,
    pub winners: Vec<EventWinnerRow>,
    pub feedback: Vec<FeedbackRow>,
    pub registrations: Vec<EventRegistrationRow>,
    pub team_members: Vec<TeamMemberRow>,
}

/// Attach each association row to its event, keeping the order of `events`.
/// Rows whose `event_id` is not in `events` are dropped.
pub fn assemble_records(
    events: Vec<EventRow>,
    associations: EventAssociations,
) -> Vec<PastEventRecord> {
    let mut records: Vec<PastEventRecord> =
        events.into_iter().map(PastEventRecord::new).collect();
    let index: HashMap<i32, usize> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (r.event.id, i))
        .collect();

    for row in associations.convenors {
        if let Some(&i) = index.get(&row.event_id) {
            records[i].convenors.push(row);
        }
    }
    for row in associations.winners {
        if let Some(&i) = index.get(&row.event_id) {
            records[i].winners.push(row);
        }
    }
    for row in associations.feedback {
        if let Some(&i) = index.get(&row.event_id) {
            records[i].feedback.push(row);
        }
    }
    for row in associations.registrations {
        if let Some(&i) = index.get(&row.event_id) {
            records[i].registrations.push(row);
        }
    }
    for row in associations.team_members {
        if let Some(&i) = index.get(&row.event_id) {
            records[i].team_members.push(row);
        }
    }

    records
}

pub async fn list_past_by_club<'e>(
    executor: impl PgExecutor<'e>,
    club_id: i32,
    before: DateTime<Utc>,
) -> Result<Vec<EventRow>> {
    sqlx::query_as::<_, EventRow>(
        r#"
        SELECT e.id, e.name, e.about, e.date, e.event_type, e.event_category
        FROM events e
        WHERE e.date < $2
          AND EXISTS (
            SELECT 1 FROM organizingclubs oc
            WHERE oc.event_id = e.id AND oc.club_id = $1
          )
        ORDER BY e.id ASC
        "#,
    )
    .bind(club_id)
    .bind(before)
    .fetch_all(executor)
    .await
}

pub async fn list_convenors<'e>(
    executor: impl PgExecutor<'e>,
    event_ids: &[i32],
) -> Result<Vec<EventConvenorRow>> {
    sqlx::query_as::<_, EventConvenorRow>(
        r#"
        SELECT ec.id, ec.event_id, ec.user_id, u.name, u.department, u.yearofstudy
        FROM eventconvenors ec
        LEFT JOIN users u ON u.id = ec.user_id
        WHERE ec.event_id = ANY($1)
        ORDER BY ec.id ASC
        "#,
    )
    .bind(event_ids)
    .fetch_all(executor)
    .await
}

pub async fn list_winners<'e>(
    executor: impl PgExecutor<'e>,
    event_ids: &[i32],
) -> Result<Vec<EventWinnerRow>> {
    sqlx::query_as::<_, EventWinnerRow>(
        r#"
        SELECT ew.id, ew.event_id, ew.team_id, ew.position, t.name AS team_name
        FROM eventwinners ew
        LEFT JOIN teams t ON t.id = ew.team_id
        WHERE ew.event_id = ANY($1)
        ORDER BY ew.id ASC
        "#,
    )
    .bind(event_ids)
    .fetch_all(executor)
    .await
}

pub async fn list_feedback<'e>(
    executor: impl PgExecutor<'e>,
    event_ids: &[i32],
) -> Result<Vec<FeedbackRow>> {
    sqlx::query_as::<_, FeedbackRow>(
        r#"
        SELECT id, event_id, rating
        FROM feedback
        WHERE event_id = ANY($1)
        ORDER BY id ASC
        "#,
    )
    .bind(event_ids)
    .fetch_all(executor)
    .await
}

pub async fn list_registrations<'e>(
    executor: impl PgExecutor<'e>,
    event_ids: &[i32],
) -> Result<Vec<EventRegistrationRow>> {
    sqlx::query_as::<_, EventRegistrationRow>(
        r#"
        SELECT id, event_id, team_id
        FROM eventregistration
        WHERE event_id = ANY($1)
        ORDER BY id ASC
        "#,
    )
    .bind(event_ids)
    .fetch_all(executor)
    .await
}

pub async fn list_team_members<'e>(
    executor: impl PgExecutor<'e>,
    event_ids: &[i32],
) -> Result<Vec<TeamMemberRow>> {
    sqlx::query_as::<_, TeamMemberRow>(
        r#"
        SELECT id, event_id, team_id, user_id, is_present
        FROM teammembers
        WHERE event_id = ANY($1)
        ORDER BY id ASC
        "#,
    )
    .bind(event_ids)
    .fetch_all(executor)
    .await
}

