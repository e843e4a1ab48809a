use std::sync::Arc;

use infra::repos::{EventRepo, PastEventStore};
use sqlx::PgPool;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    events: Arc<dyn PastEventStore>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// State backed by the Postgres repository.
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        Self::with_store(Arc::new(EventRepo::new(db)), config)
    }

    pub fn with_store(events: Arc<dyn PastEventStore>, config: AppConfig) -> Self {
        Self {
            events,
            config: Arc::new(config),
        }
    }

    pub fn events(&self) -> &dyn PastEventStore {
        self.events.as_ref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
