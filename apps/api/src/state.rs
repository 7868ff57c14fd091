//! Shared application state.

use std::sync::Arc;

use cafe_db::Database;
use chrono_tz::Tz;

use crate::config::ApiConfig;

/// State handed to every handler.
///
/// Cheap to clone: the database handle wraps a pool and the config is
/// shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }

    /// Zone used for "today" and "this month".
    pub fn timezone(&self) -> Tz {
        self.config.timezone
    }
}
