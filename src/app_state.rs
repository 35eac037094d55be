use crate::db::Database;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

impl AppState {
    pub fn init(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }
}
