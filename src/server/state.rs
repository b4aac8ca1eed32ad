use crate::server::database::Database;
use std::sync::Arc;

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}
