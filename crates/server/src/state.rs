use sea_orm::DatabaseConnection;
use service::{CrudService, Resource};

/// Shared by every handler. The connection pool is opened once at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn crud<R: Resource>(&self) -> CrudService<R> {
        CrudService::new(self.db.clone())
    }
}
