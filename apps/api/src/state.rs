//! Shared application state.

use shopfront_db::{Database, OrderPlacementService};

/// State handed to every handler. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub orders: OrderPlacementService<Database>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState {
            orders: OrderPlacementService::new(db.clone()),
            db,
        }
    }
}
