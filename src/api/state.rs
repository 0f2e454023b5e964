use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::repositories::{MemberRepository, TeamRepository};
use crate::domain::search::PageSettings;
use crate::infrastructure::repositories::{
    InMemoryStore, PostgresMemberRepository, PostgresTeamRepository,
};

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable; repositories sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub members: Arc<dyn MemberRepository>,
    pub teams: Arc<dyn TeamRepository>,
    /// Default and maximum page sizes for paginated endpoints.
    pub page: PageSettings,
}

impl AppState {
    /// State backed by PostgreSQL repositories sharing one pool
    pub fn postgres(pool: PgPool, page: PageSettings) -> Self {
        Self {
            members: Arc::new(PostgresMemberRepository::new(pool.clone())),
            teams: Arc::new(PostgresTeamRepository::new(pool)),
            page,
        }
    }

    /// State backed by a single process-local store
    pub fn in_memory(store: Arc<InMemoryStore>, page: PageSettings) -> Self {
        Self {
            members: store.clone(),
            teams: store,
            page,
        }
    }
}
