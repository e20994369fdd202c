//! Profile repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use gatehub_core::error::{AppError, ErrorKind};
use gatehub_core::result::AppResult;
use gatehub_core::types::UserId;
use gatehub_entity::profile::Profile;

use crate::store::ProfileStore;

/// Read-only repository for caller profiles.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(
            "SELECT id, tenant_id, household_id, role FROM profiles WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find profile", e))
    }
}
