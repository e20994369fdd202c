//! In-memory profile store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use gatehub_core::result::AppResult;
use gatehub_core::types::UserId;
use gatehub_entity::profile::Profile;

use crate::store::ProfileStore;

/// Profile lookup table keyed by user id.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<UserId, Profile>>,
}

impl InMemoryProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a profile.
    pub async fn upsert(&self, profile: Profile) {
        self.profiles.write().await.insert(profile.id, profile);
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Profile>> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }
}
