use async_trait::async_trait;
use uuid::Uuid;

use super::model::{NewUser, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Persistence boundary for user records.
///
/// Emails passed in are expected to be normalized already. Implementations
/// own password hashing and must enforce email uniqueness themselves; a
/// handler-side lookup before `create` is only a pre-check.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;
}
