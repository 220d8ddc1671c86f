use std::{collections::HashMap, sync::Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    model::{NewUser, User},
    password::hash_password,
    store::{StoreError, UserStore},
};

/// In-process `UserStore` used to exercise handlers without Postgres.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops a user so tests can present tokens whose subject no longer exists.
    pub fn remove(&self, id: Uuid) -> Option<User> {
        self.lock().ok()?.remove(&id)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, User>>, StoreError> {
        self.users
            .lock()
            .map_err(|_| StoreError::Backend(anyhow!("user map poisoned")))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.lock()?;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let password_hash = hash_password(&new_user.password)?;

        let mut users = self.lock()?;
        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&new_user.email))
        {
            return Err(StoreError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

/// How a `FaultyStore` misbehaves.
#[derive(Debug, Clone, Copy)]
pub enum Fault {
    /// Every call fails with a backend error reading "db down".
    Down,
    /// Lookups find nothing but `create` reports the email as taken, as when
    /// another request registers the same address in between.
    RacedEmail,
}

/// `UserStore` double that fails on purpose.
pub struct FaultyStore {
    fault: Fault,
}

impl FaultyStore {
    pub fn new(fault: Fault) -> Self {
        Self { fault }
    }

    fn lookup(&self) -> Result<Option<User>, StoreError> {
        match self.fault {
            Fault::Down => Err(StoreError::Backend(anyhow!("db down"))),
            Fault::RacedEmail => Ok(None),
        }
    }
}

#[async_trait]
impl UserStore for FaultyStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        self.lookup()
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, StoreError> {
        self.lookup()
    }

    async fn create(&self, _new_user: NewUser) -> Result<User, StoreError> {
        match self.fault {
            Fault::Down => Err(StoreError::Backend(anyhow!("db down"))),
            Fault::RacedEmail => Err(StoreError::DuplicateEmail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::password::{verify_password, PlainPassword};

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Grace".into(),
            email: email.into(),
            password: PlainPassword::new("secret-pw"),
        }
    }

    #[tokio::test]
    async fn create_hashes_password_and_finds_user() {
        let store = MemoryUserStore::new();
        let user = store.create(new_user("grace@example.com")).await.unwrap();

        assert_ne!(user.password_hash.as_str(), "secret-pw");
        assert!(verify_password(&PlainPassword::new("secret-pw"), &user.password_hash).unwrap());

        let by_id = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "grace@example.com");
        let by_email = store.find_by_email("GRACE@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn duplicate_email_rejected_case_insensitively() {
        let store = MemoryUserStore::new();
        store.create(new_user("grace@example.com")).await.unwrap();
        let err = store.create(new_user("Grace@Example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn remove_makes_user_unresolvable() {
        let store = MemoryUserStore::new();
        let user = store.create(new_user("grace@example.com")).await.unwrap();
        assert!(store.remove(user.id).is_some());
        assert!(store.find_by_id(user.id).await.unwrap().is_none());
    }
}
