use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::password::{PasswordHash, PlainPassword};

/// User record as held by the store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,                // normalized: trimmed, lower-case
    pub password_hash: PasswordHash,  // Argon2 PHC string, never leaves the server
    pub created_at: OffsetDateTime,
}

/// Input for `UserStore::create`. The store hashes `password` before persisting.
#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: PlainPassword,
}

/// Public part of the user returned to the client, keyed the way the
/// dashboard reads it (`_id`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            created_at: u.created_at,
        }
    }
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            created_at: u.created_at,
        }
    }
}
