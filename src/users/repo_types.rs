use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User document as stored and as returned by lookups.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 PHC string, not exposed in JSON
    pub enrolled_challenge_ids: Vec<String>,
    pub badges_earned: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Fields the caller supplies on insert; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub password_hash: String,
}
