use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::users::repo_types::{NewUser, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Document store holding user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Persists a new user with empty achievement lists and a server timestamp.
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError>;
    async fn get(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn list(&self) -> Result<Vec<User>, StoreError>;
}

const USER_COLUMNS: &str = "id, name, email, age, password_hash, \
                            enrolled_challenge_ids, badges_earned, created_at";

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("select user by email")?;
        Ok(user)
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let res = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, name, email, age, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(new_user.age)
        .bind(&new_user.password_hash)
        .fetch_one(&self.db)
        .await;

        match res {
            Ok(user) => Ok(user),
            // users_email_key catches registrations racing past the pre-check
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => Err(anyhow::Error::new(e).context("insert user").into()),
        }
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("select user by id")?;
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.db)
        .await
        .context("list users")?;
        Ok(users)
    }
}
