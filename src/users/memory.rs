use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::users::{
    repo::{StoreError, UserStore},
    repo_types::{NewUser, User},
};

/// In-process store used when no database is configured, and by tests.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            age: new_user.age,
            password_hash: new_user.password_hash,
            enrolled_challenge_ids: Vec::new(),
            badges_earned: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ada".into(),
            email: email.into(),
            age: 36,
            password_hash: "$argon2id$stub".into(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_empty_collections() {
        let store = MemoryUserStore::new();
        let user = store.insert(new_user("ada@example.com")).await.unwrap();

        assert!(user.enrolled_challenge_ids.is_empty());
        assert!(user.badges_earned.is_empty());
        let fetched = store.get(user.id).await.unwrap().expect("stored user");
        assert_eq!(fetched.email, "ada@example.com");
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_email() {
        let store = MemoryUserStore::new();
        store.insert(new_user("ada@example.com")).await.unwrap();
        let err = store.insert(new_user("ada@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn find_by_email_is_exact_match() {
        let store = MemoryUserStore::new();
        store.insert(new_user("ada@example.com")).await.unwrap();
        assert!(store.find_by_email("ada@example.com").await.unwrap().is_some());
        assert!(store.find_by_email("ADA@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryUserStore::new();
        for email in ["a@example.com", "b@example.com", "c@example.com"] {
            store.insert(new_user(email)).await.unwrap();
        }
        let emails: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.email)
            .collect();
        assert_eq!(emails, ["a@example.com", "b@example.com", "c@example.com"]);
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let store = MemoryUserStore::new();
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }
}
