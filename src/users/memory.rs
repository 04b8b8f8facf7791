use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    repo::UserStore,
    repo_types::{InsertOutcome, NewUser},
};

/// In-memory `UserStore` with the same email uniqueness rule as the `users` table.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, NewUser>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn find_by_email(&self, email: &str) -> Option<NewUser> {
        let users = self.users.read().await;
        users.values().find(|u| u.email == email).cloned()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: NewUser) -> InsertOutcome {
        // check and insert under one write guard
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return InsertOutcome::DuplicateKey {
                field: "email".into(),
                value: user.email,
            };
        }
        let id = user.id;
        users.insert(id, user);
        InsertOutcome::Created(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser::new("Ann".into(), email.into(), "555".into(), "hash".into())
    }

    #[tokio::test]
    async fn second_insert_with_same_email_is_duplicate() {
        let store = InMemoryUserStore::new();

        assert!(matches!(
            store.insert(new_user("ann@example.com")).await,
            InsertOutcome::Created(_)
        ));
        match store.insert(new_user("ann@example.com")).await {
            InsertOutcome::DuplicateKey { field, value } => {
                assert_eq!(field, "email");
                assert_eq!(value, "ann@example.com");
            }
            other => panic!("expected duplicate, got {:?}", other),
        }
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn find_by_email_returns_stored_user() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("bob@example.com")).await;

        let found = store.find_by_email("bob@example.com").await;
        assert_eq!(found.map(|u| u.name), Some("Ann".to_string()));
        assert!(store.find_by_email("nobody@example.com").await.is_none());
    }
}
