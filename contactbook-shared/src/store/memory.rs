/// In-memory record store
///
/// Holds records in a `BTreeMap` behind a tokio `RwLock`, so listings come out
/// ordered by id like the PostgreSQL store. Ids come from a counter that only
/// moves forward, so deleted ids are never handed out again.
///
/// Useful for:
/// - Testing handlers and the seeder without a database
/// - Local demos

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, StoreResult, UserStore};
use crate::models::user::{User, UserPayload};

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    users: BTreeMap<i64, User>,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|user| user.email == email && Some(user.id) != except)
    }
}

/// Record store held in process memory
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, payload: UserPayload) -> StoreResult<User> {
        let mut inner = self.inner.write().await;

        if inner.email_taken(&payload.email, None) {
            return Err(StoreError::DuplicateEmail(payload.email));
        }

        inner.last_id += 1;
        let user = User::from_payload(inner.last_id, payload);
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_name_contains(&self, fragment: &str) -> StoreResult<Vec<User>> {
        let needle = fragment.to_lowercase();
        let inner = self.inner.read().await;

        Ok(inner
            .users
            .values()
            .filter(|user| user.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, payload: UserPayload) -> StoreResult<User> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }

        if inner.email_taken(&payload.email, Some(id)) {
            return Err(StoreError::DuplicateEmail(payload.email));
        }

        let user = User::from_payload(id, payload);
        inner.users.insert(id, user.clone());

        Ok(user)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        match self.inner.write().await.users.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn list_all(&self) -> StoreResult<Vec<User>> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.inner.read().await.users.len() as i64)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str) -> UserPayload {
        UserPayload {
            name: name.to_string(),
            address: "123 Test St".to_string(),
            email: email.to_string(),
            telephone: "555-1234".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_then_find_by_id() {
        let store = InMemoryUserStore::new();
        let input = payload("Test User", "test@digg.com");

        let user = store.insert(input.clone()).await.unwrap();
        let found = store.find_by_id(user.id).await.unwrap().unwrap();

        assert_eq!(found, User::from_payload(user.id, input));
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let store = InMemoryUserStore::new();

        let first = store.insert(payload("A", "a@x.com")).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.insert(payload("A", "a@x.com")).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_delete_then_find_is_none() {
        let store = InMemoryUserStore::new();
        let user = store.insert(payload("A", "a@x.com")).await.unwrap();

        store.delete(user.id).await.unwrap();

        assert!(store.find_by_id(user.id).await.unwrap().is_none());
        assert!(matches!(
            store.delete(user.id).await,
            Err(StoreError::NotFound(id)) if id == user.id
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_on_insert() {
        let store = InMemoryUserStore::new();
        store.insert(payload("A", "a@x.com")).await.unwrap();

        let result = store.insert(payload("B", "a@x.com")).await;

        assert!(matches!(result, Err(StoreError::DuplicateEmail(_))));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let store = InMemoryUserStore::new();
        let user = store.insert(payload("A", "a@x.com")).await.unwrap();

        let replacement = UserPayload {
            name: "New Name".to_string(),
            address: "1 New Rd".to_string(),
            email: "new@x.com".to_string(),
            telephone: "(555) 999-0000".to_string(),
        };
        let updated = store.update(user.id, replacement.clone()).await.unwrap();

        assert_eq!(updated, User::from_payload(user.id, replacement));
        assert!(store.find_by_email("a@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeping_own_email() {
        let store = InMemoryUserStore::new();
        let user = store.insert(payload("A", "a@x.com")).await.unwrap();

        let updated = store.update(user.id, payload("Renamed", "a@x.com")).await.unwrap();

        assert_eq!(updated.name, "Renamed");
    }

    #[tokio::test]
    async fn test_update_to_taken_email_or_missing_id() {
        let store = InMemoryUserStore::new();
        store.insert(payload("A", "a@x.com")).await.unwrap();
        let b = store.insert(payload("B", "b@x.com")).await.unwrap();

        assert!(matches!(
            store.update(b.id, payload("B", "a@x.com")).await,
            Err(StoreError::DuplicateEmail(_))
        ));
        assert!(matches!(
            store.update(999_999, payload("C", "c@x.com")).await,
            Err(StoreError::NotFound(999_999))
        ));
    }

    #[tokio::test]
    async fn test_name_search_is_case_insensitive() {
        let store = InMemoryUserStore::new();
        store.insert(payload("Alice Anderson", "alice@x.com")).await.unwrap();
        store.insert(payload("Bob Brown", "bob@x.com")).await.unwrap();
        store.insert(payload("Malice Cooper", "malice@x.com")).await.unwrap();

        let found = store.find_by_name_contains("ALICE").await.unwrap();
        let names: Vec<&str> = found.iter().map(|u| u.name.as_str()).collect();

        assert_eq!(names, vec!["Alice Anderson", "Malice Cooper"]);
        assert!(store.find_by_name_contains("%").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_search_and_count_match_list_all() {
        let store = InMemoryUserStore::new();
        for i in 0..5 {
            store
                .insert(payload(&format!("User {}", i), &format!("u{}@x.com", i)))
                .await
                .unwrap();
        }

        let all = store.list_all().await.unwrap();
        assert_eq!(store.find_by_name_contains("").await.unwrap(), all);
        assert_eq!(store.count().await.unwrap(), all.len() as i64);
    }
}
