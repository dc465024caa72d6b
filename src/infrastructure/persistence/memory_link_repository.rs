//! In-memory implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, LINK_NOT_FOUND, SHORT_NAME_EXISTS};

/// Process-local link store for development and tests.
///
/// Rows live in a `BTreeMap` keyed by id, so iteration order is id order. A
/// secondary index maps short names to ids. Every mutation checks uniqueness
/// and writes while holding the same write lock, which makes the store itself
/// the arbiter of conflicts just like a unique index.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    rows: BTreeMap<i64, Link>,
    by_short_name: HashMap<String, i64>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.inner
            .read()
            .map_err(|e| AppError::internal("Internal server error", json!({ "lock": e.to_string() })))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.inner
            .write()
            .map_err(|e| AppError::internal("Internal server error", json!({ "lock": e.to_string() })))
    }
}

fn short_name_taken(short_name: &str) -> AppError {
    AppError::conflict(SHORT_NAME_EXISTS, json!({ "short_name": short_name }))
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut tables = self.write()?;

        if tables.by_short_name.contains_key(&new_link.short_name) {
            return Err(short_name_taken(&new_link.short_name));
        }

        tables.next_id += 1;
        let link = Link::new(
            tables.next_id,
            new_link.original_url,
            new_link.short_name,
            Utc::now(),
        );

        tables.by_short_name.insert(link.short_name.clone(), link.id);
        tables.rows.insert(link.id, link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    async fn find_by_short_name(&self, short_name: &str) -> Result<Option<Link>, AppError> {
        let tables = self.read()?;

        Ok(tables
            .by_short_name
            .get(short_name)
            .and_then(|id| tables.rows.get(id))
            .cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Link>, AppError> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(self
            .read()?
            .rows
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.read()?.rows.len() as i64)
    }

    async fn update(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        let mut tables = self.write()?;

        let Some(current) = tables.rows.get(&id).cloned() else {
            return Err(AppError::not_found(LINK_NOT_FOUND, json!({ "id": id })));
        };

        if let Some(name) = &patch.short_name
            && tables.by_short_name.get(name).is_some_and(|owner| *owner != id)
        {
            return Err(short_name_taken(name));
        }

        let mut updated = current.clone();
        patch.apply_to(&mut updated);

        if updated.short_name != current.short_name {
            tables.by_short_name.remove(&current.short_name);
            tables.by_short_name.insert(updated.short_name.clone(), id);
        }
        tables.rows.insert(id, updated.clone());

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.write()?;

        match tables.rows.remove(&id) {
            Some(link) => {
                tables.by_short_name.remove(&link.short_name);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_link(url: &str, name: &str) -> NewLink {
        NewLink {
            original_url: url.to_string(),
            short_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryLinkRepository::new();

        let a = repo.create(new_link("https://a.com", "a")).await.unwrap();
        let b = repo.create(new_link("https://b.com", "b")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_duplicate_short_name_conflicts() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("https://a.com", "dup")).await.unwrap();

        let err = repo
            .create(new_link("https://other.com", "dup"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_short_name_is_case_sensitive() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("https://a.com", "Promo")).await.unwrap();
        repo.create(new_link("https://b.com", "promo")).await.unwrap();

        let found = repo.find_by_short_name("promo").await.unwrap().unwrap();
        assert_eq!(found.original_url, "https://b.com");
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id_and_windowed() {
        let repo = InMemoryLinkRepository::new();
        for i in 0..5 {
            repo.create(new_link(&format!("https://{i}.com"), &format!("n{i}")))
                .await
                .unwrap();
        }

        let page: Vec<i64> = repo
            .list(1, 3)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(page, vec![2, 3, 4]);

        assert!(repo.list(10, 10).await.unwrap().is_empty());
        assert_eq!(repo.list(3, i64::MAX).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_renames_and_frees_old_name() {
        let repo = InMemoryLinkRepository::new();
        let link = repo.create(new_link("https://a.com", "old")).await.unwrap();

        let updated = repo
            .update(
                link.id,
                LinkPatch {
                    original_url: None,
                    short_name: Some("new".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.short_name, "new");
        assert_eq!(updated.original_url, "https://a.com");
        assert!(repo.find_by_short_name("old").await.unwrap().is_none());
        assert!(repo.create(new_link("https://b.com", "old")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_to_own_short_name_succeeds() {
        let repo = InMemoryLinkRepository::new();
        let link = repo.create(new_link("https://a.com", "same")).await.unwrap();

        let updated = repo
            .update(
                link.id,
                LinkPatch {
                    original_url: Some("https://changed.com".to_string()),
                    short_name: Some("same".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.short_name, "same");
        assert_eq!(updated.original_url, "https://changed.com");
    }

    #[tokio::test]
    async fn test_update_to_taken_short_name_conflicts() {
        let repo = InMemoryLinkRepository::new();
        repo.create(new_link("https://a.com", "first")).await.unwrap();
        let second = repo.create(new_link("https://b.com", "second")).await.unwrap();

        let err = repo
            .update(
                second.id,
                LinkPatch {
                    original_url: Some("https://c.com".to_string()),
                    short_name: Some("first".to_string()),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));

        let unchanged = repo.find_by_id(second.id).await.unwrap().unwrap();
        assert_eq!(unchanged.original_url, "https://b.com");
        assert_eq!(unchanged.short_name, "second");
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let repo = InMemoryLinkRepository::new();
        let err = repo.update(42, LinkPatch::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_permanent() {
        let repo = InMemoryLinkRepository::new();
        let link = repo.create(new_link("https://a.com", "gone")).await.unwrap();

        assert!(repo.delete(link.id).await.unwrap());
        assert!(!repo.delete(link.id).await.unwrap());
        assert!(repo.find_by_id(link.id).await.unwrap().is_none());
        assert!(repo.find_by_short_name("gone").await.unwrap().is_none());

        let again = repo.create(new_link("https://b.com", "gone")).await.unwrap();
        assert_ne!(again.id, link.id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_with_same_name_admit_one() {
        let repo = Arc::new(InMemoryLinkRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(new_link(&format!("https://{i}.com"), "race"))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
