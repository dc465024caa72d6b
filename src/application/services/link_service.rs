//! Link registry service.

use std::sync::Arc;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::pagination::ListWindow;
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, LINK_NOT_FOUND};
use crate::utils::short_name::{validate_original_url, validate_short_name};
use serde_json::json;

/// Service owning the link registry's rules.
///
/// Validates input and translates missing rows into [`AppError::NotFound`].
/// Uniqueness of short names is left to the repository, which enforces it
/// atomically; the service never performs a lookup before writing.
#[derive(Clone)]
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
}

/// A page of links together with the size of the whole table.
#[derive(Debug, Clone)]
pub struct LinkPage {
    pub window: ListWindow,
    pub links: Vec<Link>,
    pub total: i64,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self { repository }
    }

    /// Registers a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either field is empty or the short
    /// name is not usable as a redirect key.
    /// Returns [`AppError::Conflict`] if the short name is already taken.
    pub async fn create_link(
        &self,
        original_url: String,
        short_name: String,
    ) -> Result<Link, AppError> {
        validate_original_url(&original_url)?;
        validate_short_name(&short_name)?;

        let link = self
            .repository
            .create(NewLink {
                original_url,
                short_name,
            })
            .await?;

        tracing::info!(id = link.id, short_name = %link.short_name, "Link created");
        Ok(link)
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get_link(&self, id: i64) -> Result<Link, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(LINK_NOT_FOUND, json!({ "id": id })))
    }

    /// Lists links inside `window`, ordered by id, plus the total row count.
    ///
    /// A window past the end of the table yields an empty page, never an error.
    pub async fn list_links(&self, window: ListWindow) -> Result<LinkPage, AppError> {
        let links = self
            .repository
            .list(window.offset(), window.limit())
            .await?;
        let total = self.repository.count().await?;

        Ok(LinkPage {
            window,
            links,
            total,
        })
    }

    /// Total number of registered links.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Partially updates a link.
    ///
    /// Only fields present in `patch` change. Keeping the current short name
    /// never conflicts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the patch is empty or a supplied
    /// value is invalid.
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::Conflict`] if the new short name belongs to another link.
    pub async fn update_link(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(
                "No data provided",
                json!({ "id": id }),
            ));
        }

        if let Some(url) = &patch.original_url {
            validate_original_url(url)?;
        }
        if let Some(name) = &patch.short_name {
            validate_short_name(name)?;
        }

        let link = self.repository.update(id, patch).await?;

        tracing::info!(id = link.id, short_name = %link.short_name, "Link updated");
        Ok(link)
    }

    /// Permanently deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn delete_link(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found(LINK_NOT_FOUND, json!({ "id": id })));
        }

        tracing::info!(id, "Link deleted");
        Ok(())
    }

    /// Looks up the link behind a short name for redirection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the short name is not registered.
    pub async fn resolve(&self, short_name: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_short_name(short_name)
            .await?
            .ok_or_else(|| {
                AppError::not_found(LINK_NOT_FOUND, json!({ "short_name": short_name }))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    fn create_test_link(id: i64, url: &str, name: &str) -> Link {
        Link::new(id, url.to_string(), name.to_string(), Utc::now())
    }

    fn service(mock: MockLinkRepository) -> LinkService {
        LinkService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_create_link_success() {
        let mut mock = MockLinkRepository::new();

        let created = create_test_link(10, "https://example.com", "exmpl");
        mock.expect_create()
            .withf(|new_link| {
                new_link.short_name == "exmpl" && new_link.original_url == "https://example.com"
            })
            .times(1)
            .returning(move |_| Ok(created.clone()));

        let link = service(mock)
            .create_link("https://example.com".to_string(), "exmpl".to_string())
            .await
            .unwrap();

        assert_eq!(link.id, 10);
        assert_eq!(link.short_name, "exmpl");
    }

    #[tokio::test]
    async fn test_create_link_does_not_look_up_before_insert() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_short_name().times(0);
        mock.expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Short name already exists", json!({}))));

        let err = service(mock)
            .create_link("https://other.com".to_string(), "taken".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_link_rejects_empty_fields() {
        let mut mock = MockLinkRepository::new();
        mock.expect_create().times(0);
        let service = service(mock);

        let err = service
            .create_link(String::new(), "name".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let err = service
            .create_link("https://example.com".to_string(), "  ".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_get_link_not_found() {
        let mut mock = MockLinkRepository::new();
        mock.expect_find_by_id()
            .withf(|id| *id == 999)
            .times(1)
            .returning(|_| Ok(None));

        let err = service(mock).get_link(999).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "Link not found");
    }

    #[tokio::test]
    async fn test_list_links_uses_window_bounds() {
        let mut mock = MockLinkRepository::new();

        mock.expect_list()
            .withf(|offset, limit| *offset == 10 && *limit == 10)
            .times(1)
            .returning(|_, _| {
                Ok((10..15)
                    .map(|i| create_test_link(i + 1, "https://e.com", &format!("test{i}")))
                    .collect())
            });
        mock.expect_count().times(1).returning(|| Ok(15));

        let page = service(mock)
            .list_links(ListWindow::parse("[10,19]"))
            .await
            .unwrap();

        assert_eq!(page.links.len(), 5);
        assert_eq!(page.total, 15);
        assert_eq!(
            page.window.content_range(page.links.len(), page.total).to_string(),
            "links 10-14/15"
        );
    }

    #[tokio::test]
    async fn test_update_link_empty_patch_is_rejected() {
        let mut mock = MockLinkRepository::new();
        mock.expect_update().times(0);

        let err = service(mock)
            .update_link(1, LinkPatch::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "No data provided");
    }

    #[tokio::test]
    async fn test_update_link_passes_only_present_fields() {
        let mut mock = MockLinkRepository::new();

        let updated = create_test_link(3, "https://example.com/updated", "kept");
        mock.expect_update()
            .withf(|id, patch| {
                *id == 3
                    && patch.original_url.as_deref() == Some("https://example.com/updated")
                    && patch.short_name.is_none()
            })
            .times(1)
            .returning(move |_, _| Ok(updated.clone()));

        let link = service(mock)
            .update_link(
                3,
                LinkPatch {
                    original_url: Some("https://example.com/updated".to_string()),
                    short_name: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(link.short_name, "kept");
    }

    #[tokio::test]
    async fn test_update_link_validates_new_short_name() {
        let mut mock = MockLinkRepository::new();
        mock.expect_update().times(0);

        let err = service(mock)
            .update_link(
                1,
                LinkPatch {
                    original_url: None,
                    short_name: Some("ping".to_string()),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_link_propagates_conflict() {
        let mut mock = MockLinkRepository::new();
        mock.expect_update()
            .times(1)
            .returning(|_, _| Err(AppError::conflict("Short name already exists", json!({}))));

        let err = service(mock)
            .update_link(
                2,
                LinkPatch {
                    original_url: None,
                    short_name: Some("first".to_string()),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_delete_link_missing() {
        let mut mock = MockLinkRepository::new();
        mock.expect_delete().times(1).returning(|_| Ok(false));

        let err = service(mock).delete_link(7).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_link_success() {
        let mut mock = MockLinkRepository::new();
        mock.expect_delete()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(true));

        assert!(service(mock).delete_link(7).await.is_ok());
    }

    #[tokio::test]
    async fn test_resolve() {
        let mut mock = MockLinkRepository::new();

        let link = create_test_link(1, "https://example.com", "exmpl");
        mock.expect_find_by_short_name()
            .returning(move |name| Ok((name == "exmpl").then(|| link.clone())));

        let service = service(mock);

        assert_eq!(
            service.resolve("exmpl").await.unwrap().original_url,
            "https://example.com"
        );
        assert!(matches!(
            service.resolve("missing").await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }
}
