//! Link creation, redirect, retrieval and deletion service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator, validate_custom_code};
use crate::utils::url_validator::validate_destination;
use serde_json::json;

/// Service orchestrating the link lifecycle on top of a [`LinkRepository`].
///
/// The service holds no link state of its own. Every call goes to the store,
/// which enforces code uniqueness and serializes click updates.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    code_generator: Arc<dyn CodeGenerator>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service using random code generation.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self::with_generator(link_repository, Arc::new(RandomCodeGenerator))
    }

    /// Creates a link service with a custom code generator.
    pub fn with_generator(link_repository: Arc<L>, code_generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            link_repository,
            code_generator,
        }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `destination` - Absolute URL with an explicit `http`/`https` scheme
    /// - `custom_code` - Optional short code (6-8 letters or digits)
    ///
    /// # Code Generation
    ///
    /// Without a custom code a single random candidate is generated. A candidate
    /// that collides with an existing link is not retried and fails the call
    /// with [`AppError::Conflict`], the same as a taken custom code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the destination or custom code is invalid.
    /// Returns [`AppError::Conflict`] if the code already exists.
    pub async fn create_link(
        &self,
        destination: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        let destination = validate_destination(&destination).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let (code, generated) = match custom_code {
            Some(custom) => {
                validate_custom_code(&custom)?;
                (custom, false)
            }
            None => (self.code_generator.generate(), true),
        };

        let new_link = NewLink { code, destination };

        match self.link_repository.insert(new_link).await {
            Ok(link) => {
                tracing::info!(code = %link.code, generated, "Link created");
                Ok(link)
            }
            Err(e @ AppError::Conflict { .. }) => {
                tracing::warn!(generated, "Short code already taken");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Resolves a code to its destination and records one click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn redirect(&self, code: &str) -> Result<String, AppError> {
        self.link_repository.find_by_code(code).await?;

        let link = self.link_repository.increment_clicks(code).await?;
        tracing::debug!(code, clicks = link.clicks, "Redirect recorded");

        Ok(link.destination)
    }

    /// Retrieves a link by its short code without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        tracing::debug!(code, "Link lookup");
        self.link_repository.find_by_code(code).await
    }

    /// Lists all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_all().await
    }

    /// Permanently deletes a link. Its code becomes available again.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        self.link_repository.delete(code).await?;
        tracing::info!(code, "Link deleted");
        Ok(())
    }

    /// Counts stored links.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }

    /// Constructs the full short URL from a public base URL and code.
    pub fn short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::code_generator::is_valid_code;
    use chrono::Utc;

    struct FixedCodeGenerator(&'static str);

    impl CodeGenerator for FixedCodeGenerator {
        fn generate(&self) -> String {
            self.0.to_string()
        }
    }

    fn create_test_link(code: &str, url: &str, clicks: i64) -> Link {
        Link::new(
            code.to_string(),
            url.to_string(),
            clicks,
            (clicks > 0).then(Utc::now),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_create_link_with_generated_code() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo.expect_exists().times(0);
        mock_link_repo
            .expect_insert()
            .withf(|new_link| is_valid_code(&new_link.code))
            .times(1)
            .returning(|new_link| Ok(new_link.into_link(Utc::now())));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let link = service
            .create_link("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert!(is_valid_code(&link.code));
        assert_eq!(link.destination, "https://example.com");
        assert_eq!(link.clicks, 0);
        assert!(link.last_clicked_at.is_none());
    }

    #[tokio::test]
    async fn test_create_link_with_custom_code() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_insert()
            .withf(|new_link| new_link.code == "mycode1")
            .times(1)
            .returning(|new_link| Ok(new_link.into_link(Utc::now())));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let link = service
            .create_link(
                "https://example.com".to_string(),
                Some("mycode1".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(link.code, "mycode1");
        assert_eq!(link.destination, "https://example.com");
    }

    #[tokio::test]
    async fn test_create_link_invalid_url() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_insert().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service.create_link("not-a-url".to_string(), None).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_link_invalid_custom_code() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_insert().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo));

        for bad in ["ab", "abc123!!", "toolong12", "my-code"] {
            let result = service
                .create_link("http://x.com".to_string(), Some(bad.to_string()))
                .await;
            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_create_link_custom_code_conflict() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_insert()
            .withf(|new_link| new_link.code == "taken12")
            .times(1)
            .returning(|new_link| {
                Err(AppError::conflict(
                    "Short code already exists",
                    json!({ "code": new_link.code }),
                ))
            });

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service
            .create_link(
                "https://example.com".to_string(),
                Some("taken12".to_string()),
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_generated_collision_is_not_retried() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_insert()
            .withf(|new_link| new_link.code == "fixed1")
            .times(1)
            .returning(|_| Err(AppError::conflict("Short code already exists", json!({}))));

        let service = LinkService::with_generator(
            Arc::new(mock_link_repo),
            Arc::new(FixedCodeGenerator("fixed1")),
        );

        let result = service
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_link_propagates_unavailable() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::unavailable("timed out", json!({}))));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let err = service
            .create_link("https://example.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_redirect_increments_and_returns_destination() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_code()
            .withf(|code| code == "mycode1")
            .times(1)
            .returning(|code| Ok(create_test_link(code, "https://example.com", 0)));

        mock_link_repo
            .expect_increment_clicks()
            .withf(|code| code == "mycode1")
            .times(1)
            .returning(|code| Ok(create_test_link(code, "https://example.com", 1)));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let destination = service.redirect("mycode1").await.unwrap();

        assert_eq!(destination, "https://example.com");
    }

    #[tokio::test]
    async fn test_redirect_not_found_does_not_increment() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_code()
            .times(1)
            .returning(|code| {
                Err(AppError::not_found(
                    "Short link not found",
                    json!({ "code": code }),
                ))
            });
        mock_link_repo.expect_increment_clicks().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service.redirect("nothere").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_link_has_no_side_effects() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_code()
            .times(1)
            .returning(|code| Ok(create_test_link(code, "https://example.com", 3)));
        mock_link_repo.expect_increment_clicks().times(0);

        let service = LinkService::new(Arc::new(mock_link_repo));

        let link = service.get_link("stats1").await.unwrap();

        assert_eq!(link.clicks, 3);
    }

    #[tokio::test]
    async fn test_delete_link_not_found() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_delete()
            .times(1)
            .returning(|_| Err(AppError::not_found("Short link not found", json!({}))));

        let service = LinkService::new(Arc::new(mock_link_repo));

        let result = service.delete_link("gone12").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_links_empty() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_list_all()
            .times(1)
            .returning(|| Ok(Vec::new()));

        let service = LinkService::new(Arc::new(mock_link_repo));

        assert!(service.list_links().await.unwrap().is_empty());
    }

    #[test]
    fn test_short_url() {
        let service = LinkService::new(Arc::new(MockLinkRepository::new()));

        assert_eq!(
            service.short_url("https://s.example.com/", "abc123"),
            "https://s.example.com/abc123"
        );
        assert_eq!(
            service.short_url("http://localhost:3000", "abc123"),
            "http://localhost:3000/abc123"
        );
    }
}
