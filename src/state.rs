//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub public_urls: PublicUrls,
}

impl AppState {
    pub fn new(repository: Arc<dyn LinkRepository>, public_urls: PublicUrls) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository)),
            public_urls,
        }
    }
}

/// Where short links are served from.
///
/// Short URLs are derived on every read from this value, so changing
/// `BASE_URL` never leaves stale URLs behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUrls {
    base_url: String,
    redirect_prefix: Option<String>,
}

impl PublicUrls {
    /// Creates the public URL layout.
    ///
    /// Surrounding slashes are stripped from both parts; an empty prefix means
    /// redirects are served from the root.
    pub fn new(base_url: &str, redirect_prefix: Option<&str>) -> Self {
        let redirect_prefix = redirect_prefix
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            redirect_prefix,
        }
    }

    /// Base that `short_name` is appended to: `{base_url}` or `{base_url}/{prefix}`.
    pub fn short_url_root(&self) -> String {
        match &self.redirect_prefix {
            Some(prefix) => format!("{}/{}", self.base_url, prefix),
            None => self.base_url.clone(),
        }
    }

    pub fn short_url(&self, link: &Link) -> String {
        link.short_url(&self.short_url_root())
    }

    /// Router path of the redirect endpoint.
    pub fn redirect_route(&self) -> String {
        match &self.redirect_prefix {
            Some(prefix) => format!("/{prefix}/{{short_name}}"),
            None => "/{short_name}".to_string(),
        }
    }
}
