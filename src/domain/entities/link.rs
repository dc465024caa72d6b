//! Link entity representing a short name to URL mapping.

use chrono::{DateTime, Utc};

/// A registered short link.
///
/// `short_url` is intentionally absent: it depends on the deployment's base URL
/// and is projected at read time via [`Link::short_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    pub short_name: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_name: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_name,
            created_at,
        }
    }

    /// Builds the public short URL for this link under `base_url`.
    ///
    /// A trailing slash on the base is ignored, so `https://s.io/` and
    /// `https://s.io` produce the same result.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.short_name)
    }
}

/// Input data for creating a new link.
///
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub original_url: String,
    pub short_name: String,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPatch {
    pub original_url: Option<String>,
    pub short_name: Option<String>,
}

impl LinkPatch {
    /// Returns true if the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.original_url.is_none() && self.short_name.is_none()
    }

    /// Applies the patch to `link` in place.
    pub fn apply_to(self, link: &mut Link) {
        if let Some(url) = self.original_url {
            link.original_url = url;
        }
        if let Some(name) = self.short_name {
            link.short_name = name;
        }
    }
}
