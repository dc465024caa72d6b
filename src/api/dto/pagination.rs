//! Query parameters for the link list endpoint.

use serde::Deserialize;

use crate::domain::pagination::ListWindow;

/// `GET /api/links?range=[start,end]`.
///
/// The raw string is kept as-is; [`ListWindow::parse`] decides whether it is
/// usable, so a malformed range never rejects the request.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub range: Option<String>,
}

impl RangeQuery {
    /// The requested window, or the default `[0,9]`.
    pub fn window(&self) -> ListWindow {
        ListWindow::from_query(self.range.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(range: Option<&str>) -> RangeQuery {
        RangeQuery {
            range: range.map(str::to_string),
        }
    }

    #[test]
    fn test_absent_range_is_default() {
        assert_eq!(query(None).window(), ListWindow::default());
    }

    #[test]
    fn test_malformed_ranges_match_absent_range() {
        for raw in ["invalid", "[10,5]", "[-5,10]", ""] {
            assert_eq!(query(Some(raw)).window(), query(None).window(), "{raw:?}");
        }
    }

    #[test]
    fn test_valid_range() {
        let window = query(Some("[10,19]")).window();
        assert_eq!((window.start(), window.end()), (10, 19));
    }
}
