//! List windows and the `Content-Range` value that describes them.
//!
//! Clients page through links with an inclusive, zero-indexed window such as
//! `[0,9]`. Parsing is lenient: anything that is not a well-formed window
//! silently becomes the default window instead of an error.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Accepts `[<digits>,<digits>]`, optionally with spaces after the comma.
static RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(\d+),\s*(\d+)\]$").expect("range regex is valid"));

/// Resource name used in the `Content-Range` unit.
pub const RANGE_UNIT: &str = "links";

/// Inclusive window `[start, end]` over links ordered by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    start: i64,
    end: i64,
}

impl Default for ListWindow {
    /// The first ten rows: `[0,9]`.
    fn default() -> Self {
        Self { start: 0, end: 9 }
    }
}

impl ListWindow {
    /// Creates a window, or `None` if `start` is negative or `end < start`.
    pub fn new(start: i64, end: i64) -> Option<Self> {
        (start >= 0 && end >= start).then_some(Self { start, end })
    }

    /// Parses a `range` query value, falling back to [`ListWindow::default`].
    ///
    /// Whitespace is only allowed after the comma. Malformed syntax, negative
    /// numbers, `end < start` and values that overflow `i64` all yield the
    /// default window.
    pub fn parse(raw: &str) -> Self {
        RANGE_REGEX
            .captures(raw)
            .and_then(|caps| {
                let start = caps[1].parse().ok()?;
                let end = caps[2].parse().ok()?;
                Self::new(start, end)
            })
            .unwrap_or_default()
    }

    /// Like [`ListWindow::parse`], treating an absent value as the default.
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        self.start
    }

    /// Maximum number of rows in the window.
    pub fn limit(&self) -> i64 {
        // end >= start >= 0, so this only overflows for [0, i64::MAX].
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    /// Describes a page of `returned` rows fetched with this window.
    pub fn content_range(&self, returned: usize, total: i64) -> ContentRange {
        ContentRange::new(self.start, returned, total)
    }
}

/// The rows actually returned for a window, rendered as
/// `links {start}-{end}/{total}`.
///
/// For an empty page both bounds collapse to `start - 1`, so a window past
/// the end of five rows starting at 10 renders as `links 9-9/5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    pub first: i64,
    pub last: i64,
    pub total: i64,
}

impl ContentRange {
    pub fn new(start: i64, returned: usize, total: i64) -> Self {
        let returned = i64::try_from(returned).unwrap_or(i64::MAX);
        let last = start.saturating_add(returned) - 1;
        let first = if returned == 0 { last } else { start };

        Self { first, last, total }
    }
}

impl fmt::Display for ContentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}/{}",
            RANGE_UNIT, self.first, self.last, self.total
        )
    }
}
