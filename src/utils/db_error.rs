//! Helpers for classifying database errors.

/// Name of the unique constraint on `links.short_name`.
pub const SHORT_NAME_CONSTRAINT: &str = "links_short_name_key";

/// Returns true if `e` is a unique violation of the short name constraint.
pub fn is_unique_violation_on_short_name(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_NAME_CONSTRAINT))
}
