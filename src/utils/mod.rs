//! Helper functions shared across layers.
//!
//! - [`db_error`] - Classification of database errors
//! - [`short_name`] - Validation of short names and destination URLs

pub mod db_error;
pub mod short_name;
