//! Domain layer containing the link registry's entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - The [`entities::Link`] record and its create/patch inputs
//! - [`pagination`] - List windows and `Content-Range` formatting
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business rules live in [`crate::application::services`].

pub mod entities;
pub mod pagination;
pub mod repositories;
