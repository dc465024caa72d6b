#![allow(dead_code)]

use axum_test::TestServer;
use link_registry::domain::entities::Link;
use link_registry::infrastructure::persistence::{InMemoryLinkRepository, PgLinkRepository};
use link_registry::routes::router;
use link_registry::state::{AppState, PublicUrls};
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_BASE_URL: &str = "http://testserver";

pub fn create_test_state() -> AppState {
    create_test_state_with_prefix(None)
}

pub fn create_test_state_with_prefix(prefix: Option<&str>) -> AppState {
    AppState::new(
        Arc::new(InMemoryLinkRepository::new()),
        PublicUrls::new(TEST_BASE_URL, prefix),
    )
}

pub fn create_pg_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(PgLinkRepository::new(Arc::new(pool))),
        PublicUrls::new(TEST_BASE_URL, None),
    )
}

pub fn make_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

pub async fn create_test_link(state: &AppState, short_name: &str, url: &str) -> Link {
    state
        .link_service
        .create_link(url.to_string(), short_name.to_string())
        .await
        .unwrap()
}

/// Seeds `count` links named `link0`, `link1`, ...
pub async fn create_test_links(state: &AppState, count: usize) -> Vec<Link> {
    let mut links = Vec::with_capacity(count);
    for i in 0..count {
        let link = create_test_link(state, &format!("link{i}"), &format!("https://example.com/{i}")).await;
        links.push(link);
    }
    links
}
