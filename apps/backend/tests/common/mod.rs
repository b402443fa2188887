//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up a store seeded with fixture cards
//! - Helper functions for creating request bodies

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;

use flashcards_backend::db::Database;
use flashcards_backend::models::Flashcard;
use flashcards_backend::{router, AppState};

/// Test context holding an in-memory database and the router serving it.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a context over an empty database.
    pub fn new() -> Self {
        Self::with_cards(Vec::new())
    }

    /// Create a context over a database seeded with `cards`.
    pub fn with_cards(cards: Vec<Flashcard>) -> Self {
        let db = Arc::new(Database::in_memory(cards));
        let app = router(AppState { db: db.clone() });
        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Start an axum-test server over the router.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("failed to start test server")
    }
}
