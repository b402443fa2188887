//! API types

use serde::Serialize;

// Re-export shared types from flashcard-core
pub use flashcard_core::types::{
    Flashcard, FlashcardPatch, NewFlashcard, QuestionStatus,
};

/// Body returned by a successful delete, matching json-server's `{}`.
#[derive(Debug, Default, Serialize)]
pub struct DeletedResponse {}
