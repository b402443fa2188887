//! Test fixtures and factory functions for creating test data.

use chrono::{TimeZone, Utc};
use serde_json::json;

use flashcards_backend::models::{Flashcard, QuestionStatus};

/// A stored card with deterministic content.
pub fn flashcard(id: i64, order: i64, status: QuestionStatus) -> Flashcard {
    Flashcard {
        id,
        question_title: format!("Question {}", id),
        question_answer: format!("Answer {}", id),
        question_options: vec![format!("Answer {}", id), "Something else".to_string()],
        question_date: Some(Utc.with_ymd_and_hms(2024, 5, id as u32, 12, 0, 0).unwrap()),
        question_status: status,
        question_order: Some(order as f64),
    }
}

/// Three cards in personal order 1, 2, 3 with mixed statuses.
pub fn sample_cards() -> Vec<Flashcard> {
    vec![
        flashcard(1, 1, QuestionStatus::Noted),
        flashcard(2, 2, QuestionStatus::Learned),
        flashcard(3, 3, QuestionStatus::WantToLearn),
    ]
}

/// Create a card creation request body.
pub fn create_request(title: &str, status: &str) -> serde_json::Value {
    json!({
        "questionTitle": title,
        "questionAnswer": "42",
        "questionOptions": ["42", "41"],
        "questionDate": "2024-06-01",
        "questionStatus": status
    })
}

/// Create an order-only patch body, as sent by drag-and-drop.
pub fn order_patch(order: i64) -> serde_json::Value {
    json!({ "questionOrder": order })
}
