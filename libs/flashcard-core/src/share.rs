//! Sharing a selection of cards by email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::selection::Selection;
use crate::types::{date_format, Flashcard, QuestionStatus};

pub const SHARE_SUBJECT: &str = "Flashcards Details";

/// The fields of a card that leave the application when shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedCard {
    pub id: i64,
    pub question_title: String,
    pub question_answer: String,
    pub question_options: Vec<String>,
    #[serde(default, with = "date_format")]
    pub question_date: Option<DateTime<Utc>>,
    pub question_status: QuestionStatus,
}

impl From<&Flashcard> for SharedCard {
    fn from(card: &Flashcard) -> Self {
        Self {
            id: card.id,
            question_title: card.question_title.clone(),
            question_answer: card.question_answer.clone(),
            question_options: card.question_options.clone(),
            question_date: card.question_date,
            question_status: card.question_status,
        }
    }
}

/// Selected cards among `visible`, in visible order.
pub fn project(visible: &[Flashcard], selection: &Selection) -> Vec<SharedCard> {
    visible
        .iter()
        .filter(|card| selection.contains(card.id))
        .map(SharedCard::from)
        .collect()
}

/// Pretty-printed JSON array of the selected cards.
pub fn share_payload(visible: &[Flashcard], selection: &Selection) -> Result<String> {
    Ok(serde_json::to_string_pretty(&project(visible, selection))?)
}

/// `mailto:` target with the payload as message body.
pub fn mailto_link(subject: &str, body: &str) -> String {
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}
