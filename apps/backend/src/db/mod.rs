//! Flashcard storage: an in-memory table optionally mirrored to a JSON file.
//!
//! The file uses the `{ "flashCards": [...] }` layout so an existing
//! json-server database can be served as is.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{ApiError, Result};
use crate::models::{Flashcard, FlashcardPatch, NewFlashcard};

#[derive(Debug, Default, Serialize, Deserialize)]
struct DbFile {
    #[serde(rename = "flashCards", default)]
    flash_cards: Vec<Flashcard>,
}

/// Database wrapper holding every flashcard.
pub struct Database {
    cards: RwLock<Vec<Flashcard>>,
    path: Option<PathBuf>,
}

impl Database {
    /// Database that lives only as long as the process.
    pub fn in_memory(cards: Vec<Flashcard>) -> Self {
        Self {
            cards: RwLock::new(cards),
            path: None,
        }
    }

    /// Load the JSON file at `path`. A missing file starts an empty database
    /// that is created on the first write.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let cards = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str::<DbFile>(&content)?.flash_cards,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("{} does not exist yet, starting empty", path.display());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!("Loaded {} flashcards from {}", cards.len(), path.display());

        Ok(Self {
            cards: RwLock::new(cards),
            path: Some(path),
        })
    }

    /// All cards, ascending by id.
    pub async fn list(&self) -> Vec<Flashcard> {
        let mut cards = self.cards.read().await.clone();
        cards.sort_by_key(|card| card.id);
        cards
    }

    pub async fn get(&self, id: i64) -> Result<Flashcard> {
        self.cards
            .read()
            .await
            .iter()
            .find(|card| card.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Insert a card with the next free id. Without an explicit order the
    /// card goes to the end of the personal order.
    pub async fn create(&self, new: NewFlashcard) -> Result<Flashcard> {
        if new.question_title.trim().is_empty() {
            return Err(ApiError::BadRequest("questionTitle must not be empty".into()));
        }

        let mut cards = self.cards.write().await;

        let id = cards.iter().map(|card| card.id).max().unwrap_or(0) + 1;
        let order = cards
            .iter()
            .filter_map(|card| card.question_order)
            .reduce(f64::max)
            .unwrap_or(0.0)
            + 1.0;

        let card = Flashcard::from_new(id, order, new);
        let mut next = cards.clone();
        next.push(card.clone());

        self.commit(&mut cards, next).await?;
        Ok(card)
    }

    /// Apply a partial update and return the stored result.
    pub async fn update(&self, id: i64, patch: &FlashcardPatch) -> Result<Flashcard> {
        let mut cards = self.cards.write().await;

        let index = cards
            .iter()
            .position(|card| card.id == id)
            .ok_or_else(|| not_found(id))?;
        let updated = cards[index].patched(patch);

        let mut next = cards.clone();
        next[index] = updated.clone();

        self.commit(&mut cards, next).await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut cards = self.cards.write().await;

        if !cards.iter().any(|card| card.id == id) {
            return Err(not_found(id));
        }
        let next = cards.iter().filter(|card| card.id != id).cloned().collect();

        self.commit(&mut cards, next).await
    }

    /// Persist `next`, then make it the live table. A failed write leaves
    /// both the file and the table as they were.
    async fn commit(&self, cards: &mut Vec<Flashcard>, next: Vec<Flashcard>) -> Result<()> {
        self.persist(&next).await?;
        *cards = next;
        Ok(())
    }

    /// Write the table to disk. Called with the write lock held so writes
    /// reach the file in the order they were applied.
    async fn persist(&self, cards: &[Flashcard]) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let content = serde_json::to_string_pretty(&DbFile {
            flash_cards: cards.to_vec(),
        })?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, path).await?;

        Ok(())
    }
}

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("flashcard {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionStatus;
    use pretty_assertions::assert_eq;

    fn new_card(title: &str) -> NewFlashcard {
        NewFlashcard {
            question_title: title.to_string(),
            question_answer: "answer".to_string(),
            question_status: QuestionStatus::Noted,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_next_id_and_order() {
        let db = Database::in_memory(Vec::new());

        let first = db.create(new_card("first")).await.unwrap();
        let second = db.create(new_card("second")).await.unwrap();

        assert_eq!((first.id, first.question_order), (1, Some(1.0)));
        assert_eq!((second.id, second.question_order), (2, Some(2.0)));
        assert_eq!(db.list().await.len(), 2);
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let db = Database::in_memory(Vec::new());
        let result = db.create(new_card("   ")).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn update_and_delete_missing_card() {
        let db = Database::in_memory(Vec::new());
        assert!(matches!(
            db.update(5, &FlashcardPatch::order(1.0)).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(db.delete(5).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");

        let db = Database::open(&path).await.unwrap();
        let card = db.create(new_card("persisted")).await.unwrap();
        db.update(card.id, &FlashcardPatch::order(9.0)).await.unwrap();

        let reopened = Database::open(&path).await.unwrap();
        let cards = reopened.list().await;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question_title, "persisted");
        assert_eq!(cards[0].question_order, Some(9.0));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"flashCards\""));
    }

    #[tokio::test]
    async fn failed_write_leaves_table_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        std::fs::create_dir(&data_dir).unwrap();

        let db = Database::open(data_dir.join("db.json")).await.unwrap();
        let card = db.create(new_card("kept")).await.unwrap();

        std::fs::remove_dir_all(&data_dir).unwrap();

        assert!(matches!(
            db.create(new_card("lost")).await,
            Err(ApiError::Storage(_))
        ));
        assert!(matches!(
            db.update(card.id, &FlashcardPatch::order(5.0)).await,
            Err(ApiError::Storage(_))
        ));
        assert!(matches!(db.delete(card.id).await, Err(ApiError::Storage(_))));

        let cards = db.list().await;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question_title, "kept");
        assert_eq!(cards[0].question_order, Some(1.0));
    }

    #[tokio::test]
    async fn create_follows_fractional_orders() {
        let db = Database::in_memory(Vec::new());
        let first = db.create(new_card("first")).await.unwrap();
        db.update(first.id, &FlashcardPatch::order(2.5)).await.unwrap();

        let second = db.create(new_card("second")).await.unwrap();
        assert_eq!(second.question_order, Some(3.5));
    }
}
