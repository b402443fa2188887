//! Flashcard endpoints
//!
//! Malformed ids and bodies are reported as `ApiError::BadRequest`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /flashCards
pub async fn list(State(state): State<AppState>) -> Json<Vec<Flashcard>> {
    Json(state.db.list().await)
}

/// GET /flashCards/:id
pub async fn get(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Flashcard>> {
    let Path(id) = path?;
    Ok(Json(state.db.get(id).await?))
}

/// POST /flashCards
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<NewFlashcard>, JsonRejection>,
) -> Result<(StatusCode, Json<Flashcard>)> {
    let Json(new) = body?;
    let card = state.db.create(new).await?;

    tracing::info!("Created flashcard {}", card.id);

    Ok((StatusCode::CREATED, Json(card)))
}

/// PATCH /flashCards/:id
pub async fn update(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
    body: std::result::Result<Json<FlashcardPatch>, JsonRejection>,
) -> Result<Json<Flashcard>> {
    let Path(id) = path?;
    let Json(patch) = body?;
    let card = state.db.update(id, &patch).await?;

    tracing::debug!(id, order = ?card.question_order, "Updated flashcard");

    Ok(Json(card))
}

/// DELETE /flashCards/:id
pub async fn delete(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedResponse>> {
    let Path(id) = path?;
    state.db.delete(id).await?;

    tracing::info!("Deleted flashcard {}", id);

    Ok(Json(DeletedResponse::default()))
}
