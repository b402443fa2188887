//! Flashcard resource API tests.
//!
//! These run against an in-memory database and need no external services.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use common::fixtures;
use common::TestContext;
use flashcards_backend::models::{Flashcard, QuestionStatus};

/// Test health check.
#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

/// Test list is empty for a fresh store.
#[tokio::test]
async fn test_list_empty() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/flashCards").await;

    response.assert_status_ok();
    let body: Vec<Flashcard> = response.json();
    assert!(body.is_empty());
}

/// Test list returns seeded cards in camelCase wire format.
#[tokio::test]
async fn test_list_wire_format() {
    let ctx = TestContext::with_cards(fixtures::sample_cards());
    let server = ctx.server();

    let response = server.get("/flashCards").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let cards = body.as_array().unwrap();
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0]["id"], 1);
    assert_eq!(cards[0]["questionTitle"], "Question 1");
    assert_eq!(cards[0]["questionStatus"], "Noted");
    assert_eq!(cards[0]["questionOrder"], 1);
    assert_eq!(cards[2]["questionStatus"], "Want to Learn");
}

/// Test get by id and missing id.
#[tokio::test]
async fn test_get_card() {
    let ctx = TestContext::with_cards(fixtures::sample_cards());
    let server = ctx.server();

    let response = server.get("/flashCards/2").await;
    response.assert_status_ok();
    let card: Flashcard = response.json();
    assert_eq!(card, fixtures::flashcard(2, 2, QuestionStatus::Learned));

    let missing = server.get("/flashCards/99").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = missing.json();
    assert_eq!(body["error"], "not_found");
}

/// Test create assigns id and appends to the personal order.
#[tokio::test]
async fn test_create_card() {
    let ctx = TestContext::with_cards(fixtures::sample_cards());
    let server = ctx.server();

    let response = server
        .post("/flashCards")
        .json(&fixtures::create_request("What is the answer?", "Want to Learn"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let card: Flashcard = response.json();
    assert_eq!(card.id, 4);
    assert_eq!(card.question_order, Some(4.0));
    assert_eq!(card.question_status, QuestionStatus::WantToLearn);
    assert_eq!(card.question_options, vec!["42".to_string(), "41".to_string()]);

    assert_eq!(ctx.db.list().await.len(), 4);
}

/// Test create rejects a blank title.
#[tokio::test]
async fn test_create_blank_title() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/flashCards")
        .json(&fixtures::create_request("  ", "Noted"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

/// Test malformed bodies and ids get the JSON error body.
#[tokio::test]
async fn test_malformed_requests() {
    let ctx = TestContext::with_cards(fixtures::sample_cards());
    let server = ctx.server();

    let bad_body = server.post("/flashCards").text("not json").await;
    bad_body.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = bad_body.json();
    assert_eq!(body["error"], "bad_request");

    let wrong_type = server
        .patch("/flashCards/1")
        .json(&serde_json::json!({ "questionOrder": "first" }))
        .await;
    wrong_type.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = wrong_type.json();
    assert_eq!(body["error"], "bad_request");

    let bad_id = server.get("/flashCards/abc").await;
    bad_id.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = bad_id.json();
    assert_eq!(body["error"], "bad_request");
    assert!(!body["message"].as_str().unwrap().is_empty());

    let untouched = ctx.db.get(1).await.unwrap();
    assert_eq!(untouched, fixtures::flashcard(1, 1, QuestionStatus::Noted));
}

/// Test a fractional order is stored and served as is.
#[tokio::test]
async fn test_patch_fractional_order() {
    let ctx = TestContext::with_cards(fixtures::sample_cards());
    let server = ctx.server();

    let response = server
        .patch("/flashCards/3")
        .json(&serde_json::json!({ "questionOrder": 1.5 }))
        .await;
    response.assert_status_ok();

    let list: serde_json::Value = server.get("/flashCards").await.json();
    assert_eq!(list[2]["questionOrder"], 1.5);
    assert_eq!(list[0]["questionOrder"], 1);
}

/// Test order-only patch leaves the other fields alone.
#[tokio::test]
async fn test_patch_order() {
    let ctx = TestContext::with_cards(fixtures::sample_cards());
    let server = ctx.server();

    let response = server
        .patch("/flashCards/1")
        .json(&fixtures::order_patch(3))
        .await;

    response.assert_status_ok();
    let card: Flashcard = response.json();
    assert_eq!(card.question_order, Some(3.0));
    assert_eq!(card.question_title, "Question 1");

    let stored = ctx.db.get(1).await.unwrap();
    assert_eq!(stored.question_order, Some(3.0));
}

/// Test patch of a missing card.
#[tokio::test]
async fn test_patch_missing_card() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .patch("/flashCards/7")
        .json(&fixtures::order_patch(1))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

/// Test delete removes the card once.
#[tokio::test]
async fn test_delete_card() {
    let ctx = TestContext::with_cards(fixtures::sample_cards());
    let server = ctx.server();

    let response = server.delete("/flashCards/2").await;
    response.assert_status_ok();

    let remaining: Vec<i64> = ctx.db.list().await.iter().map(|c| c.id).collect();
    assert_eq!(remaining, vec![1, 3]);

    let again = server.delete("/flashCards/2").await;
    again.assert_status(StatusCode::NOT_FOUND);
}
