//! HTTP route handlers

pub mod flashcards;
