//! Core flashcard collection library shared by the client and the store.
//!
//! Provides:
//! - Shared types (Flashcard, QuestionStatus, SortKey, etc.)
//! - The search/filter/sort pipeline and its two view profiles
//! - Drag-and-drop swap planning for the personal order
//! - Selection and email sharing
//! - The snapshot state container driving the collection view

pub mod collection;
pub mod error;
pub mod pipeline;
pub mod reorder;
pub mod selection;
pub mod share;
pub mod types;

pub use collection::{Action, BrowseState, CollectionState, Effect, Transition};
pub use error::{CoreError, Result};
pub use pipeline::{ViewProfile, ViewQuery, CARDS_PER_PAGE};
pub use reorder::{DragState, SwapPlan, PERSONAL_ORDER_REQUIRED};
pub use selection::Selection;
pub use share::{mailto_link, share_payload, SharedCard, SHARE_SUBJECT};
pub use types::{
    parse_question_date, Flashcard, FlashcardPatch, NewFlashcard, QuestionStatus, SortKey,
    StatusFilter,
};
