//! Drag-and-drop reordering of the personal order.
//!
//! Dropping one card onto another swaps their `questionOrder` values. The
//! swap is described by a [`SwapPlan`] so the local snapshot and the remote
//! writes are derived from the same numbers.

use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::types::Flashcard;

/// Notice shown when a drag starts under any sort other than Personal Order.
pub const PERSONAL_ORDER_REQUIRED: &str =
    "Sort by Personal Order to rearrange cards by dragging and dropping.";

/// Drag interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { source_id: i64 },
}

impl DragState {
    pub fn source_id(&self) -> Option<i64> {
        match self {
            Self::Idle => None,
            Self::Dragging { source_id } => Some(*source_id),
        }
    }
}

/// New orders for both cards of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwapPlan {
    pub source_id: i64,
    /// The target's order before the swap.
    pub source_order: f64,
    pub target_id: i64,
    /// The source's order before the swap.
    pub target_order: f64,
}

/// Plan the swap of `source` and `target`.
///
/// Returns `Ok(None)` when both are the same card.
pub fn plan_swap(source: &Flashcard, target: &Flashcard) -> Result<Option<SwapPlan>> {
    if source.id == target.id {
        return Ok(None);
    }

    let source_order = source
        .question_order
        .ok_or(CoreError::MissingOrder(source.id))?;
    let target_order = target
        .question_order
        .ok_or(CoreError::MissingOrder(target.id))?;

    Ok(Some(SwapPlan {
        source_id: source.id,
        source_order: target_order,
        target_id: target.id,
        target_order: source_order,
    }))
}

/// Build the post-swap list. Cards not named by the plan are cloned as-is.
pub fn apply_swap(cards: &[Flashcard], plan: &SwapPlan) -> Vec<Flashcard> {
    cards
        .iter()
        .map(|card| {
            if card.id == plan.target_id {
                card.with_order(plan.target_order)
            } else if card.id == plan.source_id {
                card.with_order(plan.source_order)
            } else {
                card.clone()
            }
        })
        .collect()
}
