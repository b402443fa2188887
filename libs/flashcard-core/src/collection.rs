//! State of the flashcard collection view.
//!
//! [`CollectionState`] is an immutable snapshot. Every user interaction or
//! network completion is an [`Action`]; [`CollectionState::reduce`] returns
//! the next snapshot together with the side effects the host must perform.
//! The remote store stays the eventual source of truth for the personal
//! order, while the snapshot is what the view renders.

use crate::error::CoreError;
use crate::pipeline::{self, ViewProfile, ViewQuery, CARDS_PER_PAGE};
use crate::reorder::{self, DragState, SwapPlan, PERSONAL_ORDER_REQUIRED};
use crate::selection::Selection;
use crate::share::{self, SHARE_SUBJECT};
use crate::types::{Flashcard, SortKey, StatusFilter};

/// Everything that can happen to the collection view.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Initial fetch completed.
    Loaded(Vec<Flashcard>),
    SetSearch(String),
    SetStatus(StatusFilter),
    SetSort(SortKey),
    DragStart(i64),
    DragOver,
    Drop(i64),
    ToggleSelect(i64),
    Share,
    CardAdded(Flashcard),
    CardUpdated(Flashcard),
    CardDeleted(i64),
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Show a notice to the user.
    Notify(String),
    /// Write both new orders to the remote store, source first.
    PersistSwap(SwapPlan),
    /// Open a mail composition target.
    OpenMail(String),
}

/// Result of reducing one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: CollectionState,
    pub effects: Vec<Effect>,
    /// Diagnostic for aborted interactions. Never shown to the user.
    pub error: Option<CoreError>,
    /// Set by `DragOver`: the hovered card accepts a drop.
    pub accepts_drop: bool,
}

impl Transition {
    fn to(state: CollectionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
            error: None,
            accepts_drop: false,
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    fn with_error(mut self, error: CoreError) -> Self {
        self.error = Some(error);
        self
    }
}

/// Snapshot of the collection view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectionState {
    cards: Vec<Flashcard>,
    query: ViewQuery,
    selection: Selection,
    drag: DragState,
}

impl CollectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: Vec<Flashcard>) -> Self {
        Self {
            cards: dedup_by_id(cards),
            ..Self::default()
        }
    }

    /// Every loaded card, in store order.
    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn card(&self, id: i64) -> Option<&Flashcard> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Filtered and sorted cards, recomputed from the current inputs.
    pub fn visible(&self) -> Vec<Flashcard> {
        pipeline::apply(&self.cards, &self.query)
    }

    /// "Share Selected" is offered only with a non-empty selection.
    pub fn can_share(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn reduce(&self, action: Action) -> Transition {
        match action {
            Action::Loaded(cards) => Transition::to(Self {
                cards: dedup_by_id(cards),
                ..self.clone()
            }),
            Action::SetSearch(search) => Transition::to(Self {
                query: ViewQuery {
                    search,
                    ..self.query.clone()
                },
                ..self.clone()
            }),
            Action::SetStatus(status) => Transition::to(Self {
                query: ViewQuery {
                    status,
                    ..self.query.clone()
                },
                ..self.clone()
            }),
            Action::SetSort(sort) => Transition::to(Self {
                query: ViewQuery {
                    sort,
                    ..self.query.clone()
                },
                ..self.clone()
            }),
            Action::DragStart(id) => self.drag_start(id),
            Action::DragOver => Transition {
                accepts_drop: true,
                ..Transition::to(self.clone())
            },
            Action::Drop(target_id) => self.drop_on(target_id),
            Action::ToggleSelect(id) => {
                let mut selection = self.selection.clone();
                selection.toggle(id);
                Transition::to(Self {
                    selection,
                    ..self.clone()
                })
            }
            Action::Share => self.share(),
            Action::CardAdded(card) => {
                let mut cards = self.cards.clone();
                match cards.iter_mut().find(|existing| existing.id == card.id) {
                    Some(existing) => *existing = card,
                    None => cards.push(card),
                }
                Transition::to(Self {
                    cards,
                    ..self.clone()
                })
            }
            Action::CardUpdated(card) => Transition::to(Self {
                cards: self
                    .cards
                    .iter()
                    .map(|existing| {
                        if existing.id == card.id {
                            card.clone()
                        } else {
                            existing.clone()
                        }
                    })
                    .collect(),
                ..self.clone()
            }),
            Action::CardDeleted(id) => {
                let mut selection = self.selection.clone();
                selection.remove(id);
                let drag = match self.drag {
                    DragState::Dragging { source_id } if source_id == id => DragState::Idle,
                    other => other,
                };
                Transition::to(Self {
                    cards: self.cards.iter().filter(|c| c.id != id).cloned().collect(),
                    selection,
                    drag,
                    ..self.clone()
                })
            }
        }
    }

    fn drag_start(&self, id: i64) -> Transition {
        if self.query.sort != SortKey::PersonalOrder {
            return Transition::to(self.clone())
                .with_effect(Effect::Notify(PERSONAL_ORDER_REQUIRED.to_string()));
        }

        if self.card(id).is_none() {
            return Transition::to(self.clone()).with_error(CoreError::CardNotFound(id));
        }

        Transition::to(Self {
            drag: DragState::Dragging { source_id: id },
            ..self.clone()
        })
    }

    fn drop_on(&self, target_id: i64) -> Transition {
        let idle = Self {
            drag: DragState::Idle,
            ..self.clone()
        };

        let Some(source_id) = self.drag.source_id() else {
            return Transition::to(idle).with_error(CoreError::NoDragSource);
        };
        if source_id == target_id {
            return Transition::to(idle);
        }

        let (Some(source), Some(target)) = (self.card(source_id), self.card(target_id)) else {
            let missing = if self.card(source_id).is_none() {
                source_id
            } else {
                target_id
            };
            return Transition::to(idle).with_error(CoreError::CardNotFound(missing));
        };

        match reorder::plan_swap(source, target) {
            Ok(Some(plan)) => Transition::to(Self {
                cards: reorder::apply_swap(&self.cards, &plan),
                ..idle
            })
            .with_effect(Effect::PersistSwap(plan)),
            Ok(None) => Transition::to(idle),
            Err(e) => Transition::to(idle).with_error(e),
        }
    }

    fn share(&self) -> Transition {
        if self.selection.is_empty() {
            return Transition::to(self.clone());
        }

        let cleared = Self {
            selection: Selection::new(),
            ..self.clone()
        };

        match share::share_payload(&self.visible(), &self.selection) {
            Ok(json) => Transition::to(cleared)
                .with_effect(Effect::OpenMail(share::mailto_link(SHARE_SUBJECT, &json))),
            Err(e) => Transition::to(cleared).with_error(e),
        }
    }
}

/// Keep the last record for every id, at the position of its first occurrence.
fn dedup_by_id(cards: Vec<Flashcard>) -> Vec<Flashcard> {
    let mut out: Vec<Flashcard> = Vec::with_capacity(cards.len());
    for card in cards {
        match out.iter_mut().find(|existing| existing.id == card.id) {
            Some(existing) => *existing = card,
            None => out.push(card),
        }
    }
    out
}

/// State of the embedded browse card.
///
/// The card list belongs to the parent; this only holds the query and
/// applies it with the browse profile (date-first default sort, first page
/// only). Browsing is read-only: no selection, sharing or reordering.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseState {
    query: ViewQuery,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            query: ViewQuery::for_profile(ViewProfile::Browse),
        }
    }
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn with_search(&self, search: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.query.search = search.into();
        next
    }

    pub fn with_status(&self, status: StatusFilter) -> Self {
        let mut next = self.clone();
        next.query.status = status;
        next
    }

    pub fn with_sort(&self, sort: SortKey) -> Self {
        let mut next = self.clone();
        next.query.sort = sort;
        next
    }

    /// Filtered and sorted cards.
    pub fn visible(&self, cards: &[Flashcard]) -> Vec<Flashcard> {
        pipeline::apply(cards, &self.query)
    }

    /// The first page of [`Self::visible`].
    pub fn visible_page(&self, cards: &[Flashcard]) -> Vec<Flashcard> {
        let mut visible = self.visible(cards);
        visible.truncate(CARDS_PER_PAGE);
        visible
    }
}
