//! Search, status filter and sort pipeline.
//!
//! Everything here is a pure function of the card list and a [`ViewQuery`];
//! callers recompute the visible list whenever any input changes.

use std::cmp::Ordering;

use crate::error::{CoreError, Result};
use crate::types::{Flashcard, SortKey, StatusFilter};

/// Page size of the browse view.
pub const CARDS_PER_PAGE: usize = 9;

/// The two views disagree on what the `"default"` sort option means, so
/// option strings are always parsed relative to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewProfile {
    /// Full collection page with drag-and-drop. `"default"` is Personal Order.
    #[default]
    Collection,
    /// Embedded search/filter/sort card. `"default"` is Date.
    Browse,
}

impl ViewProfile {
    pub fn default_sort(self) -> SortKey {
        match self {
            Self::Collection => SortKey::PersonalOrder,
            Self::Browse => SortKey::Date,
        }
    }

    /// Sort options as `(value, label)` pairs, in display order.
    pub fn sort_options(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Collection => &[
                ("default", "Personal Order"),
                ("Date", "Date"),
                ("ID", "ID"),
                ("Question", "Question"),
                ("Answer", "Answer"),
            ],
            Self::Browse => &[
                ("default", "Date"),
                ("ID", "ID"),
                ("Question", "Question"),
                ("Answer", "Answer"),
            ],
        }
    }

    /// Map a sort option value onto a key.
    pub fn parse_sort(self, value: &str) -> Result<SortKey> {
        match (self, value) {
            (_, "default") => Ok(self.default_sort()),
            (_, "ID") => Ok(SortKey::Id),
            (_, "Question") => Ok(SortKey::Question),
            (_, "Answer") => Ok(SortKey::Answer),
            (Self::Collection, "Date") => Ok(SortKey::Date),
            _ => Err(CoreError::UnknownSortOption(value.to_string())),
        }
    }

    /// Option value that selects `key`, if the profile offers it.
    pub fn sort_value(self, key: SortKey) -> Option<&'static str> {
        match key {
            key if key == self.default_sort() => Some("default"),
            SortKey::Id => Some("ID"),
            SortKey::Question => Some("Question"),
            SortKey::Answer => Some("Answer"),
            SortKey::Date if self == Self::Collection => Some("Date"),
            _ => None,
        }
    }
}

/// The three user selections that shape the visible list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub status: StatusFilter,
    pub sort: SortKey,
}

impl ViewQuery {
    /// Initial selections for a profile: empty search, all statuses, default sort.
    pub fn for_profile(profile: ViewProfile) -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            sort: profile.default_sort(),
        }
    }
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self::for_profile(ViewProfile::default())
    }
}

/// Case-insensitive match on title, answer or any option.
///
/// `needle` must already be lowercased.
pub fn matches_search(card: &Flashcard, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    card.question_title.to_lowercase().contains(needle)
        || card
            .question_options
            .iter()
            .any(|option| option.to_lowercase().contains(needle))
        || card.question_answer.to_lowercase().contains(needle)
}

/// Comparator for a sort key.
pub fn compare(a: &Flashcard, b: &Flashcard, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Question => compare_text(&a.question_title, &b.question_title),
        SortKey::Answer => compare_text(&a.question_answer, &b.question_answer),
        // Newest first; undated cards sink to the end.
        SortKey::Date => match (a.question_date, b.question_date) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::PersonalOrder => match (a.question_order, b.question_order) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Filter then sort. The input slice is left untouched.
pub fn apply(cards: &[Flashcard], query: &ViewQuery) -> Vec<Flashcard> {
    let needle = query.search.to_lowercase();

    let mut visible: Vec<Flashcard> = cards
        .iter()
        .filter(|card| matches_search(card, &needle))
        .filter(|card| query.status.matches(card.question_status))
        .cloned()
        .collect();

    visible.sort_by(|a, b| compare(a, b, query.sort));
    visible
}
