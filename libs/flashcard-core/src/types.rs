//! Core types for the flashcard collection.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Learning status a user assigns to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionStatus {
    #[serde(rename = "Want to Learn")]
    WantToLearn,
    #[serde(rename = "Noted")]
    Noted,
    #[serde(rename = "Learned")]
    Learned,
}

impl QuestionStatus {
    pub const ALL: [QuestionStatus; 3] = [Self::WantToLearn, Self::Noted, Self::Learned];

    /// Label as stored by the remote store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WantToLearn => "Want to Learn",
            Self::Noted => "Noted",
            Self::Learned => "Learned",
        }
    }
}

impl Default for QuestionStatus {
    fn default() -> Self {
        Self::WantToLearn
    }
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::UnknownStatus(s.to_string()))
    }
}

/// Status filter selection. `"all"` passes every card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(QuestionStatus),
}

impl StatusFilter {
    /// Value of the matching filter option.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    pub fn matches(&self, status: QuestionStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Ordering applied to the filtered list.
///
/// How a sort option string maps onto a key depends on the view profile,
/// see [`crate::pipeline::ViewProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Ascending `questionOrder`.
    PersonalOrder,
    /// Newest `questionDate` first.
    Date,
    /// Ascending id.
    Id,
    /// Lexicographic by title.
    Question,
    /// Lexicographic by answer.
    Answer,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PersonalOrder => "Personal Order",
            Self::Date => "Date",
            Self::Id => "ID",
            Self::Question => "Question",
            Self::Answer => "Answer",
        }
    }
}

/// A flashcard as served by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: i64,
    pub question_title: String,
    pub question_answer: String,
    #[serde(default)]
    pub question_options: Vec<String>,
    #[serde(
        default,
        with = "date_format",
        skip_serializing_if = "Option::is_none"
    )]
    pub question_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub question_status: QuestionStatus,
    #[serde(
        default,
        with = "order_format",
        skip_serializing_if = "Option::is_none"
    )]
    pub question_order: Option<f64>,
}

impl Flashcard {
    /// Build a stored card from a creation payload.
    pub fn from_new(id: i64, order: f64, new: NewFlashcard) -> Self {
        Self {
            id,
            question_title: new.question_title,
            question_answer: new.question_answer,
            question_options: new.question_options,
            question_date: new.question_date,
            question_status: new.question_status,
            question_order: Some(new.question_order.unwrap_or(order)),
        }
    }

    /// Return a copy with every field present in `patch` overwritten.
    pub fn patched(&self, patch: &FlashcardPatch) -> Self {
        let mut card = self.clone();
        if let Some(title) = &patch.question_title {
            card.question_title = title.clone();
        }
        if let Some(answer) = &patch.question_answer {
            card.question_answer = answer.clone();
        }
        if let Some(options) = &patch.question_options {
            card.question_options = options.clone();
        }
        if let Some(date) = patch.question_date {
            card.question_date = Some(date);
        }
        if let Some(status) = patch.question_status {
            card.question_status = status;
        }
        if let Some(order) = patch.question_order {
            card.question_order = Some(order);
        }
        card
    }

    /// Return a copy with a different personal order.
    pub fn with_order(&self, order: f64) -> Self {
        Self {
            question_order: Some(order),
            ..self.clone()
        }
    }
}

/// Creation payload; the store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFlashcard {
    pub question_title: String,
    pub question_answer: String,
    #[serde(default)]
    pub question_options: Vec<String>,
    #[serde(
        default,
        with = "date_format",
        skip_serializing_if = "Option::is_none"
    )]
    pub question_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub question_status: QuestionStatus,
    #[serde(
        default,
        with = "order_format",
        skip_serializing_if = "Option::is_none"
    )]
    pub question_order: Option<f64>,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_options: Option<Vec<String>>,
    #[serde(
        default,
        with = "date_format",
        skip_serializing_if = "Option::is_none"
    )]
    pub question_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_status: Option<QuestionStatus>,
    #[serde(
        default,
        with = "order_format",
        skip_serializing_if = "Option::is_none"
    )]
    pub question_order: Option<f64>,
}

impl FlashcardPatch {
    /// Patch that only moves a card within the personal order.
    pub fn order(order: f64) -> Self {
        Self {
            question_order: Some(order),
            ..Default::default()
        }
    }
}

/// Parse a card date the way the store hands them out.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (taken as UTC) and plain
/// `YYYY-MM-DD` (UTC midnight).
pub fn parse_question_date(value: &str) -> crate::Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CoreError::InvalidDate(value.to_string()))
}

/// Serde adapter for optional, leniently formatted card dates.
///
/// Values that cannot be parsed deserialize to `None` instead of failing
/// the whole record.
pub mod date_format {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.and_then(|s| super::parse_question_date(&s).ok()))
    }
}

/// Serde adapter for the personal order.
///
/// Any JSON number is accepted. Whole values are written back as integers
/// so records the store handed out as `3` round-trip as `3`, not `3.0`.
pub mod order_format {
    use serde::{Deserialize, Deserializer, Serializer};

    const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(order) if order.fract() == 0.0 && order.abs() <= MAX_EXACT_INTEGER => {
                serializer.serialize_i64(*order as i64)
            }
            Some(order) => serializer.serialize_f64(*order),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<f64>::deserialize(deserializer)
    }
}
