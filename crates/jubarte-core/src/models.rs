//! Domain models for study items and their scheduled reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SchedulerError;

/// A study topic registered for spaced review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl StudyItem {
    /// Create a new item with a freshly generated id.
    pub fn new(title: impl Into<String>, notes: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            notes: notes.into(),
            created_at: now,
        }
    }
}

/// User feedback after a review session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Again,
    Hard,
    Good,
    Easy,
}

impl Outcome {
    pub const ALL: [Outcome; 4] = [Outcome::Again, Outcome::Hard, Outcome::Good, Outcome::Easy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Again => "again",
            Outcome::Hard => "hard",
            Outcome::Good => "good",
            Outcome::Easy => "easy",
        }
    }

    /// Multiplier applied to the current interval.
    pub fn interval_factor(&self) -> f64 {
        match self {
            Outcome::Again => 1.0,
            Outcome::Hard => 1.2,
            Outcome::Good => 2.0,
            Outcome::Easy => 3.0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "again" => Ok(Outcome::Again),
            "hard" => Ok(Outcome::Hard),
            "good" => Ok(Outcome::Good),
            "easy" => Ok(Outcome::Easy),
            _ => Err(SchedulerError::InvalidResult(s.to_string())),
        }
    }
}

/// One past outcome of an adaptive review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewHistoryEntry {
    pub when: DateTime<Utc>,
    pub result: Outcome,
}

/// A precomputed review date. Never rescheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedReview {
    pub item_id: String,
    #[serde(default)]
    pub review_date: Option<DateTime<Utc>>,
}

/// The single evolving review of an item under adaptive scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveReview {
    pub item_id: String,
    #[serde(default, alias = "review_date")]
    pub next_review: Option<DateTime<Utc>>,
    pub interval_days: u32,
    #[serde(default = "default_ease")]
    pub ease: f64,
    #[serde(default)]
    pub repetitions: u32,
    #[serde(default)]
    pub history: Vec<ReviewHistoryEntry>,
}

pub(crate) fn default_ease() -> f64 {
    2.5
}

/// A scheduled review, in one of the two supported shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReviewRecord {
    Fixed(FixedReview),
    Adaptive(AdaptiveReview),
}

impl ReviewRecord {
    pub fn item_id(&self) -> &str {
        match self {
            ReviewRecord::Fixed(r) => &r.item_id,
            ReviewRecord::Adaptive(r) => &r.item_id,
        }
    }

    /// Scheduled date, `None` only for records loaded without one.
    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        match self {
            ReviewRecord::Fixed(r) => r.review_date,
            ReviewRecord::Adaptive(r) => r.next_review,
        }
    }

    pub fn as_adaptive(&self) -> Option<&AdaptiveReview> {
        match self {
            ReviewRecord::Adaptive(r) => Some(r),
            ReviewRecord::Fixed(_) => None,
        }
    }
}

impl From<FixedReview> for ReviewRecord {
    fn from(review: FixedReview) -> Self {
        ReviewRecord::Fixed(review)
    }
}

impl From<AdaptiveReview> for ReviewRecord {
    fn from(review: AdaptiveReview) -> Self {
        ReviewRecord::Adaptive(review)
    }
}
