//! Adaptive scheduling: one record per item, rescheduled after each outcome.
//!
//! Rules applied by [`AdaptiveScheduler::apply`]:
//! - interval: `max(1, round(interval * factor))` with factors
//!   again=1, hard=1.2, good=2, easy=3
//! - ease: easy adds 0.15 (capped at 4.5), again subtracts 0.2 (floored at
//!   1.3), hard and good leave it unchanged
//! - repetitions increase by one and the outcome is appended to the history

use chrono::{DateTime, Duration, Utc};

use super::{Scheduler, SchedulerKind, DEFAULT_BASE_INTERVALS};
use crate::error::SchedulerError;
use crate::models::{
    default_ease, AdaptiveReview, Outcome, ReviewHistoryEntry, ReviewRecord, StudyItem,
};

/// Lowest ease a record can reach
pub const MIN_EASE: f64 = 1.3;
/// Highest ease a record can reach
pub const MAX_EASE: f64 = 4.5;
/// Intervals saturate here so repeated "easy" never overflows the calendar.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

const EASY_EASE_BONUS: f64 = 0.15;
const AGAIN_EASE_PENALTY: f64 = 0.2;

/// Card-style scheduler that adapts each item's interval to review outcomes.
#[derive(Debug, Clone)]
pub struct AdaptiveScheduler {
    base_intervals: Vec<u32>,
    initial_ease: f64,
}

impl AdaptiveScheduler {
    /// Create a scheduler with the canonical base intervals and ease 2.5.
    pub fn new() -> Self {
        Self::with_config(&DEFAULT_BASE_INTERVALS, default_ease())
    }

    /// Create with custom base intervals and starting ease.
    pub fn with_config(base_intervals: &[u32], initial_ease: f64) -> Self {
        let initial_ease = if initial_ease.is_finite() {
            initial_ease.clamp(MIN_EASE, MAX_EASE)
        } else {
            default_ease()
        };
        Self {
            base_intervals: base_intervals.to_vec(),
            initial_ease,
        }
    }

    fn first_interval(&self) -> u32 {
        self.base_intervals.first().copied().unwrap_or(1).max(1)
    }

    /// Build the initial record for an item.
    pub fn initial_review(&self, item: &StudyItem, now: DateTime<Utc>) -> AdaptiveReview {
        let interval_days = self.first_interval();
        AdaptiveReview {
            item_id: item.id.clone(),
            next_review: Some(now + Duration::days(i64::from(interval_days))),
            interval_days,
            ease: self.initial_ease,
            repetitions: 0,
            history: Vec::new(),
        }
    }

    /// Apply a parsed outcome to a record, returning the rescheduled record.
    pub fn apply(
        &self,
        mut review: AdaptiveReview,
        outcome: Outcome,
        now: DateTime<Utc>,
    ) -> AdaptiveReview {
        review.interval_days = next_interval(review.interval_days, outcome);
        review.ease = next_ease(review.ease, outcome);
        review.repetitions = review.repetitions.saturating_add(1);
        review.next_review = Some(now + Duration::days(i64::from(review.interval_days)));
        review.history.push(ReviewHistoryEntry { when: now, result: outcome });
        log::debug!(
            "item {} reviewed as {}: interval {}d, ease {:.2}, repetitions {}",
            review.item_id,
            outcome,
            review.interval_days,
            review.ease,
            review.repetitions
        );
        review
    }

    /// Interval each outcome would produce, for display before answering.
    pub fn preview(&self, review: &AdaptiveReview) -> [(Outcome, u32); 4] {
        Outcome::ALL.map(|outcome| (outcome, next_interval(review.interval_days, outcome)))
    }
}

impl Default for AdaptiveScheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn next_interval(current: u32, outcome: Outcome) -> u32 {
    let scaled = (f64::from(current) * outcome.interval_factor()).round();
    scaled.clamp(1.0, f64::from(MAX_INTERVAL_DAYS)) as u32
}

fn next_ease(ease: f64, outcome: Outcome) -> f64 {
    let adjusted = match outcome {
        Outcome::Easy => (ease + EASY_EASE_BONUS).min(MAX_EASE),
        Outcome::Again => (ease - AGAIN_EASE_PENALTY).max(MIN_EASE),
        Outcome::Hard | Outcome::Good => ease,
    };
    adjusted.clamp(MIN_EASE, MAX_EASE)
}

impl Scheduler for AdaptiveScheduler {
    fn kind(&self) -> SchedulerKind {
        SchedulerKind::Adaptive
    }

    fn generate_initial(&self, item: &StudyItem, now: DateTime<Utc>) -> Vec<ReviewRecord> {
        log::debug!("scheduling adaptive review for item {}", item.id);
        vec![ReviewRecord::Adaptive(self.initial_review(item, now))]
    }

    fn update(
        &self,
        record: ReviewRecord,
        result: &str,
        now: DateTime<Utc>,
    ) -> Result<ReviewRecord, SchedulerError> {
        let outcome: Outcome = result.parse()?;
        match record {
            ReviewRecord::Adaptive(review) => {
                Ok(ReviewRecord::Adaptive(self.apply(review, outcome, now)))
            }
            ReviewRecord::Fixed(review) => Err(SchedulerError::NotAdaptive {
                item_id: review.item_id,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FixedReview;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 3, 12, 0, 0).unwrap()
    }

    fn new_review() -> AdaptiveReview {
        let item = StudyItem::new("Spanish verbs", "", t0());
        AdaptiveScheduler::new().initial_review(&item, t0())
    }

    fn review_with(interval_days: u32, ease: f64) -> AdaptiveReview {
        AdaptiveReview {
            interval_days,
            ease,
            ..new_review()
        }
    }

    #[test]
    fn test_initial_review() {
        let review = new_review();
        assert_eq!(review.interval_days, 1);
        assert_eq!(review.ease, 2.5);
        assert_eq!(review.repetitions, 0);
        assert!(review.history.is_empty());
        assert_eq!(review.next_review, Some(t0() + Duration::days(1)));
    }

    #[test]
    fn test_generate_initial_returns_single_record() {
        let item = StudyItem::new("Spanish verbs", "", t0());
        let records = AdaptiveScheduler::new().generate_initial(&item, t0());
        assert_eq!(records.len(), 1);
        assert!(records[0].as_adaptive().is_some());
    }

    #[test]
    fn test_good_twice_doubles_interval() {
        let scheduler = AdaptiveScheduler::new();
        let later = t0() + Duration::days(1);

        let first = scheduler.apply(new_review(), Outcome::Good, t0());
        assert_eq!(first.interval_days, 2);
        assert_eq!(first.next_review, Some(t0() + Duration::days(2)));

        let second = scheduler.apply(first, Outcome::Good, later);
        assert_eq!(second.interval_days, 4);
        assert_eq!(second.repetitions, 2);
        assert_eq!(second.next_review, Some(later + Duration::days(4)));
        assert_eq!(second.history.len(), 2);
        assert_eq!(second.history[1].when, later);
    }

    #[test]
    fn test_again_keeps_interval_and_lowers_ease() {
        let scheduler = AdaptiveScheduler::new();
        let review = scheduler.apply(review_with(7, 2.5), Outcome::Again, t0());
        assert_eq!(review.interval_days, 7);
        assert!((review.ease - 2.3).abs() < 1e-9);
    }

    #[test]
    fn test_hard_rounds_half_away_from_zero() {
        let scheduler = AdaptiveScheduler::new();
        // 1 * 1.2 = 1.2 -> 1, 3 * 1.2 = 3.6 -> 4
        assert_eq!(scheduler.apply(review_with(1, 2.5), Outcome::Hard, t0()).interval_days, 1);
        assert_eq!(scheduler.apply(review_with(3, 2.5), Outcome::Hard, t0()).interval_days, 4);
    }

    #[test]
    fn test_zero_interval_is_clamped_to_one() {
        let scheduler = AdaptiveScheduler::new();
        let review = scheduler.apply(review_with(0, 2.5), Outcome::Good, t0());
        assert_eq!(review.interval_days, 1);
    }

    #[test]
    fn test_repeated_easy_never_exceeds_max_ease() {
        let scheduler = AdaptiveScheduler::new();
        let mut review = new_review();
        let mut previous = review.ease;
        for _ in 0..40 {
            review = scheduler.apply(review, Outcome::Easy, t0());
            assert!(review.ease <= MAX_EASE);
            assert!(review.ease >= previous);
            previous = review.ease;
        }
        assert_eq!(review.ease, MAX_EASE);
        assert_eq!(review.interval_days, MAX_INTERVAL_DAYS);
    }

    #[test]
    fn test_repeated_again_never_drops_below_min_ease() {
        let scheduler = AdaptiveScheduler::new();
        let mut review = new_review();
        for _ in 0..20 {
            review = scheduler.apply(review, Outcome::Again, t0());
        }
        assert_eq!(review.ease, MIN_EASE);
        assert_eq!(review.interval_days, 1);
    }

    #[test]
    fn test_update_rejects_unknown_label() {
        let scheduler = AdaptiveScheduler::new();
        let record = ReviewRecord::Adaptive(new_review());
        let err = scheduler.update(record, "perfect", t0()).unwrap_err();
        assert_eq!(err, SchedulerError::InvalidResult("perfect".to_string()));
    }

    #[test]
    fn test_update_rejects_fixed_record() {
        let scheduler = AdaptiveScheduler::new();
        let record = ReviewRecord::Fixed(FixedReview {
            item_id: "item-9".to_string(),
            review_date: Some(t0()),
        });
        let err = scheduler.update(record, "good", t0()).unwrap_err();
        assert_eq!(err, SchedulerError::NotAdaptive { item_id: "item-9".to_string() });
    }

    #[test]
    fn test_preview_intervals() {
        let scheduler = AdaptiveScheduler::new();
        let preview = scheduler.preview(&review_with(5, 2.5));
        assert_eq!(
            preview,
            [
                (Outcome::Again, 5),
                (Outcome::Hard, 6),
                (Outcome::Good, 10),
                (Outcome::Easy, 15),
            ]
        );
    }

    #[test]
    fn test_initial_ease_is_clamped() {
        let item = StudyItem::new("Chess openings", "", t0());
        let review = AdaptiveScheduler::with_config(&[], 9.0).initial_review(&item, t0());
        assert_eq!(review.ease, MAX_EASE);
        assert_eq!(review.interval_days, 1);
    }

    proptest! {
        #[test]
        fn update_keeps_interval_and_ease_in_bounds(
            interval in 0u32..10_000,
            ease in MIN_EASE..MAX_EASE,
            outcome_idx in 0usize..4,
        ) {
            let scheduler = AdaptiveScheduler::new();
            let outcome = Outcome::ALL[outcome_idx];
            let review = scheduler.apply(review_with(interval, ease), outcome, t0());
            prop_assert!(review.interval_days >= 1);
            prop_assert!(review.ease >= MIN_EASE && review.ease <= MAX_EASE);
        }

        #[test]
        fn outcome_sequences_stay_in_bounds(outcomes in prop::collection::vec(0usize..4, 1..40)) {
            let scheduler = AdaptiveScheduler::new();
            let mut record = ReviewRecord::Adaptive(new_review());
            for (n, idx) in outcomes.iter().enumerate() {
                let label = Outcome::ALL[*idx].as_str();
                record = scheduler.update(record, label, t0()).unwrap();
                let review = record.as_adaptive().unwrap();
                prop_assert!(review.interval_days >= 1);
                prop_assert!(review.ease >= MIN_EASE && review.ease <= MAX_EASE);
                prop_assert_eq!(review.repetitions as usize, n + 1);
                prop_assert!(record.scheduled_at().unwrap() > t0());
            }
        }
    }
}
