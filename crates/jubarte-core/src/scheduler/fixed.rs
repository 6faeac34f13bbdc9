//! Fixed-horizon scheduling: a full review plan computed once at creation.

use chrono::{DateTime, Duration, Utc};

use super::{Scheduler, SchedulerKind, DEFAULT_FIXED_OFFSETS};
use crate::error::SchedulerError;
use crate::models::{FixedReview, Outcome, ReviewRecord, StudyItem};

/// Emits one immutable record per configured day offset.
#[derive(Debug, Clone)]
pub struct FixedHorizonScheduler {
    offsets: Vec<u32>,
}

impl FixedHorizonScheduler {
    /// Create a scheduler with the canonical offsets.
    pub fn new() -> Self {
        Self::with_offsets(&DEFAULT_FIXED_OFFSETS)
    }

    /// Create with custom offsets. Offsets are sorted and de-duplicated;
    /// zero is dropped so no review lands on the creation instant.
    pub fn with_offsets(offsets: &[u32]) -> Self {
        let mut offsets: Vec<u32> = offsets.iter().copied().filter(|d| *d > 0).collect();
        offsets.sort_unstable();
        offsets.dedup();
        Self { offsets }
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }
}

impl Default for FixedHorizonScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for FixedHorizonScheduler {
    fn kind(&self) -> SchedulerKind {
        SchedulerKind::Fixed
    }

    fn generate_initial(&self, item: &StudyItem, now: DateTime<Utc>) -> Vec<ReviewRecord> {
        log::debug!(
            "scheduling {} fixed reviews for item {}",
            self.offsets.len(),
            item.id
        );
        self.offsets
            .iter()
            .map(|days| {
                ReviewRecord::Fixed(FixedReview {
                    item_id: item.id.clone(),
                    review_date: Some(now + Duration::days(i64::from(*days))),
                })
            })
            .collect()
    }

    fn update(
        &self,
        record: ReviewRecord,
        result: &str,
        _now: DateTime<Utc>,
    ) -> Result<ReviewRecord, SchedulerError> {
        result.parse::<Outcome>()?;
        Err(SchedulerError::NotAdaptive {
            item_id: record.item_id().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_canonical_plan_has_ten_ascending_reviews() {
        let scheduler = FixedHorizonScheduler::new();
        let item = StudyItem::new("Neuroscience basics", "", t0());

        let reviews = scheduler.generate_initial(&item, t0());

        assert_eq!(reviews.len(), 10);
        let dates: Vec<_> = reviews.iter().map(|r| r.scheduled_at().unwrap()).collect();
        for pair in dates.windows(2) {
            assert!(pair[0] < pair[1], "reviews must be strictly ascending");
        }
        let offsets: Vec<i64> = dates.iter().map(|d| (*d - t0()).num_days()).collect();
        assert_eq!(offsets, vec![1, 3, 7, 14, 30, 60, 120, 240, 360, 720]);
        assert!(reviews.iter().all(|r| r.item_id() == item.id));
    }

    #[test]
    fn test_earliest_review_is_one_day_after_creation() {
        let scheduler = FixedHorizonScheduler::new();
        let item = StudyItem::new("Neuroscience basics", "", t0());

        let reviews = scheduler.generate_initial(&item, t0());

        assert_eq!(reviews[0].scheduled_at(), Some(t0() + Duration::days(1)));
    }

    #[test]
    fn test_custom_offsets_are_normalized() {
        let scheduler = FixedHorizonScheduler::with_offsets(&[7, 0, 1, 7, 3]);
        assert_eq!(scheduler.offsets(), &[1, 3, 7]);
    }

    #[test]
    fn test_update_is_rejected() {
        let scheduler = FixedHorizonScheduler::new();
        let item = StudyItem::new("Topology", "", t0());
        let record = scheduler.generate_initial(&item, t0()).remove(0);

        let err = scheduler.update(record.clone(), "good", t0()).unwrap_err();
        assert_eq!(err, SchedulerError::NotAdaptive { item_id: item.id.clone() });

        let err = scheduler.update(record, "meh", t0()).unwrap_err();
        assert_eq!(err, SchedulerError::InvalidResult("meh".to_string()));
    }
}
