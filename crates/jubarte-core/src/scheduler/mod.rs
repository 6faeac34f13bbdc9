//! Review scheduling strategies.
//!
//! Two strategies share the [`Scheduler`] capability:
//! - [`FixedHorizonScheduler`] precomputes a full, immutable review plan
//! - [`AdaptiveScheduler`] keeps one evolving record per item and reschedules
//!   it after every outcome
//!
//! The strategy is chosen once, from [`SchedulerConfig::kind`], via
//! [`scheduler_for`].

mod adaptive;
mod fixed;

pub use adaptive::{AdaptiveScheduler, MAX_EASE, MAX_INTERVAL_DAYS, MIN_EASE};
pub use fixed::FixedHorizonScheduler;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;
use crate::models::{ReviewRecord, StudyItem};

/// Canonical fixed-horizon offsets, in days.
pub const DEFAULT_FIXED_OFFSETS: [u32; 10] = [1, 3, 7, 14, 30, 60, 120, 240, 360, 720];

/// Canonical adaptive base intervals, in days. Only the first one seeds new records.
pub const DEFAULT_BASE_INTERVALS: [u32; 4] = [1, 3, 7, 14];

/// Which scheduling strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerKind {
    #[default]
    Fixed,
    Adaptive,
}

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub kind: SchedulerKind,
    /// Day offsets of the fixed-horizon plan
    #[serde(default = "default_fixed_offsets")]
    pub fixed_offsets: Vec<u32>,
    /// Adaptive base intervals
    #[serde(default = "default_base_intervals")]
    pub base_intervals: Vec<u32>,
    /// Ease assigned to new adaptive records
    #[serde(default = "crate::models::default_ease")]
    pub initial_ease: f64,
}

fn default_fixed_offsets() -> Vec<u32> {
    DEFAULT_FIXED_OFFSETS.to_vec()
}

fn default_base_intervals() -> Vec<u32> {
    DEFAULT_BASE_INTERVALS.to_vec()
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            kind: SchedulerKind::default(),
            fixed_offsets: default_fixed_offsets(),
            base_intervals: default_base_intervals(),
            initial_ease: crate::models::default_ease(),
        }
    }
}

/// Capability shared by both scheduling strategies.
///
/// `now` is always supplied by the caller.
pub trait Scheduler {
    fn kind(&self) -> SchedulerKind;

    /// Produce the initial review records for a freshly created item,
    /// ascending by scheduled date.
    fn generate_initial(&self, item: &StudyItem, now: DateTime<Utc>) -> Vec<ReviewRecord>;

    /// Apply a review outcome label to a record.
    ///
    /// # Errors
    /// [`SchedulerError::InvalidResult`] for an unknown label,
    /// [`SchedulerError::NotAdaptive`] when the record cannot evolve.
    fn update(
        &self,
        record: ReviewRecord,
        result: &str,
        now: DateTime<Utc>,
    ) -> Result<ReviewRecord, SchedulerError>;
}

/// Build the strategy selected by `config.kind`.
pub fn scheduler_for(config: &SchedulerConfig) -> Box<dyn Scheduler> {
    match config.kind {
        SchedulerKind::Fixed => {
            Box::new(FixedHorizonScheduler::with_offsets(&config.fixed_offsets))
        }
        SchedulerKind::Adaptive => Box::new(AdaptiveScheduler::with_config(
            &config.base_intervals,
            config.initial_ease,
        )),
    }
}
