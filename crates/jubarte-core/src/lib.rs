//! # Jubarte Core Library
//!
//! Core logic for the Jubarte spaced-repetition study tracker. Users register
//! study topics, the scheduler plans review dates, and reviews are exported
//! to an iCalendar file or rescheduled from review feedback.
//!
//! ## Architecture
//!
//! - **Scheduler**: two strategies behind one trait. Fixed-horizon plans are
//!   computed once; adaptive records evolve with each outcome
//! - **Export**: RFC 5545 encoder with escaping, line folding and atomic writes
//! - **Storage**: JSON file and in-memory stores, TOML configuration
//! - **App**: orchestration used by the CLI
//!
//! ## Key Components
//!
//! - [`Scheduler`]: scheduling capability
//! - [`IcsExporter`]: calendar export
//! - [`Store`]: persistence collaborator
//! - [`Config`]: application configuration

pub mod app;
pub mod atomic;
pub mod error;
pub mod export;
pub mod models;
pub mod scheduler;
pub mod storage;

pub use app::{App, DuplicateTitlePolicy};
pub use error::{ConfigError, CoreError, ExportError, SchedulerError, StoreError};
pub use export::{EmptyExportPolicy, ExportSummary, IcsExporter};
pub use models::{
    AdaptiveReview, FixedReview, Outcome, ReviewHistoryEntry, ReviewRecord, StudyItem,
};
pub use scheduler::{
    scheduler_for, AdaptiveScheduler, FixedHorizonScheduler, Scheduler, SchedulerConfig,
    SchedulerKind,
};
pub use storage::{Config, FileStore, MemoryStore, Store};
