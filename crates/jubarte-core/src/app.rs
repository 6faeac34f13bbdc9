//! Application service tying storage, scheduling and export together.
//!
//! [`App`] is what the CLI drives: it creates items, asks the configured
//! [`Scheduler`] for their reviews, persists everything through a [`Store`]
//! and hands stored reviews to the [`IcsExporter`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{CoreError, Result};
use crate::export::{ExportSummary, IcsExporter};
use crate::models::{ReviewRecord, StudyItem};
use crate::scheduler::{scheduler_for, Scheduler};
use crate::storage::{Config, Store};

/// Whether two items may share a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateTitlePolicy {
    #[default]
    Reject,
    Allow,
}

/// High-level interface for managing study items and reviews.
pub struct App<S: Store> {
    store: S,
    scheduler: Box<dyn Scheduler>,
    exporter: IcsExporter,
    duplicate_titles: DuplicateTitlePolicy,
}

impl<S: Store> App<S> {
    pub fn new(
        store: S,
        scheduler: Box<dyn Scheduler>,
        exporter: IcsExporter,
        duplicate_titles: DuplicateTitlePolicy,
    ) -> Self {
        Self {
            store,
            scheduler,
            exporter,
            duplicate_titles,
        }
    }

    /// Build the scheduler, exporter and policies described by `config`.
    pub fn from_config(store: S, config: &Config) -> Self {
        Self::new(
            store,
            scheduler_for(&config.scheduler),
            IcsExporter::with_policy(config.export.empty_policy),
            config.items.duplicate_titles,
        )
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheduler(&self) -> &dyn Scheduler {
        self.scheduler.as_ref()
    }

    /// Create a study item and persist its initial reviews.
    ///
    /// # Errors
    /// [`CoreError::InvalidTitle`] for a blank title,
    /// [`CoreError::DuplicateTitle`] when the title exists and duplicates are
    /// rejected, or any storage error.
    pub fn add_item(&mut self, title: &str, notes: &str, now: DateTime<Utc>) -> Result<StudyItem> {
        if title.trim().is_empty() {
            return Err(CoreError::InvalidTitle);
        }
        if self.duplicate_titles == DuplicateTitlePolicy::Reject
            && self.store.load_items()?.iter().any(|it| it.title == title)
        {
            return Err(CoreError::DuplicateTitle(title.to_string()));
        }

        let item = StudyItem::new(title, notes, now);
        self.store.save_item(&item)?;
        let reviews = self.scheduler.generate_initial(&item, now);
        self.store.save_reviews(&reviews)?;
        log::info!("added item {} with {} reviews", item.id, reviews.len());
        Ok(item)
    }

    /// Pair every stored review with its item.
    ///
    /// With `due_only`, keep reviews scheduled on the UTC calendar day of
    /// `now`. Reviews whose item no longer exists are skipped.
    pub fn list_items(
        &self,
        due_only: bool,
        now: DateTime<Utc>,
    ) -> Result<Vec<(StudyItem, ReviewRecord)>> {
        let items = self.items_by_id()?;
        let today = now.date_naive();

        let mut listed = Vec::new();
        for review in self.store.load_reviews()? {
            let Some(item) = items.get(review.item_id()) else {
                log::warn!("review references unknown item {}", review.item_id());
                continue;
            };
            if due_only && review.scheduled_at().map(|at| at.date_naive()) != Some(today) {
                continue;
            }
            listed.push((item.clone(), review));
        }
        Ok(listed)
    }

    /// Apply a review outcome to an item's record and persist the result.
    ///
    /// # Errors
    /// [`CoreError::ItemNotFound`] if the item has no review, or the
    /// scheduler's error for an invalid label or a fixed-schedule record.
    pub fn review_item(
        &mut self,
        item_id: &str,
        result: &str,
        now: DateTime<Utc>,
    ) -> Result<ReviewRecord> {
        let record = self
            .store
            .load_review_for_item(item_id)?
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;
        let updated = self.scheduler.update(record, result, now)?;
        self.store.replace_review_for_item(&updated)?;
        Ok(updated)
    }

    /// Export every stored review to an ICS file at `path`.
    pub fn export_ics(&self, path: &Path, now: DateTime<Utc>) -> Result<ExportSummary> {
        let reviews = self.store.load_reviews()?;
        let items = self.items_by_id()?;
        Ok(self.exporter.export(&reviews, &items, path, now)?)
    }

    /// Remove an item and its reviews by title. Returns whether it existed.
    pub fn remove_item(&mut self, title: &str) -> Result<bool> {
        Ok(self.store.remove_item_by_title(title)?)
    }

    /// Remove all items and reviews.
    pub fn clear(&mut self) -> Result<()> {
        Ok(self.store.clear()?)
    }

    fn items_by_id(&self) -> Result<HashMap<String, StudyItem>> {
        Ok(self
            .store
            .load_items()?
            .into_iter()
            .map(|it| (it.id.clone(), it))
            .collect())
    }
}
