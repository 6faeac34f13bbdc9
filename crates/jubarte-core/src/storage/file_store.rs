//! JSON file store.
//!
//! A single pretty-printed document holds both collections:
//! ```json
//! { "items": [ ... ], "reviews": [ ... ] }
//! ```
//! Every write replaces the whole file atomically.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::Store;
use crate::atomic::write_atomically;
use crate::error::StoreError;
use crate::models::{AdaptiveReview, FixedReview, ReviewRecord, StudyItem};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    items: Vec<StudyItem>,
    #[serde(default)]
    reviews: Vec<serde_json::Value>,
}

/// File-backed store. Reviews are appended, so fixed-horizon plans keep all
/// of their records.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open the store at `path`, creating an empty document if needed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self { path: path.into() };
        if !store.path.exists() {
            log::info!("creating data file {}", store.path.display());
            store.write(&StoreDocument::default())?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<StoreDocument, StoreError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, doc: &StoreDocument) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(doc).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_atomically(&self.path, content.as_bytes()).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn encode(&self, review: &ReviewRecord) -> Result<serde_json::Value, StoreError> {
        serde_json::to_value(review).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Decode a stored review. Documents written before reviews carried a
    /// `kind` tag are recognized by the presence of `interval_days`.
    fn decode(&self, value: serde_json::Value) -> Result<ReviewRecord, StoreError> {
        let json_err = |source| StoreError::Json {
            path: self.path.clone(),
            source,
        };
        if value.get("kind").is_some() {
            return serde_json::from_value(value).map_err(json_err);
        }
        if value.get("interval_days").is_some() {
            serde_json::from_value::<AdaptiveReview>(value)
                .map(ReviewRecord::Adaptive)
                .map_err(json_err)
        } else {
            serde_json::from_value::<FixedReview>(value)
                .map(ReviewRecord::Fixed)
                .map_err(json_err)
        }
    }

    fn item_id_of(value: &serde_json::Value) -> Option<&str> {
        value.get("item_id").and_then(|v| v.as_str())
    }
}

impl Store for FileStore {
    fn load_items(&self) -> Result<Vec<StudyItem>, StoreError> {
        Ok(self.read()?.items)
    }

    fn save_item(&mut self, item: &StudyItem) -> Result<(), StoreError> {
        let mut doc = self.read()?;
        doc.items.retain(|it| it.id != item.id);
        doc.items.push(item.clone());
        self.write(&doc)
    }

    fn save_review(&mut self, review: &ReviewRecord) -> Result<(), StoreError> {
        self.save_reviews(std::slice::from_ref(review))
    }

    fn save_reviews(&mut self, reviews: &[ReviewRecord]) -> Result<(), StoreError> {
        let mut doc = self.read()?;
        for review in reviews {
            doc.reviews.push(self.encode(review)?);
        }
        self.write(&doc)
    }

    fn load_reviews(&self) -> Result<Vec<ReviewRecord>, StoreError> {
        self.read()?
            .reviews
            .into_iter()
            .map(|value| self.decode(value))
            .collect()
    }

    fn replace_review_for_item(&mut self, review: &ReviewRecord) -> Result<(), StoreError> {
        let mut doc = self.read()?;
        doc.reviews
            .retain(|value| Self::item_id_of(value) != Some(review.item_id()));
        doc.reviews.push(self.encode(review)?);
        self.write(&doc)
    }

    fn remove_item_by_title(&mut self, title: &str) -> Result<bool, StoreError> {
        let mut doc = self.read()?;
        let Some(item_id) = doc
            .items
            .iter()
            .find(|it| it.title == title)
            .map(|it| it.id.clone())
        else {
            return Ok(false);
        };
        doc.items.retain(|it| it.id != item_id);
        doc.reviews
            .retain(|value| Self::item_id_of(value) != Some(item_id.as_str()));
        self.write(&doc)?;
        log::info!("removed item {item_id} ({title})");
        Ok(true)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.write(&StoreDocument::default())
    }
}
