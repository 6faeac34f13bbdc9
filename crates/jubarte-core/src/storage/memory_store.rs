//! In-memory store for tests and embedding.

use super::Store;
use crate::error::StoreError;
use crate::models::{ReviewRecord, StudyItem};

/// Runtime store backed by vectors, preserving insertion order.
///
/// Reviews are appended like in the file store; only
/// [`Store::replace_review_for_item`] collapses an item's reviews into one.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Vec<StudyItem>,
    reviews: Vec<ReviewRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load_items(&self) -> Result<Vec<StudyItem>, StoreError> {
        Ok(self.items.clone())
    }

    fn save_item(&mut self, item: &StudyItem) -> Result<(), StoreError> {
        match self.items.iter_mut().find(|it| it.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => self.items.push(item.clone()),
        }
        Ok(())
    }

    fn save_review(&mut self, review: &ReviewRecord) -> Result<(), StoreError> {
        self.reviews.push(review.clone());
        Ok(())
    }

    fn load_reviews(&self) -> Result<Vec<ReviewRecord>, StoreError> {
        Ok(self.reviews.clone())
    }

    fn replace_review_for_item(&mut self, review: &ReviewRecord) -> Result<(), StoreError> {
        self.reviews.retain(|r| r.item_id() != review.item_id());
        self.reviews.push(review.clone());
        Ok(())
    }

    fn remove_item_by_title(&mut self, title: &str) -> Result<bool, StoreError> {
        let Some(pos) = self.items.iter().position(|it| it.title == title) else {
            return Ok(false);
        };
        let item = self.items.remove(pos);
        self.reviews.retain(|r| r.item_id() != item.id);
        Ok(true)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.items.clear();
        self.reviews.clear();
        Ok(())
    }
}
