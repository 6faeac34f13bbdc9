mod config;
mod file_store;
mod memory_store;

pub use config::{Config, ExportConfig, ItemsConfig, StorageConfig};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use std::path::PathBuf;

use crate::error::{ConfigError, StoreError};
use crate::models::{ReviewRecord, StudyItem};

/// Persistence collaborator for study items and their reviews.
pub trait Store {
    fn load_items(&self) -> Result<Vec<StudyItem>, StoreError>;

    /// Insert or replace an item by id.
    fn save_item(&mut self, item: &StudyItem) -> Result<(), StoreError>;

    fn save_review(&mut self, review: &ReviewRecord) -> Result<(), StoreError>;

    fn save_reviews(&mut self, reviews: &[ReviewRecord]) -> Result<(), StoreError> {
        for review in reviews {
            self.save_review(review)?;
        }
        Ok(())
    }

    fn load_reviews(&self) -> Result<Vec<ReviewRecord>, StoreError>;

    /// First review stored for an item.
    fn load_review_for_item(&self, item_id: &str) -> Result<Option<ReviewRecord>, StoreError> {
        Ok(self
            .load_reviews()?
            .into_iter()
            .find(|review| review.item_id() == item_id))
    }

    /// Replace every stored review of `review.item_id()` with `review`.
    fn replace_review_for_item(&mut self, review: &ReviewRecord) -> Result<(), StoreError>;

    /// Remove the item with `title` and all of its reviews.
    /// Returns whether an item was removed.
    fn remove_item_by_title(&mut self, title: &str) -> Result<bool, StoreError>;

    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Returns `~/.config/jubarte[-dev]/` based on JUBARTE_ENV.
///
/// Set JUBARTE_ENV=dev to use the development data directory, or
/// JUBARTE_CONFIG_DIR to use an explicit directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("JUBARTE_CONFIG_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir().ok_or(ConfigError::NoConfigDir)?.join(".config");
            let env = std::env::var("JUBARTE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("jubarte-dev")
            } else {
                base_dir.join("jubarte")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
