pub mod config;
pub mod export;
pub mod items;
pub mod review;

use jubarte_core::{App, Config, FileStore};
use std::path::PathBuf;

/// Open the application over the configured JSON store.
///
/// `data_file` overrides the location from the config file.
pub fn open_app(data_file: Option<PathBuf>) -> Result<App<FileStore>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let path = match data_file {
        Some(path) => path,
        None => config.data_file()?,
    };
    log::debug!("using data file {}", path.display());
    let store = FileStore::open(path)?;
    Ok(App::from_config(store, &config))
}
