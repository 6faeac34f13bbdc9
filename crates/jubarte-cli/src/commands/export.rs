use chrono::Utc;
use std::path::{Path, PathBuf};

use super::open_app;

pub fn run(data_file: Option<PathBuf>, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app(data_file)?;
    let summary = app.export_ics(output, Utc::now())?;
    if summary.written {
        println!("Exported {} reviews: {}", summary.events, summary.path.display());
    } else {
        println!("No reviews to export.");
    }
    Ok(())
}
