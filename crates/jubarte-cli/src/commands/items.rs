//! Study item commands for CLI.

use chrono::Utc;
use serde::Serialize;
use std::path::PathBuf;

use super::open_app;
use jubarte_core::{ReviewRecord, StudyItem};

#[derive(Serialize)]
struct ListedReview<'a> {
    item: &'a StudyItem,
    review: &'a ReviewRecord,
}

pub fn add(
    data_file: Option<PathBuf>,
    title: &str,
    notes: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = open_app(data_file)?;
    let item = app.add_item(title, notes, Utc::now())?;
    println!("Added: {} - {}", item.id, item.title);
    Ok(())
}

pub fn list(
    data_file: Option<PathBuf>,
    due_today: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app(data_file)?;
    let listed = app.list_items(due_today, Utc::now())?;

    if json {
        let rows: Vec<_> = listed
            .iter()
            .map(|(item, review)| ListedReview { item, review })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for (item, review) in &listed {
        let next = review
            .scheduled_at()
            .map(|at| at.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        println!("{} | {} | next: {}", item.id, item.title, next);
    }
    Ok(())
}

pub fn remove(data_file: Option<PathBuf>, title: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = open_app(data_file)?;
    if app.remove_item(title)? {
        println!("Removed: {title}");
    } else {
        println!("No item titled '{title}'");
    }
    Ok(())
}

pub fn clear(data_file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = open_app(data_file)?;
    app.clear()?;
    println!("All items and reviews removed");
    Ok(())
}
