use chrono::Utc;
use jubarte_core::{AdaptiveScheduler, Outcome};
use std::path::PathBuf;

use super::open_app;

pub fn run(
    data_file: Option<PathBuf>,
    item_id: &str,
    result: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = open_app(data_file)?;
    let record = app.review_item(item_id, result, Utc::now())?;
    let next = record
        .scheduled_at()
        .map(|at| at.to_rfc3339())
        .unwrap_or_else(|| "-".to_string());
    println!("Reviewed: {item_id} -> next: {next}");
    if let Some(review) = record.as_adaptive() {
        println!(
            "interval: {}d, ease: {:.2}, repetitions: {}",
            review.interval_days, review.ease, review.repetitions
        );
        println!("{}", format_preview(&AdaptiveScheduler::default().preview(review)));
    }
    Ok(())
}

/// One-line summary of the interval each answer would give next time.
fn format_preview(preview: &[(Outcome, u32)]) -> String {
    let parts: Vec<String> = preview
        .iter()
        .map(|(outcome, days)| format!("{outcome} {days}d"))
        .collect();
    format!("next answer: {}", parts.join(", "))
}
