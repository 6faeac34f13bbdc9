//! iCalendar export of scheduled reviews.
//!
//! [`IcsExporter`] turns review records plus their study items into a
//! VCALENDAR document and writes it atomically: the document is rendered in
//! memory, written to a temporary file next to the destination, and renamed
//! into place only once fully written.

pub mod ics;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::atomic::write_atomically;
use crate::error::ExportError;
use crate::models::{ReviewRecord, StudyItem};
use ics::{text_property, timestamp_property, CRLF};

/// Product identifier emitted in every document.
pub const PRODUCT_ID: &str = "-//jubarte//EN";

const SUMMARY_LABEL: &str = "Review";
const UID_DOMAIN: &str = "jubarte";

/// What to do when there are no reviews to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyExportPolicy {
    /// Write a calendar with no events
    #[default]
    Emit,
    /// Leave the destination untouched
    Skip,
}

/// Outcome of an export call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub events: usize,
    pub written: bool,
}

/// Calendar exporter for review events.
#[derive(Debug, Clone, Default)]
pub struct IcsExporter {
    empty_policy: EmptyExportPolicy,
}

impl IcsExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(empty_policy: EmptyExportPolicy) -> Self {
        Self { empty_policy }
    }

    pub fn empty_policy(&self) -> EmptyExportPolicy {
        self.empty_policy
    }

    /// Render the complete calendar document.
    ///
    /// `now` becomes every event's DTSTAMP.
    ///
    /// # Errors
    /// [`ExportError::MissingDate`] if any record lacks a scheduled date;
    /// nothing is rendered in that case.
    pub fn render(
        &self,
        records: &[ReviewRecord],
        items: &HashMap<String, StudyItem>,
        now: DateTime<Utc>,
    ) -> Result<String, ExportError> {
        let mut dated = records
            .iter()
            .map(|record| {
                record
                    .scheduled_at()
                    .map(|at| (at, record))
                    .ok_or_else(|| ExportError::MissingDate {
                        item_id: record.item_id().to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        dated.sort_by_key(|(at, _)| *at);

        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{PRODUCT_ID}"),
        ];

        for (start, record) in dated {
            let item_id = record.item_id();
            let item = items.get(item_id);
            if item.is_none() {
                log::warn!("exporting review for unknown item {item_id}");
            }
            let title = item.map_or(item_id, |it| it.title.as_str());
            let description = item.map_or("", |it| it.notes.as_str());
            let uid = format!("{item_id}-{}@{UID_DOMAIN}", uuid::Uuid::new_v4());

            lines.push("BEGIN:VEVENT".to_string());
            lines.push(text_property("UID", &uid));
            lines.push(timestamp_property("DTSTAMP", now));
            lines.push(timestamp_property("DTSTART", start));
            lines.push(text_property("SUMMARY", &format!("{SUMMARY_LABEL}: {title}")));
            lines.push(text_property("DESCRIPTION", description));
            lines.push("END:VEVENT".to_string());
        }

        lines.push("END:VCALENDAR".to_string());

        let mut content = lines.join(CRLF);
        content.push_str(CRLF);
        Ok(content)
    }

    /// Render and atomically write the calendar to `path`.
    ///
    /// With [`EmptyExportPolicy::Skip`] and no records, nothing is written.
    ///
    /// # Errors
    /// Returns an error if rendering fails or the file cannot be written.
    /// The destination is never left partially written.
    pub fn export(
        &self,
        records: &[ReviewRecord],
        items: &HashMap<String, StudyItem>,
        path: &Path,
        now: DateTime<Utc>,
    ) -> Result<ExportSummary, ExportError> {
        if records.is_empty() && self.empty_policy == EmptyExportPolicy::Skip {
            log::warn!("no reviews to export, leaving {} untouched", path.display());
            return Ok(ExportSummary {
                path: path.to_path_buf(),
                events: 0,
                written: false,
            });
        }

        let content = self.render(records, items, now)?;
        write_atomically(path, content.as_bytes()).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("exported {} review events to {}", records.len(), path.display());
        Ok(ExportSummary {
            path: path.to_path_buf(),
            events: records.len(),
            written: true,
        })
    }
}
