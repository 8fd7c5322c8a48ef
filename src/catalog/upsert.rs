//! Insert-or-replace of a report entry, keyed by id.

use chrono::{DateTime, Utc};
use std::path::Path;

use super::{report_id, Catalog, ReportEntry, TIMESTAMP_FORMAT};
use crate::core::{write_atomic, CatalogError, CatalogResult};

/// What an upsert did to the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Number of entries that shared the id and were removed
    pub replaced: usize,
    /// Entries in the catalog after the upsert
    pub total: usize,
    pub last_updated: String,
}

impl UpsertOutcome {
    pub fn was_update(&self) -> bool {
        self.replaced > 0
    }
}

impl Catalog {
    /// Drops every entry with the entry's id, then puts the entry first.
    /// Relative order of the remaining entries is untouched.
    pub fn upsert(&mut self, entry: &ReportEntry, now: DateTime<Utc>) -> CatalogResult<UpsertOutcome> {
        let before = self.reports.len();
        self.reports
            .retain(|report| report_id(report) != Some(entry.id.as_str()));
        let replaced = before - self.reports.len();

        self.reports.insert(0, serde_json::to_value(entry)?);

        let last_updated = now.format(TIMESTAMP_FORMAT).to_string();
        self.last_updated = Some(last_updated.clone());

        Ok(UpsertOutcome {
            replaced,
            total: self.reports.len(),
            last_updated,
        })
    }
}

/// Load, upsert and atomically rewrite the catalog at `path`
pub fn upsert_report(path: &Path, entry: &ReportEntry, now: DateTime<Utc>) -> CatalogResult<UpsertOutcome> {
    let mut catalog = Catalog::load(path)?;
    let outcome = catalog.upsert(entry, now)?;

    let json = catalog.to_pretty_json()?;
    write_atomic(path, json.as_bytes()).map_err(|e| CatalogError::io(path, e))?;

    tracing::debug!(
        "{} report {} ({} entries)",
        if outcome.was_update() { "Updated" } else { "Added" },
        entry.id,
        outcome.total
    );
    Ok(outcome)
}
