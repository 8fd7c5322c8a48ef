/*!
# Report Registration

The `add-report` pipeline: resolve the file, extract its metadata, upsert
the catalog entry, then rebuild the index. Steps run strictly in order and
the first fatal error ends the run.
*/

use chrono::{DateTime, Local, NaiveDate, Utc};
use std::path::{Path, PathBuf};

use crate::catalog::{upsert_report, Catalog, ReportEntry, UpsertOutcome};
use crate::config::SiteConfig;
use crate::core::{read_html_file, CatalogError, CatalogResult};
use crate::index;
use crate::invocation::Invocation;
use crate::metadata::{self, ReportMetadata};
use crate::resolver::{resolve_report, ResolvedReport};

/// How the entry was applied
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// Catalog rewritten and index rebuilt
    Written(UpsertOutcome),
    /// Degraded mode: entry printed for manual insertion
    Printed(String),
}

/// Milestones of a running registration, in the order they happen
#[derive(Debug)]
pub enum Progress<'r> {
    Resolving,
    /// The report was copied to this location
    Copied(&'r Path),
    Extracting,
    Extracted {
        entry: &'r ReportEntry,
        date_inferred: bool,
    },
    UpdatingCatalog,
    CatalogUpdated {
        id: &'r str,
        outcome: &'r UpsertOutcome,
    },
    RebuildingIndex,
}

/// Everything a finished registration produced
#[derive(Debug, Clone)]
pub struct Registration {
    pub report: ResolvedReport,
    pub entry: ReportEntry,
    pub date_inferred: bool,
    pub applied: Applied,
}

pub struct Registrar<'a> {
    config: &'a SiteConfig,
    cwd: PathBuf,
}

impl<'a> Registrar<'a> {
    pub fn new(config: &'a SiteConfig, cwd: &Path) -> Self {
        Self {
            config,
            cwd: cwd.to_path_buf(),
        }
    }

    /// Degraded mode requested by flag or configuration
    pub fn print_only(&self, invocation: &Invocation) -> bool {
        invocation.print_entry || self.config.print_only
    }

    pub fn resolve(&self, invocation: &Invocation) -> CatalogResult<ResolvedReport> {
        resolve_report(
            &invocation.report_path,
            &self.cwd,
            &self.config.reports_dir,
            invocation.copy,
        )
    }

    /// Reads the in-place report and derives its entry
    pub fn extract(&self, report: &ResolvedReport, today: NaiveDate) -> CatalogResult<ReportMetadata> {
        let content =
            read_html_file(&report.location).map_err(|e| CatalogError::io(&report.location, e))?;
        Ok(metadata::extract(&report.filename, &content, today))
    }

    pub fn persist(&self, entry: &ReportEntry, now: DateTime<Utc>) -> CatalogResult<UpsertOutcome> {
        upsert_report(&self.config.catalog_path, entry, now)
    }

    pub fn rebuild_index(&self) -> CatalogResult<()> {
        index::trigger(self.config)
    }

    /// Fails unless the catalog loads; run before anything touches the disk
    pub fn check_catalog(&self) -> CatalogResult<()> {
        Catalog::load(&self.config.catalog_path).map(|_| ())
    }

    /// Runs the whole pipeline with the current clock
    pub fn run(&self, invocation: &Invocation) -> CatalogResult<Registration> {
        self.run_at(invocation, Utc::now())
    }

    pub fn run_at(&self, invocation: &Invocation, now: DateTime<Utc>) -> CatalogResult<Registration> {
        self.run_with(invocation, now, &mut |_| {})
    }

    /// Runs the whole pipeline, reporting each milestone to `on_progress`.
    ///
    /// The fallback date is `now` in local time. Outside degraded mode the
    /// catalog is checked first so a misconfigured site leaves no copy behind.
    pub fn run_with(
        &self,
        invocation: &Invocation,
        now: DateTime<Utc>,
        on_progress: &mut dyn FnMut(Progress<'_>),
    ) -> CatalogResult<Registration> {
        let print_only = self.print_only(invocation);
        if !print_only {
            self.check_catalog()?;
        }

        on_progress(Progress::Resolving);
        let report = self.resolve(invocation)?;
        if report.copied {
            on_progress(Progress::Copied(&report.location));
        }

        on_progress(Progress::Extracting);
        let today = now.with_timezone(&Local).date_naive();
        let metadata = self.extract(&report, today)?;
        let date_inferred = metadata.date_inferred;
        let entry = metadata.into_entry(invocation.featured);
        on_progress(Progress::Extracted {
            entry: &entry,
            date_inferred,
        });

        let applied = if print_only {
            Applied::Printed(manual_entry(&entry)?)
        } else {
            on_progress(Progress::UpdatingCatalog);
            let outcome = self.persist(&entry, now)?;
            on_progress(Progress::CatalogUpdated {
                id: &entry.id,
                outcome: &outcome,
            });

            on_progress(Progress::RebuildingIndex);
            self.rebuild_index()?;
            Applied::Written(outcome)
        };

        Ok(Registration {
            report,
            entry,
            date_inferred,
            applied,
        })
    }
}

/// Pretty JSON of the entry, ready to paste at the top of `reports`
pub fn manual_entry(entry: &ReportEntry) -> CatalogResult<String> {
    Ok(serde_json::to_string_pretty(entry)?)
}
