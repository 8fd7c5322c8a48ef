/*!
# Index Generator

Reads the catalog, checks that every referenced HTML file is present, groups
the reports for display and writes `index.html`.

## Использование

```rust,no_run
use report_catalog::config::SiteConfig;
use report_catalog::index::IndexGenerator;

let config = SiteConfig::load(None, std::path::Path::new("."))?;
let summary = IndexGenerator::new(config).generate()?;
println!("Wrote {} bytes", summary.bytes);
# Ok::<(), report_catalog::core::CatalogError>(())
```
*/

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::path::{Component, PathBuf};

use super::html::{IndexPage, ReportSection};
use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::core::{write_atomic, CatalogError, CatalogResult};

/// How many cards the featured strip shows
pub const FEATURED_SLOTS: usize = 3;
pub const LATEST_LABEL: &str = "NEW - Latest Research";
pub const KEY_DOCUMENT_LABEL: &str = "Key Document";

const DEFAULT_CATEGORY_ORDER: i64 = 99;

/// A catalog entry as the index reads it: every field optional, category
/// kept as free text so hand-edited entries still render
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListedReport {
    pub id: String,
    pub filename: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub category: String,
    pub badges: Vec<String>,
    pub badge_colors: Vec<String>,
    pub featured: bool,
    pub featured_label: Option<String>,
    pub version: String,
}

/// Result of one generation run
#[derive(Debug, Clone, Serialize)]
pub struct IndexSummary {
    pub output: PathBuf,
    pub bytes: usize,
    pub reports: usize,
    pub categories: usize,
    pub system_version: Option<String>,
}

pub struct IndexGenerator {
    config: SiteConfig,
}

impl IndexGenerator {
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Loads the catalog and decodes its entries
    pub fn load(&self) -> CatalogResult<(Catalog, Vec<ListedReport>)> {
        let catalog = Catalog::load(&self.config.catalog_path)?;
        let reports = listed_reports(&catalog).map_err(|e| {
            CatalogError::config(&self.config.catalog_path, e)
        })?;
        Ok((catalog, reports))
    }

    /// Filenames referenced by the catalog but absent from the reports directory
    pub fn missing_files(&self, reports: &[ListedReport]) -> Vec<String> {
        reports
            .iter()
            .filter(|r| !self.config.reports_dir.join(&r.filename).is_file())
            .map(|r| r.filename.clone())
            .collect()
    }

    /// Renders the index page without touching the filesystem
    pub fn render(&self, catalog: &Catalog, reports: &[ListedReport]) -> String {
        let empty = Map::new();
        let categories = catalog.categories().unwrap_or(&empty);

        let page = IndexPage {
            total_reports: reports.len(),
            system_version: catalog.system_version().map(str::to_string),
            last_updated: catalog.last_updated.clone(),
            stats: catalog
                .extra
                .get("stats")
                .and_then(Value::as_object)
                .map(|stats| {
                    stats
                        .iter()
                        .map(|(k, v)| (k.clone(), value_text(v)))
                        .collect()
                })
                .unwrap_or_default(),
            featured: featured_reports(reports),
            by_category: organize_by_category(reports, categories),
            by_date: organize_by_date(reports),
            reports_href: self.reports_href(),
        };
        page.render()
    }

    /// Full run: load, verify files, render, write
    pub fn generate(&self) -> CatalogResult<IndexSummary> {
        let (catalog, reports) = self.load()?;

        let missing = self.missing_files(&reports);
        if !missing.is_empty() {
            return Err(CatalogError::config(
                &self.config.reports_dir,
                format!("missing HTML files: {}", missing.join(", ")),
            ));
        }

        self.write(&catalog, &reports)
    }

    /// Renders and writes the page for an already verified catalog
    pub fn write(&self, catalog: &Catalog, reports: &[ListedReport]) -> CatalogResult<IndexSummary> {
        let html = self.render(catalog, reports);
        let output = &self.config.index_output;
        write_atomic(output, html.as_bytes()).map_err(|e| CatalogError::io(output, e))?;
        tracing::debug!("Wrote {} ({} bytes)", output.display(), html.len());

        Ok(IndexSummary {
            output: output.clone(),
            bytes: html.len(),
            reports: reports.len(),
            categories: catalog.categories().map(Map::len).unwrap_or(0),
            system_version: catalog.system_version().map(str::to_string),
        })
    }

    /// Link prefix from the index page to the reports directory
    pub fn reports_href(&self) -> String {
        let index_dir = self
            .config
            .index_output
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default();
        let relative = pathdiff::diff_paths(&self.config.reports_dir, &index_dir)
            .unwrap_or_else(|| self.config.reports_dir.clone());
        relative
            .components()
            .filter_map(|c| match c {
                Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
                Component::ParentDir => Some("..".to_string()),
                Component::Normal(part) => {
                    Some(urlencoding::encode(&part.to_string_lossy()).into_owned())
                }
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Decodes the raw catalog entries
pub fn listed_reports(catalog: &Catalog) -> Result<Vec<ListedReport>, String> {
    catalog
        .reports
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            serde_json::from_value(raw.clone())
                .map_err(|e| format!("report #{} is malformed: {}", i + 1, e))
        })
        .collect()
}

/// Marked reports first, topped up with the most recent unmarked ones.
/// The first card is labelled as the latest unless it carries a label.
pub fn featured_reports(reports: &[ListedReport]) -> Vec<ListedReport> {
    let mut featured: Vec<ListedReport> = reports.iter().filter(|r| r.featured).cloned().collect();

    if featured.len() < FEATURED_SLOTS {
        let mut remaining: Vec<&ListedReport> = reports.iter().filter(|r| !r.featured).collect();
        remaining.sort_by(|a, b| b.date.cmp(&a.date));
        let needed = FEATURED_SLOTS - featured.len();
        featured.extend(remaining.into_iter().take(needed).cloned());
    }

    featured.truncate(FEATURED_SLOTS);
    for (i, report) in featured.iter_mut().enumerate() {
        if report.featured_label.is_none() {
            let label = if i == 0 { LATEST_LABEL } else { KEY_DOCUMENT_LABEL };
            report.featured_label = Some(label.to_string());
        }
        report.featured = true;
    }
    featured
}

/// Sections in `categories[*].order`; categories missing from the table
/// come last, by id
pub fn organize_by_category(
    reports: &[ListedReport],
    categories: &Map<String, Value>,
) -> Vec<ReportSection> {
    let mut grouped: HashMap<&str, Vec<ListedReport>> = HashMap::new();
    let mut seen_order: Vec<&str> = Vec::new();
    for report in reports {
        let key = if report.category.is_empty() {
            "other"
        } else {
            report.category.as_str()
        };
        if !grouped.contains_key(key) {
            seen_order.push(key);
        }
        grouped.entry(key).or_default().push(report.clone());
    }

    let mut known: Vec<(i64, &String, &Value)> = categories
        .iter()
        .map(|(id, info)| {
            let order = info
                .get("order")
                .and_then(Value::as_i64)
                .unwrap_or(DEFAULT_CATEGORY_ORDER);
            (order, id, info)
        })
        .collect();
    known.sort_by_key(|(order, _, _)| *order);

    let mut sections = Vec::new();
    for (_, id, info) in known {
        if let Some(reports) = grouped.remove(id.as_str()) {
            let name = info
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or(id)
                .to_string();
            sections.push(ReportSection {
                id: id.clone(),
                name,
                reports,
            });
        }
    }

    let mut unknown: Vec<&str> = seen_order
        .into_iter()
        .filter(|id| grouped.contains_key(id))
        .collect();
    unknown.sort();
    for id in unknown {
        if let Some(reports) = grouped.remove(id) {
            sections.push(ReportSection {
                id: id.to_string(),
                name: id.to_string(),
                reports,
            });
        }
    }

    sections
}

/// One section per date, newest first
pub fn organize_by_date(reports: &[ListedReport]) -> Vec<ReportSection> {
    let mut by_date: BTreeMap<String, Vec<ListedReport>> = BTreeMap::new();
    for report in reports {
        let date = if report.date.is_empty() {
            "Unknown".to_string()
        } else {
            report.date.clone()
        };
        by_date.entry(date).or_default().push(report.clone());
    }

    by_date
        .into_iter()
        .rev()
        .map(|(date, reports)| ReportSection {
            name: super::html::format_date_label(&date),
            id: date,
            reports,
        })
        .collect()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn report(id: &str, date: &str, category: &str, featured: bool) -> ListedReport {
        ListedReport {
            id: id.to_string(),
            filename: format!("{}.html", id),
            title: id.to_uppercase(),
            date: date.to_string(),
            category: category.to_string(),
            featured,
            ..Default::default()
        }
    }

    fn ids(reports: &[ListedReport]) -> Vec<&str> {
        reports.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_featured_top_up_by_recency() {
        let reports = vec![
            report("a", "2026-01-01", "slm", false),
            report("b", "2026-01-10", "slm", true),
            report("c", "2026-01-05", "vc", false),
            report("d", "2026-01-07", "vc", false),
        ];
        let featured = featured_reports(&reports);

        assert_eq!(ids(&featured), vec!["b", "d", "c"]);
        assert_eq!(featured[0].featured_label.as_deref(), Some(LATEST_LABEL));
        assert_eq!(featured[1].featured_label.as_deref(), Some(KEY_DOCUMENT_LABEL));
        assert!(featured.iter().all(|r| r.featured));
    }

    #[test]
    fn test_featured_keeps_existing_label_and_caps_at_three() {
        let mut reports: Vec<_> = (0..5)
            .map(|i| report(&format!("r{}", i), "2026-01-01", "slm", true))
            .collect();
        reports[0].featured_label = Some("Flagship".into());

        let featured = featured_reports(&reports);
        assert_eq!(featured.len(), 3);
        assert_eq!(featured[0].featured_label.as_deref(), Some("Flagship"));
    }

    #[test]
    fn test_category_sections_follow_order() {
        let reports = vec![
            report("a", "2026-01-01", "vc", false),
            report("b", "2026-01-02", "solana", false),
            report("c", "2026-01-03", "defi", false),
            report("d", "2026-01-04", "solana", false),
        ];
        let categories = json!({
            "featured": { "name": "Featured Reports", "order": 0 },
            "solana": { "name": "Solana Ecosystem", "order": 1 },
            "vc": { "name": "Series A & VC Intelligence", "order": 5 }
        });

        let sections = organize_by_category(&reports, categories.as_object().unwrap());
        let names: Vec<_> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Solana Ecosystem", "Series A & VC Intelligence", "defi"]);
        assert_eq!(ids(&sections[0].reports), vec!["b", "d"]);
    }

    #[test]
    fn test_date_sections_newest_first() {
        let reports = vec![
            report("a", "2026-01-01", "slm", false),
            report("b", "2026-01-19", "slm", false),
            report("c", "2026-01-01", "slm", false),
        ];
        let sections = organize_by_date(&reports);

        let dates: Vec<_> = sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(dates, vec!["2026-01-19", "2026-01-01"]);
        assert_eq!(sections[0].name, "January 19, 2026");
        assert_eq!(ids(&sections[1].reports), vec!["a", "c"]);
    }

    #[test]
    fn test_reports_href_relative_to_index() {
        let root = std::path::Path::new("/srv/site");
        let mut config = SiteConfig::for_root(root);
        assert_eq!(IndexGenerator::new(config.clone()).reports_href(), "reports");

        config.index_output = root.join("public/index.html");
        config.reports_dir = root.join("research papers");
        assert_eq!(
            IndexGenerator::new(config.clone()).reports_href(),
            "../research%20papers"
        );

        config.reports_dir = root.join("public");
        assert_eq!(IndexGenerator::new(config).reports_href(), "");
    }

    #[test]
    fn test_malformed_entry_is_reported() {
        let catalog: Catalog =
            serde_json::from_value(json!({ "reports": [ { "id": "a", "badges": "oops" } ] })).unwrap();
        let err = listed_reports(&catalog).unwrap_err();
        assert!(err.contains("report #1"));
    }
}
