/*!
# Catalog Validation

Pre-deploy checks over the catalog and the reports directory. Every check
runs and adds to one [`IssueCollector`]; nothing stops at the first problem.
*/

use serde_json::Value;
use std::collections::HashSet;
use walkdir::WalkDir;

use crate::catalog::{report_id, Catalog, Category};
use crate::config::SiteConfig;
use crate::core::{IssueCollector, IssueLevel, ValidationIssue};

const REQUIRED_FIELDS: [&str; 5] = ["id", "filename", "title", "date", "category"];

/// Runs all checks
pub fn validate_site(config: &SiteConfig) -> IssueCollector {
    let mut issues = IssueCollector::new();

    let catalog = match Catalog::load(&config.catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            issues.error(e.to_string());
            return issues;
        }
    };
    tracing::debug!("Validating {} reports", catalog.reports.len());

    validate_report_fields(&catalog.reports, &mut issues);
    validate_duplicates(&catalog.reports, &mut issues);
    validate_html_files(&catalog.reports, config, &mut issues);
    validate_orphan_files(&catalog.reports, config, &mut issues);

    issues
}

fn field_str<'a>(report: &'a Value, field: &str) -> Option<&'a str> {
    report.get(field).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Required fields, date shape and category membership
pub fn validate_report_fields(reports: &[Value], issues: &mut IssueCollector) {
    for report in reports {
        let id = report_id(report).unwrap_or("unknown");

        for field in REQUIRED_FIELDS {
            if field_str(report, field).is_none() {
                issues.add(
                    ValidationIssue::new(
                        format!("Report '{}' missing required field: {}", id, field),
                        IssueLevel::Error,
                    )
                    .with_report(id),
                );
            }
        }

        if let Some(date) = field_str(report, "date") {
            if !is_iso_date_shape(date) {
                issues.add(
                    ValidationIssue::new(
                        format!(
                            "Report '{}' has invalid date format: {} (expected YYYY-MM-DD)",
                            id, date
                        ),
                        IssueLevel::Error,
                    )
                    .with_report(id),
                );
            }
        }

        if let Some(category) = field_str(report, "category") {
            if category.parse::<Category>().is_err() {
                issues.add(
                    ValidationIssue::new(
                        format!("Report '{}' has unknown category: {}", id, category),
                        IssueLevel::Warning,
                    )
                    .with_report(id),
                );
            }
        }
    }
}

/// Same id or filename used twice
pub fn validate_duplicates(reports: &[Value], issues: &mut IssueCollector) {
    let mut ids = HashSet::new();
    let mut filenames = HashSet::new();

    for report in reports {
        if let Some(id) = field_str(report, "id") {
            if !ids.insert(id) {
                issues.add(
                    ValidationIssue::new(format!("Duplicate report ID: {}", id), IssueLevel::Error)
                        .with_report(id),
                );
            }
        }
        if let Some(filename) = field_str(report, "filename") {
            if !filenames.insert(filename) {
                issues.error(format!("Duplicate filename: {}", filename));
            }
        }
    }
}

/// Every referenced file exists in the reports directory
pub fn validate_html_files(reports: &[Value], config: &SiteConfig, issues: &mut IssueCollector) {
    for report in reports {
        if let Some(filename) = field_str(report, "filename") {
            if !config.reports_dir.join(filename).is_file() {
                issues.error(format!("Missing HTML file: {}", reports_label(config, filename)));
            }
        }
    }
}

/// HTML files in the reports directory the catalog does not list
pub fn validate_orphan_files(reports: &[Value], config: &SiteConfig, issues: &mut IssueCollector) {
    if !config.reports_dir.is_dir() {
        return;
    }

    let listed: HashSet<&str> = reports
        .iter()
        .filter_map(|r| field_str(r, "filename"))
        .collect();

    let mut orphans: Vec<String> = WalkDir::new(&config.reports_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.ends_with(".html") && !listed.contains(name.as_str()))
        .collect();
    orphans.sort();

    for name in orphans {
        issues.warn(format!(
            "Orphan HTML file not in catalog: {}",
            reports_label(config, &name)
        ));
    }
}

fn reports_label(config: &SiteConfig, filename: &str) -> String {
    let dir = config
        .reports_dir
        .strip_prefix(&config.root)
        .unwrap_or(&config.reports_dir);
    dir.join(filename).display().to_string()
}

/// `NNNN-NN-NN`, shape only
fn is_iso_date_shape(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_and_bad_date() {
        let reports = vec![
            json!({ "id": "a", "filename": "a.html", "title": "", "date": "19-01-2026", "category": "slm" }),
        ];
        let mut issues = IssueCollector::new();
        validate_report_fields(&reports, &mut issues);

        let messages: Vec<_> = issues.issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Report 'a' missing required field: title",
                "Report 'a' has invalid date format: 19-01-2026 (expected YYYY-MM-DD)",
            ]
        );
        assert_eq!(issues.issues[0].report_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_unknown_category_is_warning() {
        let reports = vec![
            json!({ "id": "a", "filename": "a.html", "title": "A", "date": "2026-01-19", "category": "defi" }),
        ];
        let mut issues = IssueCollector::new();
        validate_report_fields(&reports, &mut issues);

        assert!(!issues.has_errors());
        assert_eq!(issues.warning_count(), 1);
    }

    #[test]
    fn test_duplicates() {
        let reports = vec![
            json!({ "id": "a", "filename": "a.html" }),
            json!({ "id": "a", "filename": "b.html" }),
            json!({ "id": "c", "filename": "b.html" }),
        ];
        let mut issues = IssueCollector::new();
        validate_duplicates(&reports, &mut issues);

        assert_eq!(issues.error_count(), 2);
        assert!(issues.to_string().contains("Duplicate report ID: a"));
        assert!(issues.to_string().contains("Duplicate filename: b.html"));
    }

    #[test]
    fn test_date_shape() {
        assert!(is_iso_date_shape("2026-01-19"));
        assert!(!is_iso_date_shape("2026-1-19"));
        assert!(!is_iso_date_shape("2026/01/19"));
    }
}
