/*!
# Error System for the Report Catalog

Typed failures for the registration pipeline and the issue collector used
by the catalog validator.
*/

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of the registration pipeline
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no report file given")]
    Usage,

    #[error("report file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("catalog config error ({}): {}", .path.display(), .message)]
    Config { path: PathBuf, message: String },

    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("index generator failed: {message}")]
    Index { message: String, status: Option<i32> },
}

impl CatalogError {
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CatalogError::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this failure.
    ///
    /// A failing index command hands its own status through; everything
    /// else maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CatalogError::Index {
                status: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Issue severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    Error,
    Warning,
}

impl fmt::Display for IssueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueLevel::Error => write!(f, "ERROR"),
            IssueLevel::Warning => write!(f, "WARNING"),
        }
    }
}

/// A single finding of the catalog validator
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub message: String,
    pub level: IssueLevel,
    pub report_id: Option<String>,
}

impl ValidationIssue {
    pub fn new(message: String, level: IssueLevel) -> Self {
        Self {
            message,
            level,
            report_id: None,
        }
    }

    pub fn with_report(mut self, id: &str) -> Self {
        self.report_id = Some(id.to_string());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)
    }
}

/// Issue collection and reporting
#[derive(Debug, Default, Serialize)]
pub struct IssueCollector {
    pub issues: Vec<ValidationIssue>,
}

impl IssueCollector {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.add(ValidationIssue::new(message.into(), IssueLevel::Error));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.add(ValidationIssue::new(message.into(), IssueLevel::Warning));
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.level == IssueLevel::Error)
    }

    pub fn error_count(&self) -> usize {
        self.get_errors().len()
    }

    pub fn warning_count(&self) -> usize {
        self.get_warnings().len()
    }

    pub fn get_errors(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.level == IssueLevel::Error)
            .collect()
    }

    pub fn get_warnings(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.level == IssueLevel::Warning)
            .collect()
    }
}

impl fmt::Display for IssueCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in &self.issues {
            writeln!(f, "{}", issue)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_passes_index_status_through() {
        let err = CatalogError::Index {
            message: "exit status 3".into(),
            status: Some(3),
        };
        assert_eq!(err.exit_code(), 3);
        assert_eq!(CatalogError::Usage.exit_code(), 1);

        let killed = CatalogError::Index {
            message: "terminated by signal".into(),
            status: None,
        };
        assert_eq!(killed.exit_code(), 1);
    }

    #[test]
    fn test_collector_counts() {
        let mut collector = IssueCollector::new();
        collector.error("Duplicate report ID: a");
        collector.warn("Orphan HTML file not in reports.json: reports/x.html");
        collector.warn("Report 'b' has unknown category: misc");

        assert!(collector.has_errors());
        assert_eq!(collector.error_count(), 1);
        assert_eq!(collector.warning_count(), 2);
        assert!(collector.to_string().starts_with("ERROR: Duplicate"));
    }
}
