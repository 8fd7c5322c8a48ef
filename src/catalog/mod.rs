/*!
# Report Catalog

The JSON document listing every published report. Only the keys this tool
owns are typed; everything else (`system_version`, `categories`, `stats`,
per-entry extras such as `featured_label`) is carried through untouched and
in its original order.

```json
{
  "system_version": "3.3.0",
  "last_updated": "2026-01-19T10:00:00Z",
  "reports": [ { "id": "SLM-edge-2026-01-19", "filename": "...", ... } ],
  "categories": { "slm": { "name": "SLM & Edge AI Research", "order": 2 } }
}
```
*/

pub mod upsert;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::core::{CatalogError, CatalogResult};

pub use upsert::{upsert_report, UpsertOutcome};

/// Version stamped on entries registered by this tool
pub const ENTRY_VERSION: &str = "2.0";

/// Timestamp layout of `last_updated`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Report categories shown as index sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    Slm,
    Solana,
    Kya,
    Vc,
    Vertical,
    CrossChain,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Slm,
        Category::Solana,
        Category::Kya,
        Category::Vc,
        Category::Vertical,
        Category::CrossChain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Slm => "slm",
            Category::Solana => "solana",
            Category::Kya => "kya",
            Category::Vc => "vc",
            Category::Vertical => "vertical",
            Category::CrossChain => "cross-chain",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// One report card in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub id: String,
    pub filename: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub badge_colors: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_version")]
    pub version: String,
    /// Keys added by hand or by older tooling
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_version() -> String {
    ENTRY_VERSION.to_string()
}

/// The whole catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Newest registrations first; kept as raw JSON so hand-edited entries
    /// with unexpected shapes survive a rewrite
    #[serde(default)]
    pub reports: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Catalog {
    /// Reads and parses the catalog. A missing or malformed file is a
    /// configuration error: the catalog has to be created up front.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        if !path.is_file() {
            return Err(CatalogError::config(path, "catalog file not found"));
        }
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let catalog: Catalog = serde_json::from_str(&content)
            .map_err(|e| CatalogError::config(path, format!("invalid JSON: {}", e)))?;

        tracing::debug!(
            "Loaded catalog {} with {} reports",
            path.display(),
            catalog.reports.len()
        );
        Ok(catalog)
    }

    /// Ids of all entries in catalog order; entries without an id are skipped
    pub fn ids(&self) -> Vec<&str> {
        self.reports.iter().filter_map(report_id).collect()
    }

    /// The `categories` table, if present
    pub fn categories(&self) -> Option<&Map<String, Value>> {
        self.extra.get("categories").and_then(Value::as_object)
    }

    pub fn system_version(&self) -> Option<&str> {
        self.extra.get("system_version").and_then(Value::as_str)
    }

    pub fn to_pretty_json(&self) -> CatalogResult<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// `id` of a raw catalog entry
pub fn report_id(report: &Value) -> Option<&str> {
    report.get("id").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_category_round_trip_names() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert_eq!(
            serde_json::to_value(Category::CrossChain).unwrap(),
            Value::String("cross-chain".into())
        );
        assert!("defi".parse::<Category>().is_err());
    }

    #[test]
    fn test_catalog_keeps_unknown_keys_in_order() {
        let raw = r#"{"system_version":"3.3.0","last_updated":"x","reports":[{"id":"a","featured_label":"Key Document"}],"categories":{"slm":{"name":"SLM","order":2}},"stats":{"slm_market":"$64B"}}"#;
        let catalog: Catalog = serde_json::from_str(raw).unwrap();

        assert_eq!(catalog.system_version(), Some("3.3.0"));
        assert_eq!(catalog.ids(), vec!["a"]);
        assert!(catalog.categories().unwrap().contains_key("slm"));

        let keys: Vec<_> = catalog.extra.keys().cloned().collect();
        assert_eq!(keys, vec!["system_version", "categories", "stats"]);
        assert_eq!(catalog.reports[0]["featured_label"], "Key Document");
    }

    #[test]
    fn test_entry_extras_flatten() {
        let raw = r#"{"id":"a","filename":"a.html","title":"A","date":"2026-01-01","category":"vc","featured_label":"NEW"}"#;
        let entry: ReportEntry = serde_json::from_str(raw).unwrap();

        assert_eq!(entry.category, Category::Vc);
        assert_eq!(entry.version, ENTRY_VERSION);
        assert_eq!(entry.extra["featured_label"], "NEW");
    }
}
