/*!
# Metadata Extraction

Derives the catalog fields of a report from its filename and its HTML.
Nothing here fails: every missing signal falls back to a synthesized value.

| Field       | Source                                  | Fallback                         |
|-------------|-----------------------------------------|----------------------------------|
| id          | filename without `.html`                | -                                |
| date        | last `YYYY-MM-DD` in the filename       | today                            |
| category    | ordered filename rules                  | `slm`                            |
| title       | first `<title>`                         | id, hyphens → spaces, capitalized |
| description | `<meta name="description" content=..>`  | `Research report from <date>`    |
*/

pub mod category;
pub mod html;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Map;

use crate::catalog::{Category, ReportEntry, ENTRY_VERSION};

pub use category::classify;
pub use html::HtmlSignals;

/// Longest title stored in the catalog
pub const MAX_TITLE_CHARS: usize = 80;
const ELLIPSIS: &str = "...";

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

/// Fields derived for one report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMetadata {
    pub id: String,
    pub filename: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub category: Category,
    /// The filename carried no date and `date` is today
    pub date_inferred: bool,
}

impl ReportMetadata {
    /// Builds the catalog entry; badges stay empty for new registrations
    pub fn into_entry(self, featured: bool) -> ReportEntry {
        ReportEntry {
            id: self.id,
            filename: self.filename,
            title: self.title,
            description: self.description,
            date: self.date,
            category: self.category,
            badges: Vec::new(),
            badge_colors: Vec::new(),
            featured,
            version: ENTRY_VERSION.to_string(),
            extra: Map::new(),
        }
    }
}

/// Extracts metadata from a report's base filename and HTML content
pub fn extract(filename: &str, content: &str, today: NaiveDate) -> ReportMetadata {
    let id = report_id(filename);

    let (date, date_inferred) = match date_from_filename(filename) {
        Some(date) => (date, false),
        None => {
            let today = today.format("%Y-%m-%d").to_string();
            tracing::warn!("No date in filename {}, using {}", filename, today);
            (today, true)
        }
    };

    let signals = HtmlSignals::from_html(content);
    let title = truncate_title(&signals.title.unwrap_or_else(|| title_from_id(&id)));
    let description = signals
        .description
        .unwrap_or_else(|| format!("Research report from {}", date));

    let category = classify(filename);
    tracing::debug!("Extracted {} → category={}, date={}", id, category, date);

    ReportMetadata {
        id,
        filename: filename.to_string(),
        title,
        description,
        date,
        category,
        date_inferred,
    }
}

/// Filename with the `.html` suffix stripped
pub fn report_id(filename: &str) -> String {
    filename
        .strip_suffix(".html")
        .unwrap_or(filename)
        .to_string()
}

/// Last `YYYY-MM-DD` substring of the filename
pub fn date_from_filename(filename: &str) -> Option<String> {
    DATE_RE
        .find_iter(filename)
        .last()
        .map(|m| m.as_str().to_string())
}

/// `solana-market-outlook` → `Solana Market Outlook`
pub fn title_from_id(id: &str) -> String {
    id.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Caps a title at 80 characters: 77 kept plus `...`
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title.to_string();
    }
    let kept: String = title
        .chars()
        .take(MAX_TITLE_CHARS - ELLIPSIS.len())
        .collect();
    format!("{}{}", kept, ELLIPSIS)
}
