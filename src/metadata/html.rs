//! `<title>` and `<meta name="description">` lookup in report HTML.

use scraper::{Html, Selector};

/// Signals read from a report document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlSignals {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl HtmlSignals {
    pub fn from_html(content: &str) -> Self {
        let document = Html::parse_document(content);

        let title = Selector::parse("title").ok().and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|el| collapse_whitespace(&el.text().collect::<String>()))
                .filter(|t| !t.is_empty())
        });

        let description = Selector::parse("meta[name=\"description\"]")
            .ok()
            .and_then(|selector| {
                document
                    .select(&selector)
                    .next()
                    .and_then(|el| el.value().attr("content"))
                    .map(collapse_whitespace)
                    .filter(|c| !c.is_empty())
            });

        Self { title, description }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
