/*!
# HTML рендеринг индекса

Автономная страница со встроенным CSS: блок статистики, избранные отчеты,
разделы по категориям и по датам. Весь пользовательский текст экранируется.
*/

use chrono::NaiveDate;

use super::generator::ListedReport;

/// Группа карточек под одним заголовком
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub id: String,
    pub name: String,
    pub reports: Vec<ListedReport>,
}

/// Все данные страницы индекса
#[derive(Debug, Clone, Default)]
pub struct IndexPage {
    pub total_reports: usize,
    pub system_version: Option<String>,
    pub last_updated: Option<String>,
    pub stats: Vec<(String, String)>,
    pub featured: Vec<ListedReport>,
    pub by_category: Vec<ReportSection>,
    pub by_date: Vec<ReportSection>,
    /// Путь от index.html к каталогу отчетов
    pub reports_href: String,
}

impl IndexPage {
    /// Генерирует HTML страницу
    pub fn render(&self) -> String {
        let mut html = String::new();

        html.push_str(&self.generate_html_header());
        html.push_str(CSS_STYLES);
        html.push_str("</head>\n<body>\n<div class=\"container\">\n");

        html.push_str(&self.generate_page_header());

        if !self.stats.is_empty() {
            html.push_str(&self.generate_stats_bar());
        }

        if !self.featured.is_empty() {
            html.push_str(&self.generate_section(
                "featured",
                "Featured Reports",
                &self.featured,
                true,
            ));
        }

        html.push_str("<h2 class=\"view-title\">By Category</h2>\n");
        for section in &self.by_category {
            html.push_str(&self.generate_section(&section.id, &section.name, &section.reports, false));
        }

        html.push_str("<h2 class=\"view-title\">By Date</h2>\n");
        for section in &self.by_date {
            html.push_str(&self.generate_section(
                &format!("date-{}", section.id),
                &section.name,
                &section.reports,
                false,
            ));
        }

        html.push_str("</div>\n</body>\n</html>\n");
        html
    }

    fn generate_html_header(&self) -> String {
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Research Reports</title>
"#
        .to_string()
    }

    fn generate_page_header(&self) -> String {
        let mut meta = format!(
            "            <span class=\"meta-item\">{} reports</span>\n",
            self.total_reports
        );
        if let Some(version) = &self.system_version {
            meta.push_str(&format!(
                "            <span class=\"meta-item\">v{}</span>\n",
                html_escape(version)
            ));
        }
        if let Some(updated) = &self.last_updated {
            meta.push_str(&format!(
                "            <span class=\"meta-item\">Updated {}</span>\n",
                html_escape(updated)
            ));
        }

        format!(
            r#"    <div class="header">
        <h1>Research Reports</h1>
        <div class="meta">
{}        </div>
    </div>
"#,
            meta
        )
    }

    fn generate_stats_bar(&self) -> String {
        let mut html = String::from("    <div class=\"stats-bar\">\n");
        for (key, value) in &self.stats {
            html.push_str(&format!(
                r#"        <div class="stat">
            <div class="stat-value">{}</div>
            <div class="stat-label">{}</div>
        </div>
"#,
                html_escape(value),
                html_escape(&stat_label(key))
            ));
        }
        html.push_str("    </div>\n");
        html
    }

    fn generate_section(&self, id: &str, title: &str, reports: &[ListedReport], featured: bool) -> String {
        let mut html = format!(
            "    <section class=\"section\" id=\"{}\">\n        <h3>{} <span class=\"count\">{}</span></h3>\n        <div class=\"grid\">\n",
            html_escape(id),
            html_escape(title),
            reports.len()
        );
        for report in reports {
            html.push_str(&self.generate_card(report, featured));
        }
        html.push_str("        </div>\n    </section>\n");
        html
    }

    fn generate_card(&self, report: &ListedReport, featured: bool) -> String {
        let filename = urlencoding::encode(&report.filename);
        let href = if self.reports_href.is_empty() {
            filename.into_owned()
        } else {
            format!("{}/{}", self.reports_href, filename)
        };

        let label = match (&report.featured_label, featured) {
            (Some(label), true) => format!(
                "            <div class=\"featured-label\">{}</div>\n",
                html_escape(label)
            ),
            _ => String::new(),
        };

        let badges: String = report
            .badges
            .iter()
            .enumerate()
            .map(|(i, badge)| {
                let color = report.badge_colors.get(i).map(String::as_str).unwrap_or("primary");
                format!(
                    "<span class=\"badge badge-{}\">{}</span>",
                    html_escape(color),
                    html_escape(badge)
                )
            })
            .collect();

        format!(
            r#"        <a class="report-card{}" href="{}">
{}            <h4>{}</h4>
            <p>{}</p>
            <div class="card-meta"><span class="date">{}</span>{}</div>
        </a>
"#,
            if featured { " featured" } else { "" },
            html_escape(&href),
            label,
            html_escape(&report.title),
            html_escape(&report.description),
            html_escape(&format_date_label(&report.date)),
            badges
        )
    }
}

/// `2026-01-19` → `January 19, 2026`; anything else is returned as is
pub fn format_date_label(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%B %d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// `slm_market` → `Slm Market`
fn stat_label(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Экранирует HTML спецсимволы
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

const CSS_STYLES: &str = r#"<style>
body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    margin: 0;
    padding: 20px;
    background-color: #0f1117;
    color: #e6e6e6;
}

.container { max-width: 1200px; margin: 0 auto; }

.header {
    text-align: center;
    padding: 2rem;
    border-radius: 16px;
    background: linear-gradient(135deg, #1f2937, #111827);
    margin-bottom: 2rem;
}

.header h1 { margin: 0 0 1rem 0; font-size: 2.2rem; }
.meta { display: flex; gap: 1rem; justify-content: center; flex-wrap: wrap; }
.meta-item { padding: 0.4rem 1rem; border-radius: 999px; background: #374151; font-size: 0.85rem; }

.stats-bar {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
    gap: 1rem;
    margin-bottom: 2rem;
}
.stat { background: #1f2937; border-radius: 12px; padding: 1rem; text-align: center; }
.stat-value { font-size: 1.8rem; font-weight: 700; color: #a78bfa; }
.stat-label { font-size: 0.85rem; color: #9ca3af; }

.view-title { margin-top: 2.5rem; border-bottom: 1px solid #374151; padding-bottom: 0.5rem; }
.section h3 .count { font-size: 0.8rem; color: #9ca3af; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(320px, 1fr)); gap: 1rem; }

.report-card {
    display: block;
    padding: 1.2rem;
    border-radius: 12px;
    background: #1f2937;
    color: inherit;
    text-decoration: none;
    border: 1px solid transparent;
}
.report-card:hover { border-color: #a78bfa; }
.report-card.featured { border-color: #f59e0b; }
.report-card h4 { margin: 0 0 0.5rem 0; }
.report-card p { margin: 0 0 0.75rem 0; color: #d1d5db; font-size: 0.9rem; }
.featured-label { font-size: 0.75rem; color: #f59e0b; text-transform: uppercase; margin-bottom: 0.4rem; }
.card-meta { display: flex; gap: 0.5rem; align-items: center; flex-wrap: wrap; font-size: 0.8rem; color: #9ca3af; }

.badge { padding: 0.15rem 0.5rem; border-radius: 6px; font-size: 0.7rem; }
.badge-primary { background: #4f46e5; }
.badge-purple { background: #7c3aed; }
.badge-blue { background: #2563eb; }
.badge-green { background: #059669; }
.badge-pink { background: #db2777; }

@media (max-width: 768px) {
    body { padding: 1rem; }
    .header { padding: 1.5rem 1rem; border-radius: 12px; }
    .header h1 { font-size: 1.5rem; }
    .stats-bar { grid-template-columns: repeat(2, 1fr); }
    .grid { grid-template-columns: 1fr; }
}
</style>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str) -> ListedReport {
        ListedReport {
            id: "SLM-a".into(),
            filename: "SLM-a.html".into(),
            title: title.into(),
            description: "Edge inference".into(),
            date: "2026-01-19".into(),
            category: "slm".into(),
            badges: vec!["SLM".into(), "Edge".into()],
            badge_colors: vec!["green".into()],
            featured_label: Some("NEW - Latest Research".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_page() {
        let page = IndexPage {
            total_reports: 1,
            system_version: Some("3.3.0".into()),
            stats: vec![("slm_market".into(), "$64B".into())],
            featured: vec![card("Edge <SLM> & Agents")],
            by_category: vec![ReportSection {
                id: "slm".into(),
                name: "SLM & Edge AI Research".into(),
                reports: vec![card("Edge <SLM> & Agents")],
            }],
            reports_href: "reports".into(),
            ..Default::default()
        };
        let html = page.render();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Edge &lt;SLM&gt; &amp; Agents"));
        assert!(html.contains("href=\"reports/SLM-a.html\""));
        assert!(html.contains("SLM &amp; Edge AI Research"));
        assert!(html.contains("<div class=\"stat-label\">Slm Market</div>"));
        assert!(html.contains("badge badge-green\">SLM"));
        assert!(html.contains("badge badge-primary\">Edge"));
        assert!(html.contains("NEW - Latest Research"));
        assert!(html.contains("January 19, 2026"));
    }

    #[test]
    fn test_card_href_is_percent_encoded() {
        let mut report = card("Draft");
        report.filename = "SLM draft #2?.html".into();
        let page = IndexPage {
            featured: vec![report],
            reports_href: "../reports".into(),
            ..Default::default()
        };

        assert!(page
            .render()
            .contains("href=\"../reports/SLM%20draft%20%232%3F.html\""));
    }

    #[test]
    fn test_format_date_label() {
        assert_eq!(format_date_label("2026-01-05"), "January 05, 2026");
        assert_eq!(format_date_label("Unknown"), "Unknown");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("test & <script>"), "test &amp; &lt;script&gt;");
        assert_eq!(html_escape("normal text"), "normal text");
    }
}
