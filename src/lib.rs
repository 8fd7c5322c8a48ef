/*!
# Report Catalog

Keeps a static research site's report catalog (`config/reports.json`) in
sync with the HTML reports it publishes.

## Binaries

```bash
# Register a report: copy it into reports/, upsert its entry, rebuild index.html
add-report ~/Downloads/SOLANA-market-outlook-2024-05-01.html --featured

# Print the entry instead of writing the catalog
add-report reports/KYA-x402-2026-01-19.html --print-entry

# Rebuild index.html from the catalog
generate-index

# Pre-deploy checks
validate-reports --format json
```

## Architecture

```text
add-report
├── invocation   - command line (clap)
├── resolver     - absolute path, copy into reports/
├── metadata     - id, date, category, title, description
├── catalog      - JSON model, upsert, atomic rewrite
└── index        - runs the index command
generate-index   - index::generator + index::html
validate-reports - validate
```

## Library

```rust,no_run
use report_catalog::config::SiteConfig;
use report_catalog::invocation::Invocation;
use report_catalog::register::Registrar;

let cwd = std::env::current_dir()?;
let config = SiteConfig::load(None, &cwd)?;
let invocation = Invocation {
    report_path: "SLM-edge-2026-01-19.html".into(),
    copy: false,
    featured: false,
    print_entry: false,
};
let registration = Registrar::new(&config, &cwd).run(&invocation)?;
println!("{}", registration.entry.id);
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub mod catalog;
pub mod cli_common;
pub mod config;
pub mod core;
pub mod index;
pub mod invocation;
pub mod metadata;
pub mod register;
pub mod resolver;
pub mod validate;

pub use catalog::{Catalog, Category, ReportEntry, UpsertOutcome};
pub use config::SiteConfig;
pub use core::{CatalogError, CatalogResult, IssueCollector};
pub use invocation::{AddReportArgs, Invocation};
pub use register::{Applied, Progress, Registrar, Registration};
