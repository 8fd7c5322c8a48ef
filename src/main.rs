/*!
# add-report

Registers an HTML research report in the site catalog and rebuilds the index.

```bash
add-report <path-to-report> [--copy] [--featured] [--print-entry]
```
*/

use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use std::path::Path;

use report_catalog::cli_common::{self, print_error, print_info, print_step, print_success, print_warning};
use report_catalog::{
    AddReportArgs, Applied, CatalogError, CatalogResult, Invocation, Progress, Registrar, SiteConfig,
};

fn main() {
    let args = AddReportArgs::parse();

    if let Err(e) = cli_common::init_logging(args.common.verbose) {
        eprintln!("{}", e);
    }

    let code = match run(&args) {
        Ok(()) => 0,
        Err(CatalogError::Usage) => {
            print_error("No report file given");
            eprintln!("{}", AddReportArgs::usage());
            1
        }
        Err(e) => {
            print_error(&e.to_string());
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn run(args: &AddReportArgs) -> CatalogResult<()> {
    let invocation = args.invocation()?;
    let cwd = std::env::current_dir().map_err(|e| CatalogError::io(".", e))?;
    let config = args.common.site_config(&cwd)?;

    register(&invocation, &config, &cwd)
}

fn register(invocation: &Invocation, config: &SiteConfig, cwd: &Path) -> CatalogResult<()> {
    let registration = Registrar::new(config, cwd).run_with(invocation, Utc::now(), &mut |progress| {
        report_progress(progress)
    })?;

    match registration.applied {
        Applied::Printed(json) => {
            print_warning("Catalog not modified; add this entry at the top of \"reports\" manually:");
            println!("{}", json);
        }
        Applied::Written(_) => {
            print_success(&format!("Report {} registered", registration.entry.id));
        }
    }
    Ok(())
}

fn report_progress(progress: Progress<'_>) {
    match progress {
        Progress::Resolving => print_step(1, "Resolving report file..."),
        Progress::Copied(location) => print_info(&format!("Copied to {}", location.display())),
        Progress::Extracting => print_step(2, "Extracting metadata..."),
        Progress::Extracted {
            entry,
            date_inferred,
        } => {
            if date_inferred {
                print_warning(&format!("No date found in filename, using today: {}", entry.date));
            }
            print_summary_line("ID", &entry.id);
            print_summary_line("Title", &entry.title);
            print_summary_line("Date", &entry.date);
            print_summary_line("Category", entry.category.as_str());
            print_summary_line("Featured", if entry.featured { "yes" } else { "no" });
        }
        Progress::UpdatingCatalog => print_step(3, "Updating catalog..."),
        Progress::CatalogUpdated { id, outcome } => print_info(&format!(
            "{} {} ({} reports)",
            if outcome.was_update() { "Updated" } else { "Added" },
            id,
            outcome.total
        )),
        Progress::RebuildingIndex => print_step(4, "Regenerating index..."),
    }
}

fn print_summary_line(label: &str, value: &str) {
    println!("   {} {}", format!("{:<9}", format!("{}:", label)).dimmed(), value);
}
