//! Перегенерирует index.html из каталога отчетов

use anyhow::Result;
use clap::Parser;

use report_catalog::cli_common::{self, format_file_size, print_error, print_step, CliCommand, CommonArgs};
use report_catalog::index::IndexGenerator;
use report_catalog::CatalogError;

#[derive(Parser, Debug)]
#[command(
    name = "generate-index",
    version = env!("CARGO_PKG_VERSION"),
    about = "Render index.html from the report catalog"
)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

struct GenerateIndexCommand {
    args: Args,
}

impl CliCommand for GenerateIndexCommand {
    fn name(&self) -> &str {
        "generate-index"
    }

    fn description(&self) -> &str {
        "Research index generator"
    }

    fn execute(&self) -> Result<()> {
        let cwd = std::env::current_dir()?;
        let config = self.args.common.site_config(&cwd)?;
        let generator = IndexGenerator::new(config);

        print_step(1, &format!("Loading {}...", generator.config().catalog_path.display()));
        let (catalog, reports) = generator.load()?;
        println!("   Found {} reports", reports.len());

        print_step(2, "Verifying HTML files exist...");
        let missing = generator.missing_files(&reports);
        if !missing.is_empty() {
            print_error("Missing HTML files in reports directory:");
            for filename in &missing {
                eprintln!("  - {}", filename);
            }
            return Err(CatalogError::config(
                &generator.config().reports_dir,
                format!("{} referenced files are missing", missing.len()),
            )
            .into());
        }
        println!("   All files found");

        print_step(3, "Generating index...");
        let summary = generator.write(&catalog, &reports)?;
        println!(
            "   Wrote {} to {}",
            format_file_size(summary.bytes as u64),
            summary.output.display()
        );
        println!(
            "   Reports: {}, categories: {}, system version: {}",
            summary.reports,
            summary.categories,
            summary.system_version.as_deref().unwrap_or("unknown")
        );

        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    cli_common::init_logging(args.common.verbose)?;

    if cli_common::run_command(GenerateIndexCommand { args }).is_err() {
        std::process::exit(1);
    }
    Ok(())
}
