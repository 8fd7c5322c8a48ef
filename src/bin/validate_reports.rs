//! Проверяет каталог отчетов и HTML файлы перед деплоем

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use report_catalog::cli_common::{self, CommonArgs, OutputFormat, OutputWriter};
use report_catalog::validate::validate_site;

#[derive(Parser, Debug)]
#[command(
    name = "validate-reports",
    version = env!("CARGO_PKG_VERSION"),
    about = "Validate the report catalog and HTML files before deployment"
)]
struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    cli_common::init_logging(args.common.verbose)?;

    let cwd = std::env::current_dir()?;
    let config = args.common.site_config(&cwd)?;
    let issues = validate_site(&config);

    let mut out = OutputWriter::stdout(args.format);
    match out.format() {
        OutputFormat::Json => out.write_object(&issues)?,
        OutputFormat::Text => {
            let warnings = issues.get_warnings();
            if !warnings.is_empty() {
                out.write_header(&format!("Warnings ({})", warnings.len()))?;
                for warning in warnings {
                    out.write_list_item(&warning.to_string().yellow().to_string())?;
                }
            }

            let errors = issues.get_errors();
            if !errors.is_empty() {
                out.write_header(&format!("Errors ({})", errors.len()))?;
                for error in errors {
                    out.write_list_item(&error.to_string().red().to_string())?;
                }
            }

            out.write_line("")?;
            if issues.has_errors() {
                out.write_line(&"VALIDATION FAILED".red().bold().to_string())?;
            } else {
                out.write_line(&"VALIDATION PASSED".green().bold().to_string())?;
            }
        }
    }
    out.flush()?;

    if issues.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}
