//! Command line of `add-report`.

use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use crate::cli_common::CommonArgs;
use crate::core::{CatalogError, CatalogResult};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "add-report",
    version = env!("CARGO_PKG_VERSION"),
    about = "Register an HTML research report in the site catalog and rebuild the index"
)]
pub struct AddReportArgs {
    /// Report HTML file; when several are given the last one wins.
    /// Names starting with '-' go after `--` or take a `./` prefix.
    #[arg(value_name = "REPORT")]
    pub paths: Vec<PathBuf>,

    /// Copy the report into the reports directory
    #[arg(long)]
    pub copy: bool,

    /// Mark the report as featured
    #[arg(long)]
    pub featured: bool,

    /// Print the catalog entry for manual insertion instead of writing it
    #[arg(long)]
    pub print_entry: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// A validated request to register one report
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub report_path: PathBuf,
    pub copy: bool,
    pub featured: bool,
    pub print_entry: bool,
}

impl AddReportArgs {
    /// Fails with [`CatalogError::Usage`] when no report path was given
    pub fn invocation(&self) -> CatalogResult<Invocation> {
        let report_path = self.paths.last().cloned().ok_or(CatalogError::Usage)?;
        Ok(Invocation {
            report_path,
            copy: self.copy,
            featured: self.featured,
            print_entry: self.print_entry,
        })
    }

    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }
}
