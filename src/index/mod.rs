/*!
# Index

Regeneration of the site's `index.html`. [`trigger`] runs the configured
index command as an opaque child process; [`generator`] and [`html`] are
what the bundled `generate-index` binary runs.
*/

pub mod generator;
pub mod html;

use std::path::PathBuf;
use std::process::Command;

use crate::config::{SiteConfig, CONFIG_ENV};
use crate::core::{CatalogError, CatalogResult};

pub use generator::{IndexGenerator, IndexSummary, ListedReport};

/// Name of the bundled generator binary
pub const GENERATOR_BIN: &str = "generate-index";

/// Runs the index command after the catalog has been written.
///
/// The command gets no extra arguments and runs in the site root; a
/// non-zero exit is returned as [`CatalogError::Index`] carrying the child's
/// status. No retry.
pub fn trigger(config: &SiteConfig) -> CatalogResult<()> {
    let (program, args) = index_command(config);
    tracing::info!("Regenerating index with {}", program.display());

    let mut command = Command::new(&program);
    command.args(&args).current_dir(&config.root);
    if let Some(source) = &config.source {
        command.env(CONFIG_ENV, source);
    }

    let status = command.status().map_err(|e| CatalogError::Index {
        message: format!("could not start {}: {}", program.display(), e),
        status: None,
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(CatalogError::Index {
            message: format!("{} exited with {}", program.display(), status),
            status: status.code(),
        })
    }
}

/// Program and arguments to run; the configured command, else the
/// generator installed next to this executable, else `generate-index` on PATH
pub fn index_command(config: &SiteConfig) -> (PathBuf, Vec<String>) {
    if let Some((program, args)) = config.index_command.split_first() {
        return (PathBuf::from(program), args.to_vec());
    }

    let sibling = std::env::current_exe().ok().and_then(|exe| {
        let candidate = exe.with_file_name(format!("{}{}", GENERATOR_BIN, std::env::consts::EXE_SUFFIX));
        candidate.is_file().then_some(candidate)
    });

    (sibling.unwrap_or_else(|| PathBuf::from(GENERATOR_BIN)), Vec::new())
}
