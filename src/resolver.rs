//! Locates the report on disk and brings it into the reports directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::absolutize;
use crate::core::{CatalogError, CatalogResult};

/// Where the report ended up
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedReport {
    /// Absolute path the operator pointed at
    pub source: PathBuf,
    /// File the catalog entry refers to (inside the reports directory when copied)
    pub location: PathBuf,
    /// Base filename
    pub filename: String,
    pub copied: bool,
}

/// Resolves `path` against `cwd` and copies it into `reports_dir` when
/// `copy` is set or the file lives elsewhere. An existing file of the same
/// name in `reports_dir` is overwritten.
pub fn resolve_report(
    path: &Path,
    cwd: &Path,
    reports_dir: &Path,
    copy: bool,
) -> CatalogResult<ResolvedReport> {
    let source = absolutize(path, cwd);
    if !source.is_file() {
        return Err(CatalogError::FileNotFound(source));
    }

    let filename = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CatalogError::FileNotFound(source.clone()))?;

    let inside = is_directly_inside(&source, reports_dir);
    if !copy && inside {
        return Ok(ResolvedReport {
            location: source.clone(),
            source,
            filename,
            copied: false,
        });
    }

    let destination = reports_dir.join(&filename);
    if same_file(&source, &destination) {
        tracing::debug!("{} is already in place", destination.display());
        return Ok(ResolvedReport {
            source,
            location: destination,
            filename,
            copied: false,
        });
    }

    fs::create_dir_all(reports_dir).map_err(|e| CatalogError::io(reports_dir, e))?;
    fs::copy(&source, &destination).map_err(|e| CatalogError::io(&destination, e))?;
    tracing::debug!("Copied {} -> {}", source.display(), destination.display());

    Ok(ResolvedReport {
        source,
        location: destination,
        filename,
        copied: true,
    })
}

/// True when `file`'s parent directory is `dir`
fn is_directly_inside(file: &Path, dir: &Path) -> bool {
    let parent = match file.parent() {
        Some(p) => p,
        None => return false,
    };
    match (fs::canonicalize(parent), fs::canonicalize(dir)) {
        (Ok(parent), Ok(dir)) => parent == dir,
        _ => false,
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
