/*!
# Site Configuration

Locations of the catalog, the reports directory and the index output, plus
the command that regenerates the index. Loaded from an optional
`report-catalog.toml`; every key has a default matching the usual site
layout:

```toml
catalog = "config/reports.json"
reports_dir = "reports"
index_output = "index.html"
print_only = false

[index]
command = ["generate-index"]
```
*/

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::{CatalogError, CatalogResult};

/// Config file looked up in the site root when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "report-catalog.toml";

/// Environment variable naming the config file; set for the index command
pub const CONFIG_ENV: &str = "REPORT_CATALOG_CONFIG";

/// Raw on-disk configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfigFile {
    /// Catalog JSON, relative to the site root
    pub catalog: PathBuf,

    /// Directory holding the report HTML files
    pub reports_dir: PathBuf,

    /// Generated index page
    pub index_output: PathBuf,

    /// Print entries for manual insertion instead of rewriting the catalog
    pub print_only: bool,

    pub index: IndexCommandConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexCommandConfig {
    /// Program and arguments; empty means "the bundled generate-index"
    pub command: Vec<String>,
}

impl Default for SiteConfigFile {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("config/reports.json"),
            reports_dir: PathBuf::from("reports"),
            index_output: PathBuf::from("index.html"),
            print_only: false,
            index: IndexCommandConfig::default(),
        }
    }
}

/// Configuration with every path made absolute against the site root
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// File the configuration was read from, if any
    pub source: Option<PathBuf>,
    pub root: PathBuf,
    pub catalog_path: PathBuf,
    pub reports_dir: PathBuf,
    pub index_output: PathBuf,
    pub print_only: bool,
    pub index_command: Vec<String>,
}

impl SiteConfig {
    /// Defaults rooted at `root`
    pub fn for_root(root: &Path) -> Self {
        Self::from_file_config(root, SiteConfigFile::default(), None)
    }

    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, the nearest
    /// `report-catalog.toml` in `cwd` or one of its ancestors is used,
    /// otherwise defaults rooted at `cwd`.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> CatalogResult<Self> {
        match explicit {
            Some(path) => {
                let path = absolutize(path, cwd);
                if !path.is_file() {
                    return Err(CatalogError::config(&path, "config file does not exist"));
                }
                Self::load_from_file(&path)
            }
            None => match discover(cwd) {
                Some(found) => Self::load_from_file(&found),
                None => {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::for_root(cwd))
                }
            },
        }
    }

    /// Load configuration from TOML file; the site root is its directory
    pub fn load_from_file(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let file: SiteConfigFile =
            toml::from_str(&content).map_err(|e| CatalogError::config(path, e.to_string()))?;

        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        tracing::debug!("Loaded site config from {}", path.display());
        Ok(Self::from_file_config(&root, file, Some(path.to_path_buf())))
    }

    fn from_file_config(root: &Path, file: SiteConfigFile, source: Option<PathBuf>) -> Self {
        Self {
            source,
            root: root.to_path_buf(),
            catalog_path: absolutize(&file.catalog, root),
            reports_dir: absolutize(&file.reports_dir, root),
            index_output: absolutize(&file.index_output, root),
            print_only: file.print_only,
            index_command: file.index.command,
        }
    }
}

/// Nearest `report-catalog.toml` at or above `start`
pub fn discover(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(DEFAULT_CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

/// Prefixes `base` to relative paths
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
