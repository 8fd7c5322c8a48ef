//! Общие аргументы командной строки для CLI утилит

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::core::CatalogResult;

/// Общие аргументы для всех CLI команд
#[derive(Parser, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Site configuration file (defaults to ./report-catalog.toml when present)
    #[arg(long, value_name = "FILE", env = "REPORT_CATALOG_CONFIG")]
    pub config: Option<PathBuf>,
}

impl CommonArgs {
    /// Загружает конфигурацию сайта относительно рабочей директории
    pub fn site_config(&self, cwd: &Path) -> CatalogResult<SiteConfig> {
        SiteConfig::load(self.config.as_deref(), cwd)
    }
}
