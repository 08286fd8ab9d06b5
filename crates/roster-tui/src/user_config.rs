//! User configuration.
//!
//! Layered with the `config` crate: built-in defaults, then
//! `{config_dir}/roster/config.toml`, then `ROSTER_*` environment variables
//! (`__` separates sections, e.g. `ROSTER_API__BASE_URL`). CLI flags are
//! applied last by [`UserConfig::apply_cli`].

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use roster_client::{
    ClientError, DEFAULT_BASE_URL, DEFAULT_COLLECTION, HttpConfig, REQUEST_TIMEOUT_SECS,
};
use roster_core::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use serde::{Deserialize, Serialize};

use crate::Cli;
use crate::app::types::ViewMode;
use crate::virtual_grid::GridConfig;

pub const ENV_PREFIX: &str = "ROSTER";

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct UserConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub view: ViewMode,
    /// Start path, e.g. `/records/3`.
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub collection: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct PagingConfig {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
        }
    }
}

impl PagingConfig {
    /// Sorted, deduplicated, non-zero options; the built-in list if nothing usable remains.
    pub fn options(&self) -> Vec<usize> {
        let mut options: Vec<usize> = self
            .page_size_options
            .iter()
            .copied()
            .filter(|&o| o > 0)
            .collect();
        options.sort_unstable();
        options.dedup();
        if options.is_empty() {
            PAGE_SIZE_OPTIONS.to_vec()
        } else {
            options
        }
    }

    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size)
            .or_else(|| NonZeroUsize::new(DEFAULT_PAGE_SIZE))
            .unwrap_or(NonZeroUsize::MIN)
    }
}

impl UserConfig {
    /// Load from `path` (or the default location) and the environment.
    ///
    /// A malformed source yields the defaults plus the error. Nothing is
    /// logged here: this runs before the subscriber is installed.
    pub fn load(path: Option<&Path>) -> (UserConfig, Option<roster_error::Error>) {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);
        match Self::load_from(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => {
                let err = roster_error::Error::Config {
                    message: format!("{}: {e}; using defaults", path.display()),
                };
                (UserConfig::default(), Some(err))
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<UserConfig, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<UserConfig>()
    }

    /// Default config.toml path: ~/.config/roster/config.toml
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roster")
            .join("config.toml")
    }

    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.base_url {
            self.api.base_url = url.clone();
        }
        if let Some(route) = &cli.route {
            self.route = Some(route.clone());
        }
        if let Some(view) = cli.view {
            self.view = view;
        }
        self
    }

    pub fn http_config(&self) -> Result<HttpConfig, ClientError> {
        HttpConfig::new(
            &self.api.base_url,
            self.api.collection.as_str(),
            Duration::from_secs(self.api.timeout_secs.max(1)),
        )
    }

    pub fn start_route(&self) -> &str {
        self.route.as_deref().unwrap_or(crate::router::RECORDS_PATH)
    }

    /// `log_dir` if set, else `{data_dir}/roster/logs`.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("roster")
                .join("logs")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = UserConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.paging.page_size, 10);
        assert_eq!(cfg.grid, GridConfig::default());
        assert_eq!(cfg.view, ViewMode::List);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
view = "grid"

[api]
base_url = "http://localhost:9000/api"

[paging]
page_size = 25

[grid]
columns = 4
"#,
        )
        .unwrap();
        let cfg = UserConfig::load_from(&path).unwrap();
        assert_eq!(cfg.api.base_url, "http://localhost:9000/api");
        assert_eq!(cfg.api.collection, DEFAULT_COLLECTION);
        assert_eq!(cfg.paging.page_size, 25);
        assert_eq!(cfg.grid.columns, 4);
        assert_eq!(cfg.grid.card_height, 8);
        assert_eq!(cfg.view, ViewMode::Grid);
    }

    #[test]
    fn malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[paging]\npage_size = \"lots\"\n").unwrap();
        assert!(UserConfig::load_from(&path).is_err());

        let (cfg, err) = UserConfig::load(Some(&path));
        assert_eq!(cfg, UserConfig::default());
        let err = err.expect("malformed file is reported");
        assert_eq!(err.severity(), roster_error::Severity::Warning);
        assert!(err.to_string().contains("config.toml"), "{err}");
    }

    #[test]
    fn readable_file_reports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[paging]\npage_size = 5\n").unwrap();
        let (cfg, err) = UserConfig::load(Some(&path));
        assert!(err.is_none());
        assert_eq!(cfg.paging.page_size, 5);
    }

    #[test]
    fn page_size_options_are_sanitized() {
        let paging = PagingConfig {
            page_size: 0,
            page_size_options: vec![50, 0, 5, 5],
        };
        assert_eq!(paging.options(), vec![5, 50]);
        assert_eq!(paging.page_size().get(), DEFAULT_PAGE_SIZE);

        let empty = PagingConfig {
            page_size: 5,
            page_size_options: vec![0],
        };
        assert_eq!(empty.options(), PAGE_SIZE_OPTIONS.to_vec());
    }

    #[test]
    fn cli_flags_win() {
        let cli = Cli {
            base_url: Some("http://127.0.0.1:1234".into()),
            config: None,
            route: Some("/records/7".into()),
            view: Some(ViewMode::Grid),
        };
        let cfg = UserConfig::default().apply_cli(&cli);
        assert_eq!(cfg.api.base_url, "http://127.0.0.1:1234");
        assert_eq!(cfg.start_route(), "/records/7");
        assert_eq!(cfg.view, ViewMode::Grid);
        assert!(cfg.http_config().is_ok());
    }
}
