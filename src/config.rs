use std::env;
use std::path::{Path, PathBuf};

use crate::output::default_workers;
use crate::release::DEFAULT_API_BASE;

/// Upstream repository publishing geosite.dat
pub const DEFAULT_SOURCE: &str = "Loyalsoldier/v2ray-rules-dat";

/// Repository publishing the generated rule-sets
pub const DEFAULT_DESTINATION: &str = "lyc8503/sing-geosite";

/// Output directory for generated rule-sets
pub const DEFAULT_OUTPUT_DIR: &str = "rule-set";

/// Environment variable holding a GitHub access token
pub const ENV_ACCESS_TOKEN: &str = "ACCESS_TOKEN";

/// Environment variable that disables the "already latest" skip when `true`
pub const ENV_NO_SKIP: &str = "NO_SKIP";

/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub source: String,
    pub destination: String,
    pub output_dir: PathBuf,
    pub api_base: String,
    pub access_token: Option<String>,
    /// Regenerate even if the destination release is already up to date
    pub no_skip: bool,
    pub workers: usize,
}

impl Config {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            destination: DEFAULT_DESTINATION.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            api_base: DEFAULT_API_BASE.to_string(),
            access_token: None,
            no_skip: false,
            workers: default_workers(),
        }
    }

    /// Defaults overlaid with `ACCESS_TOKEN` and `NO_SKIP`
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(token) = env::var(ENV_ACCESS_TOKEN) {
            if !token.is_empty() {
                config.access_token = Some(token);
            }
        }
        config.no_skip = env::var(ENV_NO_SKIP).map(|v| v == "true").unwrap_or(false);
        config
    }

    pub fn with_source(mut self, repository: impl Into<String>) -> Self {
        self.source = repository.into();
        self
    }

    pub fn with_destination(mut self, repository: impl Into<String>) -> Self {
        self.destination = repository.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set custom GitHub API endpoint
    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_no_skip(mut self, no_skip: bool) -> Self {
        self.no_skip = no_skip;
        self
    }

    /// Set number of writer threads (at least 1)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
