use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{LinkstatError, Result};

/// Default number of probes in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 100;

/// Default per-probe timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Timeout in seconds for each HTTP probe
    pub timeout: Option<u64>,

    /// Maximum number of probes in flight at once
    pub concurrency: Option<usize>,

    /// Follow redirect chains automatically instead of reporting the
    /// first 3xx response verbatim
    pub follow_redirects: Option<bool>,

    /// Base URL whose pages keep their 3xx responses verbatim and are
    /// eligible for the secondary probe (exact string-prefix match)
    pub primary_domain: Option<String>,

    /// Base URL probed for not-found primary-domain pages
    pub alternate_base: Option<String>,

    /// Probe the alternate base for not-found primary-domain pages and
    /// suggest an nginx rewrite rule
    pub secondary_probe: Option<bool>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT_SECONDS),
            concurrency: Some(DEFAULT_CONCURRENCY),
            follow_redirects: Some(true),
            primary_domain: None,
            alternate_base: None,
            secondary_probe: Some(false),
            user_agent: None,
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        // Check for .linkstat.toml in current directory
        if let Ok(config) = Self::load_from_file(".linkstat.toml") {
            return config;
        }

        // Check for .linkstat.toml in parent directories (up to 3 levels)
        for i in 1..=3 {
            let path = format!("{}.linkstat.toml", "../".repeat(i));
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        // Fall back to defaults
        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(concurrency) = cli_config.concurrency {
            self.concurrency = Some(concurrency);
        }
        if cli_config.no_follow {
            self.follow_redirects = Some(false);
        }
        if let Some(ref primary_domain) = cli_config.primary_domain {
            self.primary_domain = Some(primary_domain.clone());
        }
        if let Some(ref alternate_base) = cli_config.alternate_base {
            self.alternate_base = Some(alternate_base.clone());
        }
        if cli_config.secondary_probe {
            self.secondary_probe = Some(true);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Reject option combinations that cannot drive a probe run
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == Some(0) {
            return Err(LinkstatError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.secondary_probe.unwrap_or(false)
            && (self.primary_domain.is_none() || self.alternate_base.is_none())
        {
            return Err(LinkstatError::Config(
                "secondary probe requires both primary_domain and alternate_base".to_string(),
            ));
        }
        Ok(())
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    /// Get the concurrency ceiling, floored at one in-flight probe
    pub fn concurrency_limit(&self) -> usize {
        self.concurrency.unwrap_or(DEFAULT_CONCURRENCY).max(1)
    }

    /// True when the given URL sits under the configured primary domain
    pub fn is_primary_domain(&self, url: &str) -> bool {
        self.primary_domain
            .as_deref()
            .is_some_and(|prefix| url.starts_with(prefix))
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub timeout: Option<u64>,
    pub concurrency: Option<usize>,
    pub no_follow: bool,
    pub primary_domain: Option<String>,
    pub alternate_base: Option<String>,
    pub secondary_probe: bool,
    pub user_agent: Option<String>,
    pub verbose: bool,
    pub quiet: bool,
    pub no_progress: bool,
    pub config_file: Option<String>,
    pub no_config: bool,
}
