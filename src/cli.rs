// Command-line interface definitions and parsing for linkstat

use crate::config::CliConfig;
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// CSV file with a URL column to probe
    pub input: Option<String>,

    /// Output CSV path (defaults to overwriting the input file in place)
    pub output: Option<String>,

    // Core Options
    /// Per-probe timeout in seconds (default: 30)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        help_heading = "Core Options"
    )]
    pub timeout: Option<u64>,

    /// Maximum concurrent probes (default: 100)
    #[arg(short = 'c', long, value_name = "COUNT", help_heading = "Core Options")]
    pub concurrency: Option<usize>,

    /// Report 3xx responses verbatim instead of following redirect chains
    #[arg(long, help_heading = "Core Options")]
    pub no_follow: bool,

    // Domain Policy
    /// Base URL whose pages keep their 3xx responses verbatim
    #[arg(long, value_name = "URL", help_heading = "Domain Policy")]
    pub primary_domain: Option<String>,

    /// Base URL probed for not-found primary-domain pages
    #[arg(long, value_name = "URL", help_heading = "Domain Policy")]
    pub alternate_base: Option<String>,

    /// Suggest nginx rewrite rules for not-found primary-domain pages
    #[arg(long, help_heading = "Domain Policy")]
    pub secondary_probe: bool,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable the progress bar
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Network & Security
    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network & Security")]
    pub user_agent: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert parsed CLI arguments into the CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        timeout: cli.timeout,
        concurrency: cli.concurrency,
        no_follow: cli.no_follow,
        primary_domain: cli.primary_domain.clone(),
        alternate_base: cli.alternate_base.clone(),
        secondary_probe: cli.secondary_probe,
        user_agent: cli.user_agent.clone(),
        verbose: cli.verbose,
        quiet: cli.quiet,
        no_progress: cli.no_progress,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
