//! linkstat probes the live HTTP status of every URL listed in a CSV and
//! writes the augmented table back out.
//!
//! The probing pipeline is one configurable path: probe, classify
//! (trailing-slash self-redirects demote to 404), and optionally chase an
//! alternate mirror for not-found primary-domain pages. Concurrency is
//! capped by a worker pool; per-URL network failures mark only their own
//! row with the error sentinel.

pub mod checker;
pub mod classify;
pub mod cli;
pub mod config;
pub mod csv_io;
pub mod error;
pub mod logging;
pub mod prober;
pub mod progress;
pub mod record;
pub mod resolver;

pub use checker::Checker;
pub use classify::{Classification, classify};
pub use config::{CliConfig, Config};
pub use error::{LinkstatError, Result};
pub use prober::{FollowPolicy, HttpProber, Probe, ProbeError, ProbeOutcome};
pub use progress::ProgressReporter;
pub use record::{Record, Status};
pub use resolver::RewriteSuggestion;
