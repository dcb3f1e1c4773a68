//! Secondary probe against an alternate mirror for not-found pages.

use crate::prober::{FollowPolicy, Probe, ProbeError};

/// Path prefix the mirror serves relocated pages under.
const MIRROR_PREFIX: &str = "/blog";

/// Outcome of the secondary probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteSuggestion {
    /// The mirror answered; this nginx rewrite-rule line maps the original
    /// path to where the page lives now.
    Rule(String),
    /// The mirror was reachable but does not have the page either. Kept
    /// distinct from "no probe attempted" so the column can carry an
    /// explicit null.
    Unresolvable,
}

/// Probe `<alternate_base>/blog<path>` for a primary-domain URL that
/// classified as not found, and derive a rewrite-rule fragment from the
/// answer.
///
/// A network failure here propagates to the caller, which degrades the
/// whole record to the error sentinel even though the primary probe
/// already produced a status.
pub async fn resolve_alternate(
    prober: &dyn Probe,
    original_url: &str,
    primary_domain: &str,
    alternate_base: &str,
) -> Result<RewriteSuggestion, ProbeError> {
    let path = original_url
        .strip_prefix(primary_domain)
        .unwrap_or(original_url);
    let target = format!("{alternate_base}{MIRROR_PREFIX}{path}");

    let outcome = prober.probe(&target, FollowPolicy::Manual).await?;

    let encoded_path = encode_path(path);
    let suggestion = if outcome.status_code < 300 {
        RewriteSuggestion::Rule(format!(
            "  {encoded_path} {MIRROR_PREFIX}{encoded_path};"
        ))
    } else if (300..400).contains(&outcome.status_code) {
        // The mirror moved the page again; map straight to where the
        // redirect resolved.
        let resolved_path = path_of(&outcome.final_url);
        RewriteSuggestion::Rule(format!("  {encoded_path} {resolved_path};"))
    } else {
        RewriteSuggestion::Unresolvable
    };

    Ok(suggestion)
}

/// Percent-encode each path segment, leaving the separators alone.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Path portion of a URL, falling back to the raw string for values the
/// `url` crate cannot parse.
fn path_of(url: &str) -> String {
    url::Url::parse(url)
        .map(|parsed| parsed.path().to_string())
        .unwrap_or_else(|_| url.to_string())
}
