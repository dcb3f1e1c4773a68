//! Pure classification of probe outcomes. No I/O lives here.

/// HTTP 404, the effective status assigned to self-redirects.
pub const NOT_FOUND: u16 = 404;

/// Effective status of a record after redirect normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub effective_status: u16,
    pub redirect_target: Option<String>,
}

/// Classify one probe outcome.
///
/// Non-3xx statuses pass through untouched. For 3xx, the final URL becomes
/// the redirect target unless the redirect only added or removed a trailing
/// slash: servers canonicalizing `/page` to `/page/` carry no routing
/// information, so such self-redirects are demoted to 404 and the target is
/// dropped. Callers exempt primary-domain URLs from the demotion by passing
/// `demote_self_redirect: false`, which reports any 3xx verbatim.
pub fn classify(
    original_url: &str,
    final_url: &str,
    status_code: u16,
    demote_self_redirect: bool,
) -> Classification {
    if !(300..400).contains(&status_code) {
        return Classification {
            effective_status: status_code,
            redirect_target: None,
        };
    }

    if demote_self_redirect
        && strip_trailing_slash(original_url) == strip_trailing_slash(final_url)
    {
        return Classification {
            effective_status: NOT_FOUND,
            redirect_target: None,
        };
    }

    Classification {
        effective_status: status_code,
        redirect_target: Some(final_url.to_string()),
    }
}

fn strip_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}
