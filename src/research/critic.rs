//! Source credibility scoring.
//!
//! | Source | Score |
//! |--------|-------|
//! | host ends in `.edu` or `.gov` | 0.6 |
//! | URL mentions `wikipedia.org` | 0.3 |
//! | anything else | 0.1 |

const BASELINE_TENTHS: u32 = 1;
const ACADEMIC_TENTHS: u32 = 5;
const ENCYCLOPEDIA_TENTHS: u32 = 2;
const MAX_TENTHS: u32 = 10;

/// Score a summarized source in [0, 1] from its URL alone.
///
/// The summary is accepted for interface stability but does not affect the
/// score. Scores are computed in tenths so results compare exactly
/// (`critique("", "foo.edu/page") == 0.6`).
pub fn critique(_summary: &str, url: &str) -> f64 {
    let host = host_of(url);

    let bonus = if host.ends_with(".edu") || host.ends_with(".gov") {
        ACADEMIC_TENTHS
    } else if url.to_ascii_lowercase().contains("wikipedia.org") {
        ENCYCLOPEDIA_TENTHS
    } else {
        0
    };

    f64::from((bonus + BASELINE_TENTHS).min(MAX_TENTHS)) / 10.0
}

/// Lowercased host of a URL with or without a scheme.
fn host_of(url: &str) -> String {
    let rest = url
        .trim()
        .split_once("://")
        .map_or(url.trim(), |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    let host = host_port.split(':').next().unwrap_or_default();
    host.trim_end_matches('.').to_ascii_lowercase()
}
