//! Rule selection for a download.
//!
//! Two tiers, URL first. The scan is an explicit ordered walk of the rule
//! list; list order is user-controlled and decides ties, so the first enabled
//! match in a tier wins.

use crate::download::Download;
use crate::matcher;
use crate::rules::Rule;

/// The winning rule for one download, with the capture groups the destination
/// template may reference. Ephemeral; built fresh per event.
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    pub rule: &'a Rule,
    /// The string (referrer or URL) that satisfied the rule's URL pattern;
    /// the download URL for file-tier matches.
    pub matched_url: &'a str,
    /// URL-pattern groups first, filename-pattern groups appended.
    pub groups: Vec<String>,
}

/// Picks at most one rule for `download`.
///
/// 1. First enabled rule whose non-empty URL pattern matches referrer or URL
///    is the candidate.
/// 2. A candidate that also declares a file pattern must satisfy it against
///    the bare filename; if it does not, the whole resolution yields `None`.
///    There is no fallback to file-tier rules in that case.
/// 3. Otherwise the candidate wins; groups come from whichever of
///    referrer/URL matched (referrer preferred), plus filename groups when a
///    file pattern was present.
/// 4. With no URL-tier match at all, the first enabled rule with an empty URL
///    pattern and a matching file pattern wins on filename groups alone.
pub fn resolve<'a>(rules: &'a [Rule], download: &'a Download) -> Option<MatchResult<'a>> {
    let filename = download.bare_filename();

    let url_candidate = rules
        .iter()
        .find(|r| r.enabled && r.has_url_pattern() && matcher::match_url(r, download));

    if let Some(rule) = url_candidate {
        // Any non-empty file pattern on the candidate is a declared
        // constraint, even a whitespace-only one that can never match; it
        // must be satisfied, not skipped.
        let declares_file_pattern = !rule.file_pattern.is_empty();
        if declares_file_pattern && !matcher::match_file(rule, filename) {
            // The URL rule constrains the filename and the constraint failed.
            // The download stays untouched; looser file-only rules do not get
            // a shot at it.
            tracing::debug!(
                rule = %rule.id,
                filename,
                "url rule matched but its file pattern did not; leaving download alone"
            );
            return None;
        }

        let matched_url = matcher::matched_url(&rule.pattern, download);
        let mut groups = matcher::extract_groups(&rule.pattern, matched_url);
        if declares_file_pattern {
            groups.extend(matcher::extract_groups(&rule.file_pattern, filename));
        }
        return Some(MatchResult {
            rule,
            matched_url,
            groups,
        });
    }

    rules
        .iter()
        .find(|r| {
            r.enabled
                && !r.has_url_pattern()
                && r.has_file_pattern()
                && matcher::match_file(r, filename)
        })
        .map(|rule| MatchResult {
            rule,
            matched_url: download.url.as_str(),
            groups: matcher::extract_groups(&rule.file_pattern, filename),
        })
}
