//! Destination path rendering.
//!
//! Templates carry two token families: `${...}` date tokens and `$1..$N`
//! positional capture tokens. Date tokens are substituted first, from a single
//! snapshot of the clock, then capture tokens; each token is replaced in one
//! pass over the whole string, so a substituted value is never re-expanded. A
//! template ending in a path separator gets the bare filename appended;
//! otherwise the rendered string is the full destination path.

use chrono::{DateTime, Datelike, Local, Timelike};

/// Renders `template` with the current local time.
pub fn render(template: &str, groups: &[String], filename: &str) -> String {
    render_at(template, groups, filename, Local::now())
}

/// Renders `template` at an explicit instant. All date tokens in one call see
/// the same `now`.
pub fn render_at(
    template: &str,
    groups: &[String],
    filename: &str,
    now: DateTime<Local>,
) -> String {
    let mut out = template.to_string();

    for (token, value) in date_tokens(&now) {
        out = out.replace(token, &value);
    }

    // Highest index first so `$1` cannot eat the prefix of `$10`. Tokens with
    // no corresponding group stay literal.
    for index in (1..=groups.len()).rev() {
        out = out.replace(&format!("${index}"), &groups[index - 1]);
    }

    if out.ends_with('/') || out.ends_with('\\') {
        format!("{out}{filename}")
    } else {
        out
    }
}

/// The fixed date token vocabulary. Year/month/day are zero-padded,
/// hour/minute/second/millisecond are not.
fn date_tokens(now: &DateTime<Local>) -> [(&'static str, String); 8] {
    [
        ("${YYYY}", format!("{:04}", now.year())),
        ("${YY}", format!("{:02}", now.year() % 100)),
        ("${MM}", format!("{:02}", now.month())),
        ("${DD}", format!("{:02}", now.day())),
        ("${h}", now.hour().to_string()),
        ("${m}", now.minute().to_string()),
        ("${s}", now.second().to_string()),
        ("${ms}", now.timestamp_subsec_millis().to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn clock() -> DateTime<Local> {
        // 2024-03-05 09:07:04.012 local time.
        Local.with_ymd_and_hms(2024, 3, 5, 9, 7, 4).unwrap()
            + chrono::Duration::milliseconds(12)
    }

    fn groups(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn date_and_group_tokens() {
        let out = render_at("/out/${YYYY}-${MM}/$1/", &groups(&["abc"]), "f.pdf", clock());
        assert_eq!(out, "/out/2024-03/abc/f.pdf");
    }

    #[test]
    fn all_date_tokens() {
        let out = render_at(
            "${YYYY} ${YY} ${MM} ${DD} ${h} ${m} ${s} ${ms}",
            &[],
            "f",
            clock(),
        );
        assert_eq!(out, "2024 24 03 05 9 7 4 12");
    }

    #[test]
    fn missing_groups_stay_literal() {
        assert_eq!(render_at("/out/$1-$2", &[], "f.pdf", clock()), "/out/$1-$2");
        assert_eq!(
            render_at("/out/$1-$2", &groups(&["a"]), "f.pdf", clock()),
            "/out/a-$2"
        );
    }

    #[test]
    fn trailing_separator_appends_filename() {
        assert_eq!(render_at("/dl/music/", &[], "s.mp3", clock()), "/dl/music/s.mp3");
        assert_eq!(render_at("dl\\music\\", &[], "s.mp3", clock()), "dl\\music\\s.mp3");
    }

    #[test]
    fn no_trailing_separator_is_full_path() {
        assert_eq!(
            render_at("/dl/renamed-$1.bin", &groups(&["x"]), "orig.bin", clock()),
            "/dl/renamed-x.bin"
        );
    }

    #[test]
    fn every_occurrence_is_replaced() {
        assert_eq!(
            render_at("$1/${YY}/$1-${YY}", &groups(&["a"]), "f", clock()),
            "a/24/a-24"
        );
    }

    #[test]
    fn tenth_group_not_eaten_by_first() {
        let g = groups(&["one", "2", "3", "4", "5", "6", "7", "8", "9", "ten"]);
        assert_eq!(render_at("$10-$1", &g, "f", clock()), "ten-one");
    }

    #[test]
    fn dollar_zero_is_not_a_token() {
        assert_eq!(render_at("/dl/$0/f", &groups(&["a"]), "f", clock()), "/dl/$0/f");
    }
}
