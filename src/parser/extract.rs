//! Named pattern-extraction functions for squashmatrix.com URLs and titles.
//!
//! The site embeds identifiers in hyperlink paths and entity names in page
//! titles. Each pattern lives here as an independently testable function so
//! a markup change is a one-line fix instead of a hunt through the parsers.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static PLAYER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/Home/Player/(\d+)").expect("player id pattern"));
static TEAM_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/Home/Team/(\d+)").expect("team id pattern"));
static CLUB_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/Home/Club/(\d+)").expect("club id pattern"));
static MATCH_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/Home/Match/(\d+)").expect("match id pattern"));
static CLUB_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Club - (.*)").expect("club title pattern"));

fn id_from(pattern: &Regex, path: &str) -> Option<u32> {
    pattern
        .captures(path)?
        .get(1)
        .and_then(|id| id.as_str().parse().ok())
}

/// `/Home/Player/42546` -> `42546`.
pub fn player_id_from_path(path: &str) -> Option<u32> {
    id_from(&PLAYER_ID, path)
}

/// `/Home/Team/1018` -> `1018`.
pub fn team_id_from_path(path: &str) -> Option<u32> {
    id_from(&TEAM_ID, path)
}

/// `/Home/Club/336` -> `336`.
pub fn club_id_from_path(path: &str) -> Option<u32> {
    id_from(&CLUB_ID, path)
}

/// `/Home/Match/30` -> `30`.
pub fn match_id_from_path(path: &str) -> Option<u32> {
    id_from(&MATCH_ID, path)
}

/// `"Club - Melbourne University"` -> `"Melbourne University"`.
pub fn club_name_from_title(title: &str) -> Option<String> {
    CLUB_TITLE
        .captures(title)?
        .get(1)
        .map(|name| name.as_str().trim().to_string())
}

/// Parses the date column of the results table.
///
/// The site renders day-first dates; ISO dates are accepted for robustness
/// against the XHR rendering of the same table.
pub fn result_date(text: &str) -> Option<NaiveDate> {
    // %y must come first: %Y would swallow the first two digits of a
    // two-digit year and misread "17" as year 0017. %y rejects trailing
    // input, so four-digit dates fall through to %Y.
    const FORMATS: [&str; 4] = ["%d/%m/%y", "%d/%m/%Y", "%Y-%m-%d", "%d %b %Y"];
    let text = text.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}
