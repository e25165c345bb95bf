//! Typed records extracted from squashmatrix.com pages.
//!
//! Each page shape maps to one record type. Optional fields are typed
//! optionals: an identifier the page did not render is `None`, never a
//! silently-missing key. All records serialize with serde so callers can
//! dump them as JSON directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the player results table (`/Home/PlayerResults/<id>`).
///
/// Every field is required: a row with any field the page failed to render
/// or that did not parse is dropped by the parser rather than emitted as a
/// partial record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResultRow {
    /// Event the match was played in.
    pub event: String,
    /// Division within the event.
    pub division: String,
    /// Round label, e.g. `"R3"` or `"Final"`.
    pub round: String,
    /// Position label, e.g. `"1"`.
    pub position: String,
    /// Games score, e.g. `"3-1"`.
    pub games: String,
    /// Points score, e.g. `"33-21"`.
    pub points: String,
    /// Rating change produced by the match.
    pub rating_adjustment: f64,
    /// Player rating after the match.
    pub rating: f64,
    /// Opponent rating at match time.
    pub opponent_rating: f64,
    /// Opponent display name.
    pub opponent_name: String,
    /// Opponent player id, from the opponent profile link.
    pub opponent_id: u32,
    /// Match id, from the match detail link.
    pub match_id: u32,
    /// Calendar date of the match.
    pub date: NaiveDate,
}

impl fmt::Display for PlayerResultRow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} vs {} ({}) {}",
            self.date, self.event, self.opponent_name, self.opponent_id, self.games
        )
    }
}

/// A club or team a player belongs to, as listed on the profile page.
///
/// The id is extracted from the hyperlink path when the markup carries one;
/// an unlinked entry keeps its name with `id: None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffiliationRef {
    pub name: String,
    pub id: Option<u32>,
}

/// Player profile summary (`/Home/Player/<id>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Player display name.
    pub name: String,
    /// Current rating, kept as the page renders it (may carry formatting).
    pub rating: String,
    /// Clubs the player is registered with.
    pub clubs: Vec<AffiliationRef>,
    /// Teams the player appears in.
    pub teams: Vec<AffiliationRef>,
}

/// One entry of a club ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPlayer {
    /// Rank within the club listing.
    pub rank: u32,
    /// Player display name.
    pub name: String,
    /// Player rating.
    pub rating: f64,
    /// Player id when the row links to a profile.
    pub id: Option<u32>,
}

/// Club page record (`/Home/Club/<id>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubProfile {
    /// Club name, from the page title.
    pub name: String,
    /// Main ranking column.
    pub players: Vec<RankedPlayer>,
    /// Junior ranking column.
    pub juniors: Vec<RankedPlayer>,
}

/// Player entry of the search results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSearchHit {
    pub name: String,
    pub club_name: String,
    pub id: Option<u32>,
    pub rating: Option<f64>,
}

/// Team entry of the search results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSearchHit {
    pub name: String,
    pub division_name: String,
    pub event_name: String,
    pub id: Option<u32>,
}

/// Club entry of the search results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubSearchHit {
    pub name: String,
    pub state: String,
    pub id: Option<u32>,
}

/// Bundle returned by the search page (`/Home/Search`).
///
/// A category is `Some` only if the page rendered a non-empty section for
/// it; a search that matched nothing in a category leaves that field `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<PlayerSearchHit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<TeamSearchHit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clubs: Option<Vec<ClubSearchHit>>,
}

impl SearchResults {
    /// Returns `true` when no category produced a section.
    pub fn is_empty(&self) -> bool {
        self.players.is_none() && self.teams.is_none() && self.clubs.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_results_skip_absent_categories() {
        let results = SearchResults {
            players: Some(vec![PlayerSearchHit {
                name: "Cameron Pilley".to_string(),
                club_name: "Yamba".to_string(),
                id: Some(42546),
                rating: Some(340.0),
            }]),
            teams: None,
            clubs: None,
        };

        let json = serde_json::to_string(&results).unwrap();
        assert!(json.contains("players"));
        assert!(!json.contains("teams"));
        assert!(!json.contains("clubs"));
    }

    #[test]
    fn test_search_results_is_empty() {
        assert!(SearchResults::default().is_empty());

        let results = SearchResults {
            clubs: Some(vec![]),
            ..SearchResults::default()
        };
        assert!(!results.is_empty());
    }

    #[test]
    fn test_result_row_display() {
        let row = PlayerResultRow {
            event: "State Open".to_string(),
            division: "Div 1".to_string(),
            round: "R2".to_string(),
            position: "1".to_string(),
            games: "3-0".to_string(),
            points: "33-12".to_string(),
            rating_adjustment: 1.25,
            rating: 210.5,
            opponent_rating: 198.2,
            opponent_name: "J Smith".to_string(),
            opponent_id: 1412,
            match_id: 30,
            date: NaiveDate::from_ymd_opt(2017, 2, 28).unwrap(),
        };

        let display = format!("{}", row);
        assert!(display.contains("State Open"));
        assert!(display.contains("J Smith"));
        assert!(display.contains("3-0"));
    }

    #[test]
    fn test_player_profile_round_trips_through_json() {
        let profile = PlayerProfile {
            name: "Cameron Pilley".to_string(),
            rating: "345.67".to_string(),
            clubs: vec![AffiliationRef {
                name: "Yamba Squash Club".to_string(),
                id: Some(336),
            }],
            teams: vec![AffiliationRef {
                name: "Yamba A".to_string(),
                id: None,
            }],
        };

        let json = serde_json::to_string(&profile).unwrap();
        let back: PlayerProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
