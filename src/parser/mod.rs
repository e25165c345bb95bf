//! Pure HTML-to-record mapping for the squashmatrix.com page shapes.
//!
//! One function per page shape: results table, player profile, club rankings,
//! search results and the login-error banner. The functions are side-effect
//! free string-in/record-out mappings so every page shape is testable from a
//! fixture without touching the network.
//!
//! Table rows are read positionally by column index. For the results table
//! the extraction is all-or-nothing: a row where any required field fails to
//! parse is dropped entirely, never emitted as a partial record. Profile,
//! club and search rows instead keep entries and leave an unextractable
//! identifier as `None` — the site's markup guarantees differ per page type
//! and the parsers mirror that.

mod extract;

pub use extract::{
    club_id_from_path, club_name_from_title, match_id_from_path, player_id_from_path, result_date,
    team_id_from_path,
};

use std::sync::LazyLock;

use log::debug;
use scraper::{ElementRef, Html, Node, Selector};

use crate::records::{
    AffiliationRef, ClubProfile, ClubSearchHit, PlayerProfile, PlayerResultRow, PlayerSearchHit,
    RankedPlayer, SearchResults, TeamSearchHit,
};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

static RESULT_ROWS: LazyLock<Selector> = LazyLock::new(|| selector("table#results tbody tr"));
static BODY_CONTENT: LazyLock<Selector> = LazyLock::new(|| selector("div#bodycontent"));
static PROFILE_ROWS: LazyLock<Selector> =
    LazyLock::new(|| selector("div#Summary table#profile tbody tr"));
static MAIN_RANKING_ROWS: LazyLock<Selector> =
    LazyLock::new(|| selector("div#Rankings div.columnmain table.alternaterows tbody tr"));
static SIDE_RANKING_ROWS: LazyLock<Selector> =
    LazyLock::new(|| selector("div#Rankings div.columnside table.alternaterows tbody tr"));
static LOGIN_ERRORS: LazyLock<Selector> =
    LazyLock::new(|| selector("div.validation-summary-errors ul li"));
static TABLE_ROWS: LazyLock<Selector> = LazyLock::new(|| selector("tbody tr"));
static CELLS: LazyLock<Selector> = LazyLock::new(|| selector("td"));
static LINKS: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static LIST_ITEMS: LazyLock<Selector> = LazyLock::new(|| selector("ul li"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));

fn text_of(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn float_of(element: &ElementRef) -> Option<f64> {
    text_of(element).parse().ok()
}

fn link_href<'a>(element: &ElementRef<'a>) -> Option<(ElementRef<'a>, &'a str)> {
    let link = element.select(&LINKS).next()?;
    let href = link.attr("href")?;
    Some((link, href))
}

/// Parses the player results table (`/Home/PlayerResults/<id>`).
///
/// Rows with any unparseable required field are dropped. An empty or
/// unexpected page yields an empty list.
pub fn player_results(body: &str) -> Vec<PlayerResultRow> {
    let document = Html::parse_document(body);
    let rows: Vec<PlayerResultRow> = document
        .select(&RESULT_ROWS)
        .filter_map(|row| result_row(&row))
        .collect();
    debug!("parsed {} result rows", rows.len());
    rows
}

fn result_row(row: &ElementRef) -> Option<PlayerResultRow> {
    let cells: Vec<ElementRef> = row.select(&CELLS).collect();
    // Column layout: date, event, division, round, position, games, points,
    // rating adjustment, rating, opponent, opponent rating, match
    if cells.len() < 12 {
        return None;
    }

    let (opponent_link, opponent_href) = link_href(&cells[9])?;
    let (_, match_href) = link_href(&cells[11])?;

    Some(PlayerResultRow {
        date: extract::result_date(&text_of(&cells[0]))?,
        event: text_of(&cells[1]),
        division: text_of(&cells[2]),
        round: text_of(&cells[3]),
        position: text_of(&cells[4]),
        games: text_of(&cells[5]),
        points: text_of(&cells[6]),
        rating_adjustment: float_of(&cells[7])?,
        rating: float_of(&cells[8])?,
        opponent_name: text_of(&opponent_link),
        opponent_id: extract::player_id_from_path(opponent_href)?,
        opponent_rating: float_of(&cells[10])?,
        match_id: extract::match_id_from_path(match_href)?,
    })
}

/// Parses the player profile summary (`/Home/Player/<id>`).
///
/// Returns `None` when the page carries no recognizable profile, which the
/// caller maps to a not-found outcome. Missing summary rows degrade to an
/// empty rating string and empty club/team lists.
pub fn player_profile(body: &str) -> Option<PlayerProfile> {
    let document = Html::parse_document(body);
    let container = document.select(&BODY_CONTENT).next()?;

    // The player name is a bare text node directly under the container,
    // before the summary markup.
    let name = container
        .children()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(text.trim().to_string()),
            _ => None,
        })
        .find(|text| !text.is_empty())?;

    let rows: Vec<ElementRef> = document.select(&PROFILE_ROWS).collect();
    let rating = rows
        .get(1)
        .and_then(|row| row.select(&CELLS).nth(1))
        .map(|cell| text_of(&cell))
        .unwrap_or_default();

    Some(PlayerProfile {
        name,
        rating,
        clubs: rows
            .get(2)
            .map(|row| affiliations(row, extract::club_id_from_path))
            .unwrap_or_default(),
        teams: rows
            .get(3)
            .map(|row| affiliations(row, extract::team_id_from_path))
            .unwrap_or_default(),
    })
}

fn affiliations(row: &ElementRef, id_from_path: fn(&str) -> Option<u32>) -> Vec<AffiliationRef> {
    let Some(cell) = row.select(&CELLS).nth(1) else {
        return Vec::new();
    };
    cell.select(&LIST_ITEMS)
        .map(|item| AffiliationRef {
            name: text_of(&item),
            id: link_href(&item).and_then(|(_, href)| id_from_path(href)),
        })
        .collect()
}

/// Parses a club page (`/Home/Club/<id>`).
///
/// The club name comes from the `Club - <name>` page title; a title that
/// does not match means the page is not a club page and yields `None`.
pub fn club_profile(body: &str) -> Option<ClubProfile> {
    let document = Html::parse_document(body);
    let title = document.select(&TITLE).next().map(|el| text_of(&el))?;
    let name = extract::club_name_from_title(&title)?;

    Some(ClubProfile {
        name,
        players: ranking_rows(&document, &MAIN_RANKING_ROWS),
        juniors: ranking_rows(&document, &SIDE_RANKING_ROWS),
    })
}

fn ranking_rows(document: &Html, rows: &Selector) -> Vec<RankedPlayer> {
    document
        .select(rows)
        .filter_map(|row| ranked_player(&row))
        .collect()
}

fn ranked_player(row: &ElementRef) -> Option<RankedPlayer> {
    let cells: Vec<ElementRef> = row.select(&CELLS).collect();
    if cells.len() < 3 {
        return None;
    }

    Some(RankedPlayer {
        rank: text_of(&cells[0]).parse().ok()?,
        name: text_of(&cells[1]),
        rating: float_of(&cells[2])?,
        id: link_href(&cells[1]).and_then(|(_, href)| extract::player_id_from_path(href)),
    })
}

/// Parses the search results page (`/Home/Search`).
///
/// The page is one container whose children are scanned sequentially for
/// `h2` section markers (`Players`, `Teams`, `Clubs`); the table two sibling
/// nodes after each marker is parsed when non-empty. Only sections the page
/// actually rendered produce a populated category.
pub fn search_results(body: &str) -> SearchResults {
    let document = Html::parse_document(body);
    let mut results = SearchResults::default();
    let Some(container) = document.select(&BODY_CONTENT).next() else {
        return results;
    };

    let children: Vec<_> = container.children().collect();
    for (index, node) in children.iter().enumerate() {
        let Some(heading) = ElementRef::wrap(*node).filter(|el| el.value().name() == "h2") else {
            continue;
        };
        // The marker and its table are separated by a whitespace text node
        let Some(section) = children.get(index + 2).copied().and_then(ElementRef::wrap) else {
            continue;
        };
        if section.children().next().is_none() {
            continue;
        }

        match text_of(&heading).as_str() {
            "Players" => results.players = Some(player_hits(&section)),
            "Teams" => results.teams = Some(team_hits(&section)),
            "Clubs" => results.clubs = Some(club_hits(&section)),
            other => debug!("unrecognized search section: {}", other),
        }
    }

    results
}

fn player_hits(section: &ElementRef) -> Vec<PlayerSearchHit> {
    section
        .select(&TABLE_ROWS)
        .filter_map(|row| {
            let cells: Vec<ElementRef> = row.select(&CELLS).collect();
            if cells.len() < 2 {
                return None;
            }
            Some(PlayerSearchHit {
                name: text_of(&cells[0]),
                club_name: text_of(&cells[1]),
                id: link_href(&cells[0]).and_then(|(_, href)| extract::player_id_from_path(href)),
                rating: cells.get(2).and_then(float_of),
            })
        })
        .collect()
}

fn team_hits(section: &ElementRef) -> Vec<TeamSearchHit> {
    section
        .select(&TABLE_ROWS)
        .filter_map(|row| {
            let cells: Vec<ElementRef> = row.select(&CELLS).collect();
            if cells.len() < 3 {
                return None;
            }
            Some(TeamSearchHit {
                name: text_of(&cells[0]),
                division_name: text_of(&cells[1]),
                event_name: text_of(&cells[2]),
                id: link_href(&cells[0]).and_then(|(_, href)| extract::team_id_from_path(href)),
            })
        })
        .collect()
}

fn club_hits(section: &ElementRef) -> Vec<ClubSearchHit> {
    section
        .select(&TABLE_ROWS)
        .filter_map(|row| {
            let cells: Vec<ElementRef> = row.select(&CELLS).collect();
            if cells.len() < 2 {
                return None;
            }
            Some(ClubSearchHit {
                name: text_of(&cells[0]),
                state: text_of(&cells[1]),
                id: link_href(&cells[0]).and_then(|(_, href)| extract::club_id_from_path(href)),
            })
        })
        .collect()
}

/// Extracts the ordered validation messages from the login-error banner.
///
/// Returns an empty list when the page carries no error container.
pub fn log_on_errors(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);
    document
        .select(&LOGIN_ERRORS)
        .map(|item| text_of(&item))
        .collect()
}
