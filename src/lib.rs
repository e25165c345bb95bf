//! Credentialed client for [squashmatrix.com](https://www.squashmatrix.com).
//!
//! The site has no API; this crate drives it the way a browser would. A
//! [`Client`] logs in with a player id or email plus password, keeps the
//! ASP.NET session cookies alive across requests, and turns the site's HTML
//! pages into typed records: player profiles, full match-result histories,
//! club rankings and search results.
//!
//! Authenticated requests are allowed far more often than anonymous ones and
//! can reach content the site otherwise forbids. An anonymous client (no
//! credentials in [`ClientOptions`]) works too, within those limits.
//!
//! # Usage
//!
//! ```no_run
//! use squash_matrix::{ClientOptions, SquashMatrixClient};
//!
//! # async fn example() -> Result<(), squash_matrix::Error> {
//! let client_options = ClientOptions {
//!     player_id: Some(42546),
//!     password: Some("secret".to_string()),
//!     user_agent: "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
//!     ..ClientOptions::default()
//! };
//! let mut client = SquashMatrixClient::new(client_options)?;
//!
//! if let Some(profile) = client.player_info(42546).await?.found() {
//!     println!("{}: {}", profile.name, profile.rating);
//! }
//!
//! let results = client.search("pilley", true, false).await?;
//! if let Some(players) = results.found().and_then(|r| r.players) {
//!     for hit in players {
//!         println!("{} ({:?})", hit.name, hit.id);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Sessions
//!
//! The login handshake runs lazily on the first operation and again whenever
//! the auth cookie is close enough to expiry that a request could straddle
//! it. [`Client::snapshot`] captures the authenticated state so a later
//! process can resume with [`Client::from_snapshot`] and skip the handshake
//! entirely while the cookies remain valid.
//!
//! # Concurrency
//!
//! All operations take `&mut self`; a client is a single-caller object with
//! no internal locking, background refresh or retries. Share one across
//! tasks by wrapping it in a `tokio::sync::Mutex`.
//!
//! # Caveat
//!
//! Everything here is screen scraping. A markup change on the site can break
//! the parsers at any time; they degrade by dropping unparseable rows and
//! reporting recognizably absent pages as [`Error::NotFound`].

pub mod client;
pub mod constants;
pub mod cookies;
pub mod dispatch;
pub mod errors;
pub mod parser;
pub mod records;
pub mod session;

pub use client::{Client, ClientOptions, Outcome, SessionSnapshot, SquashMatrixClient};
pub use dispatch::FormEncoding;
pub use errors::Error;
pub use records::{
    AffiliationRef, ClubProfile, ClubSearchHit, PlayerProfile, PlayerResultRow, PlayerSearchHit,
    RankedPlayer, SearchResults, TeamSearchHit,
};
pub use session::Credentials;
