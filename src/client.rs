//! Client facade composing session, dispatch and parsing.
//!
//! A [`Client`] owns one [`Session`] and one dispatcher and exposes the four
//! public operations: player info, player results, club info and search.
//! Every operation validates its input, ensures the session is valid (which
//! may trigger the login handshake), executes a single request under the
//! operation deadline and pipes the body into the matching parser.
//!
//! # Concurrency
//!
//! Operations take `&mut self`: a client instance is single-caller by
//! contract and the borrow checker enforces it. Wrap the client in a
//! `tokio::sync::Mutex` to share it across tasks; there is no background
//! refresh and no internal retry.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::time;

use crate::constants::{
    CLUB_PATH, CRITERIA_FIELD, DEFAULT_EXPIRY_SECS, PLAYER_PATH, PLAYER_RESULTS_PATH,
    PLAYER_RESULTS_QUERY, RACQUETBALL_ONLY_FIELD, SEARCH_PATH, SQUASH_MATRIX_URL,
    SQUASH_ONLY_FIELD,
};
use crate::cookies::CookieStore;
use crate::dispatch::{Dispatch, FormEncoding, HttpDispatcher, PageRequest};
use crate::errors::Error;
use crate::parser;
use crate::records::{ClubProfile, PlayerProfile, PlayerResultRow, SearchResults};
use crate::session::{Credentials, Session};

/// Result of one public operation.
///
/// Invalid input and suppressed failures are distinct outcomes on purpose:
/// callers can tell a bad argument from a swallowed network failure even
/// when `suppress_errors` is enabled.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The page was fetched and parsed.
    Found(T),
    /// Input validation failed; no request was made.
    SkippedInput,
    /// A classified failure was converted to an absent result because the
    /// client was built with `suppress_errors`.
    Suppressed,
}

impl<T> Outcome<T> {
    /// The parsed value, if any.
    pub fn found(self) -> Option<T> {
        match self {
            Outcome::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::SkippedInput)
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, Outcome::Suppressed)
    }
}

/// Construction options for a [`Client`].
///
/// Supplying neither identifier nor password yields an anonymous client:
/// usable, but rate-limited much sooner by the site and unable to access
/// restricted content.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Player id identifier, mutually exclusive with `email`.
    pub player_id: Option<u32>,
    /// Email identifier, mutually exclusive with `player_id`.
    pub email: Option<String>,
    /// Password, required with either identifier.
    pub password: Option<String>,
    /// Convert every classified failure into [`Outcome::Suppressed`]
    /// instead of surfacing it.
    pub suppress_errors: bool,
    /// Deadline per public operation, covering nested re-authentication.
    /// Also the renewal window of the session.
    pub timeout_secs: u64,
    /// `User-Agent` header value, provided externally.
    pub user_agent: String,
    /// Origin to target; overridable for testing against a local server.
    pub base_url: String,
    /// POST form encoding.
    pub form_encoding: FormEncoding,
    /// Auth lifetime assumed when the login response carries no `expires`
    /// attribute.
    pub fallback_expiry_secs: u64,
    /// Optional proxy address, passed through to the transport.
    pub proxy_addr: Option<String>,
    /// Optional proxy port.
    pub proxy_port: Option<u16>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            player_id: None,
            email: None,
            password: None,
            suppress_errors: false,
            timeout_secs: 60,
            user_agent: concat!("squash-matrix/", env!("CARGO_PKG_VERSION")).to_string(),
            base_url: SQUASH_MATRIX_URL.to_string(),
            form_encoding: FormEncoding::default(),
            fallback_expiry_secs: DEFAULT_EXPIRY_SECS,
            proxy_addr: None,
            proxy_port: None,
        }
    }
}

impl ClientOptions {
    /// Validates the credential invariant and builds the credentials, if any.
    fn credentials(&self) -> Result<Option<Credentials>, Error> {
        match (&self.player_id, &self.email, &self.password) {
            (None, None, None) => Ok(None),
            (Some(_), Some(_), _) => Err(Error::InvalidOptions(
                "supply either a player id or an email, not both".to_string(),
            )),
            (Some(player_id), None, Some(password)) => {
                Ok(Some(Credentials::with_player_id(*player_id, password)))
            }
            (None, Some(email), Some(password)) => {
                Ok(Some(Credentials::with_email(email, password)))
            }
            (None, None, Some(_)) => Err(Error::InvalidOptions(
                "a password requires a player id or an email".to_string(),
            )),
            (_, _, None) => Err(Error::InvalidOptions(
                "credentials require a password".to_string(),
            )),
        }
    }
}

/// Serializable session snapshot.
///
/// Carries everything needed to reconstruct an already-authenticated client
/// without repeating the login handshake, provided the expiry is still in
/// the future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub player_id: Option<u32>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub suppress_errors: bool,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Serialized cookie string, as produced by the cookie store.
    pub cookie: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Client for retrieving player and club information from squashmatrix.com.
///
/// Authenticated clients are allowed considerably more requests per address
/// and can request content the site forbids to anonymous visitors.
///
/// Generic over the dispatcher so tests can substitute a mock; production
/// code uses [`SquashMatrixClient`].
///
/// # Examples
///
/// ```no_run
/// use squash_matrix::{ClientOptions, SquashMatrixClient};
///
/// # async fn example() -> Result<(), squash_matrix::Error> {
/// let client_options = ClientOptions {
///     player_id: Some(42546),
///     password: Some("secret".to_string()),
///     user_agent: "Mozilla/5.0 (provided externally)".to_string(),
///     ..ClientOptions::default()
/// };
/// let mut client = SquashMatrixClient::new(client_options)?;
///
/// if let Some(results) = client.player_results(42546).await?.found() {
///     println!("{} results", results.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Client<D: Dispatch> {
    dispatcher: D,
    session: Session,
    options: ClientOptions,
    timeout: StdDuration,
}

/// Production client backed by the reqwest dispatcher.
pub type SquashMatrixClient = Client<HttpDispatcher>;

impl Client<HttpDispatcher> {
    /// Creates a client against the configured origin.
    ///
    /// No network activity happens here; the first operation on a
    /// credentialed client triggers the login handshake.
    pub fn new(options: ClientOptions) -> Result<Self, Error> {
        let dispatcher = HttpDispatcher::new(
            &options.base_url,
            &options.user_agent,
            options.form_encoding,
            options
                .proxy_addr
                .as_deref()
                .zip(options.proxy_port),
        )?;
        Client::with_dispatcher(options, dispatcher)
    }

    /// Reconstructs a client from a [`SessionSnapshot`].
    ///
    /// Credentials, suppression flag, timeout and user agent come from the
    /// snapshot; transport settings (origin, encoding, proxy) come from
    /// `options`. A snapshot with a future expiry restores the cookies and
    /// serves data operations without re-authenticating; an expired one
    /// falls back to a fresh handshake on first use.
    pub fn from_snapshot(
        snapshot: &SessionSnapshot,
        mut options: ClientOptions,
    ) -> Result<Self, Error> {
        options.player_id = snapshot.player_id;
        options.email = snapshot.email.clone();
        options.password = snapshot.password.clone();
        options.suppress_errors = snapshot.suppress_errors;
        options.timeout_secs = snapshot.timeout_secs;
        options.user_agent = snapshot.user_agent.clone();

        let mut client = Client::new(options)?;

        let still_valid = snapshot
            .expires_at
            .map(|expires_at| expires_at > Utc::now())
            .unwrap_or(false);
        if still_valid && !snapshot.cookie.is_empty() {
            info!("restoring session from snapshot, expires {:?}", snapshot.expires_at);
            client.session = Session::restore(
                client.options.credentials()?,
                CookieStore::restore(&snapshot.cookie),
                snapshot.expires_at,
                client.options.timeout_secs,
                client.options.fallback_expiry_secs,
            );
        }
        Ok(client)
    }
}

impl<D: Dispatch> Client<D> {
    /// Creates a client around an explicit dispatcher implementation.
    pub fn with_dispatcher(options: ClientOptions, dispatcher: D) -> Result<Self, Error> {
        let session = match options.credentials()? {
            Some(credentials) => Session::new(
                credentials,
                options.timeout_secs,
                options.fallback_expiry_secs,
            ),
            None => Session::anonymous(),
        };

        Ok(Client {
            dispatcher,
            session,
            timeout: StdDuration::from_secs(options.timeout_secs),
            options,
        })
    }

    /// Player id the session knows: from the options, or resolved from the
    /// login redirect after an email-based login.
    pub fn player_id(&self) -> Option<u32> {
        self.session.player_id()
    }

    /// Captures the state needed to rebuild this client later without a new
    /// login handshake.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            player_id: self.options.player_id.or(self.session.player_id()),
            email: self.options.email.clone(),
            password: self.options.password.clone(),
            suppress_errors: self.options.suppress_errors,
            timeout_secs: self.options.timeout_secs,
            user_agent: self.options.user_agent.clone(),
            cookie: self.session.cookies().serialize(),
            expires_at: self.session.expires_at(),
        }
    }

    /// Fetches the player profile summary.
    ///
    /// A zero id is invalid input: no request is made and
    /// [`Outcome::SkippedInput`] is returned.
    pub async fn player_info(&mut self, id: u32) -> Result<Outcome<PlayerProfile>, Error> {
        let Some(id) = valid_id(id) else {
            return Ok(Outcome::SkippedInput);
        };
        let request = PageRequest::get(format!("{}/{}", PLAYER_PATH, id));
        self.run(request, |body| {
            parser::player_profile(body).ok_or(Error::NotFound)
        })
        .await
    }

    /// Fetches the full player results table.
    pub async fn player_results(
        &mut self,
        id: u32,
    ) -> Result<Outcome<Vec<PlayerResultRow>>, Error> {
        let Some(id) = valid_id(id) else {
            return Ok(Outcome::SkippedInput);
        };
        let request = PageRequest::get_with_query(
            format!("{}/{}", PLAYER_RESULTS_PATH, id),
            PLAYER_RESULTS_QUERY,
        );
        self.run(request, |body| Ok(parser::player_results(body))).await
    }

    /// Fetches the club page with both ranking columns.
    pub async fn club_info(&mut self, id: u32) -> Result<Outcome<ClubProfile>, Error> {
        let Some(id) = valid_id(id) else {
            return Ok(Outcome::SkippedInput);
        };
        let request = PageRequest::get(format!("{}/{}", CLUB_PATH, id));
        self.run(request, |body| {
            parser::club_profile(body).ok_or(Error::NotFound)
        })
        .await
    }

    /// Runs a site search for players, teams and clubs.
    ///
    /// An empty or whitespace-only query is invalid input and makes no
    /// request.
    pub async fn search(
        &mut self,
        query: &str,
        squash_only: bool,
        racquetball_only: bool,
    ) -> Result<Outcome<SearchResults>, Error> {
        if query.trim().is_empty() {
            debug!("empty search query, skipping request");
            return Ok(Outcome::SkippedInput);
        }
        let request = PageRequest::post(
            SEARCH_PATH,
            vec![
                (CRITERIA_FIELD.to_string(), query.to_string()),
                (SQUASH_ONLY_FIELD.to_string(), squash_only.to_string()),
                (
                    RACQUETBALL_ONLY_FIELD.to_string(),
                    racquetball_only.to_string(),
                ),
            ],
        );
        self.run(request, |body| Ok(parser::search_results(body))).await
    }

    /// Executes one operation under the deadline: ensure the session is
    /// valid, dispatch, parse. The single timeout covers everything
    /// including a nested re-authentication handshake.
    async fn run<T, F>(&mut self, request: PageRequest, parse: F) -> Result<Outcome<T>, Error>
    where
        F: FnOnce(&str) -> Result<T, Error>,
    {
        let deadline = self.timeout;
        let fetched = match time::timeout(deadline, self.fetch(request)).await {
            Ok(result) => result,
            Err(_) => Err(Error::TimedOut),
        };

        match fetched.and_then(|body| parse(&body)) {
            Ok(value) => Ok(Outcome::Found(value)),
            Err(error) => self.absorb(error),
        }
    }

    async fn fetch(&mut self, mut request: PageRequest) -> Result<String, Error> {
        self.session.ensure_valid(&self.dispatcher).await?;
        request.cookie = self.session.cookie_header();
        let response = self.dispatcher.execute(request).await?;
        Ok(response.body)
    }

    fn absorb<T>(&self, error: Error) -> Result<Outcome<T>, Error> {
        if self.options.suppress_errors {
            warn!("suppressing {}", error);
            Ok(Outcome::Suppressed)
        } else {
            Err(error)
        }
    }
}

fn valid_id(id: u32) -> Option<u32> {
    if id == 0 {
        debug!("non-positive id, skipping request");
        None
    } else {
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{MockDispatch, RawResponse};
    use chrono::Duration;

    fn test_options() -> ClientOptions {
        ClientOptions {
            user_agent: "test-agent".to_string(),
            form_encoding: FormEncoding::UrlEncoded,
            ..ClientOptions::default()
        }
    }

    fn authed_options() -> ClientOptions {
        ClientOptions {
            player_id: Some(42546),
            password: Some("secret".to_string()),
            ..test_options()
        }
    }

    /// Dispatcher that never completes within any reasonable deadline.
    struct SlowDispatch;

    impl Dispatch for SlowDispatch {
        async fn execute(&self, _request: PageRequest) -> Result<RawResponse, Error> {
            time::sleep(StdDuration::from_secs(3600)).await;
            Ok(RawResponse::default())
        }
    }

    fn club_page() -> &'static str {
        r#"<html><head><title>Club - Melbourne University</title></head><body>
        <div id="Rankings">
          <div class="columnmain">
            <table class="alternaterows"><tbody>
              <tr><td>1</td><td><a href="/Home/Player/42546">Cameron Pilley</a></td><td>345.67</td></tr>
            </tbody></table>
          </div>
        </div></body></html>"#
    }

    #[test]
    fn test_rejects_both_identifiers() {
        let options = ClientOptions {
            player_id: Some(1),
            email: Some("cam@example.com".to_string()),
            password: Some("pw".to_string()),
            ..test_options()
        };
        assert!(matches!(
            Client::with_dispatcher(options, MockDispatch::new()),
            Err(Error::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_rejects_identifier_without_password() {
        let options = ClientOptions {
            player_id: Some(1),
            ..test_options()
        };
        assert!(matches!(
            Client::with_dispatcher(options, MockDispatch::new()),
            Err(Error::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_rejects_password_without_identifier() {
        let options = ClientOptions {
            password: Some("pw".to_string()),
            ..test_options()
        };
        assert!(matches!(
            Client::with_dispatcher(options, MockDispatch::new()),
            Err(Error::InvalidOptions(_))
        ));
    }

    #[tokio::test]
    async fn test_zero_id_skips_request() {
        // No expectations: any dispatch would fail the test
        let mut client = Client::with_dispatcher(test_options(), MockDispatch::new()).unwrap();

        assert!(client.player_info(0).await.unwrap().is_skipped());
        assert!(client.player_results(0).await.unwrap().is_skipped());
        assert!(client.club_info(0).await.unwrap().is_skipped());
    }

    #[tokio::test]
    async fn test_blank_query_skips_request() {
        let mut client = Client::with_dispatcher(test_options(), MockDispatch::new()).unwrap();

        assert!(client.search("", false, false).await.unwrap().is_skipped());
        assert!(client.search("   ", false, false).await.unwrap().is_skipped());
    }

    #[tokio::test]
    async fn test_anonymous_club_info() {
        let mut mock = MockDispatch::new();
        mock.expect_execute()
            .withf(|request| request.path == "/Home/Club/336" && request.cookie.is_none())
            .times(1)
            .returning(|_| {
                Ok(RawResponse {
                    status: 200,
                    body: club_page().to_string(),
                    ..RawResponse::default()
                })
            });

        let mut client = Client::with_dispatcher(test_options(), mock).unwrap();
        let club = client.club_info(336).await.unwrap().found().unwrap();

        assert_eq!(club.name, "Melbourne University");
        assert_eq!(club.players.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_page_is_not_found() {
        let mut mock = MockDispatch::new();
        mock.expect_execute().times(1).returning(|_| {
            Ok(RawResponse {
                status: 200,
                body: "<html><body>nope</body></html>".to_string(),
                ..RawResponse::default()
            })
        });

        let mut client = Client::with_dispatcher(test_options(), mock).unwrap();
        assert!(matches!(client.club_info(336).await, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn test_classified_error_propagates() {
        let mut mock = MockDispatch::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(Error::RateLimited("Request made too soon".to_string())));

        let mut client = Client::with_dispatcher(test_options(), mock).unwrap();
        assert!(matches!(
            client.player_info(42546).await,
            Err(Error::RateLimited(_))
        ));
    }

    #[tokio::test]
    async fn test_suppress_errors_absorbs_classified_error() {
        let mut mock = MockDispatch::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(Error::Forbidden("Forbidden".to_string())));

        let options = ClientOptions {
            suppress_errors: true,
            ..test_options()
        };
        let mut client = Client::with_dispatcher(options, mock).unwrap();

        let outcome = client.player_info(42546).await.unwrap();
        assert!(outcome.is_suppressed());
    }

    #[tokio::test]
    async fn test_timeout_yields_timed_out() {
        let options = ClientOptions {
            timeout_secs: 0,
            ..test_options()
        };
        let mut client = Client::with_dispatcher(options, SlowDispatch).unwrap();

        assert!(matches!(client.player_info(42546).await, Err(Error::TimedOut)));
    }

    #[tokio::test]
    async fn test_timeout_suppressed_when_configured() {
        let options = ClientOptions {
            timeout_secs: 0,
            suppress_errors: true,
            ..test_options()
        };
        let mut client = Client::with_dispatcher(options, SlowDispatch).unwrap();

        let outcome = client.player_info(42546).await.unwrap();
        assert!(outcome.is_suppressed());
    }

    async fn login_mocks(server: &mut mockito::ServerGuard) -> (mockito::Mock, mockito::Mock) {
        let expires = (Utc::now() + Duration::days(2))
            .format("%a, %d-%b-%Y %H:%M:%S GMT")
            .to_string();
        let home = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("set-cookie", "ASP.NET_SessionId=sid; path=/")
            .create_async()
            .await;
        let login = server
            .mock("POST", "/Account/LogOn")
            .match_header("cookie", "ASP.NET_SessionId=sid")
            .with_status(302)
            .with_header(
                "set-cookie",
                &format!(".ASPXAUTH=token; expires={}; path=/", expires),
            )
            .with_header("location", "/Home/Player/42546")
            .create_async()
            .await;
        (home, login)
    }

    #[tokio::test]
    async fn test_authenticated_flow_end_to_end() {
        let mut server = mockito::Server::new_async().await;
        let (home, login) = login_mocks(&mut server).await;
        let profile = server
            .mock("GET", "/Home/Player/42546")
            .match_header("cookie", "ASP.NET_SessionId=sid; .ASPXAUTH=token")
            .with_status(200)
            .with_body(
                r#"<html><body><div id="bodycontent">
                    Cameron Pilley
                    <div id="Summary"><table id="profile"><tbody>
                      <tr><td>Id</td><td>42546</td></tr>
                      <tr><td>Rating</td><td>345.67</td></tr>
                    </tbody></table></div>
                </div></body></html>"#,
            )
            .create_async()
            .await;

        let options = ClientOptions {
            base_url: server.url(),
            ..authed_options()
        };
        let mut client = SquashMatrixClient::new(options).unwrap();

        let result = client.player_info(42546).await.unwrap().found().unwrap();
        assert_eq!(result.name, "Cameron Pilley");
        assert_eq!(result.rating, "345.67");

        home.assert_async().await;
        login.assert_async().await;
        profile.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_failure_propagates_from_data_operation() {
        let mut server = mockito::Server::new_async().await;
        // Root response without a session cookie breaks the handshake
        server.mock("GET", "/").with_status(200).create_async().await;

        let options = ClientOptions {
            base_url: server.url(),
            ..authed_options()
        };
        let mut client = SquashMatrixClient::new(options).unwrap();

        assert!(matches!(
            client.player_results(42546).await,
            Err(Error::AuthorizationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_login_failure_suppressed_when_configured() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/").with_status(200).create_async().await;

        let options = ClientOptions {
            base_url: server.url(),
            suppress_errors: true,
            ..authed_options()
        };
        let mut client = SquashMatrixClient::new(options).unwrap();

        let outcome = client.player_results(42546).await.unwrap();
        assert!(outcome.is_suppressed());
    }

    #[tokio::test]
    async fn test_snapshot_restores_without_reauthentication() {
        let snapshot = SessionSnapshot {
            player_id: Some(42546),
            email: None,
            password: Some("secret".to_string()),
            suppress_errors: false,
            timeout_secs: 60,
            user_agent: "test-agent".to_string(),
            cookie: ".ASPXAUTH=token; ASP.NET_SessionId=sid".to_string(),
            expires_at: Some(Utc::now() + Duration::days(1)),
        };

        // Round-trip through JSON like a caller persisting it would
        let serialized = serde_json::to_string(&snapshot).unwrap();
        let snapshot: SessionSnapshot = serde_json::from_str(&serialized).unwrap();

        // The server knows only the club page; any login attempt would 501
        let mut server = mockito::Server::new_async().await;
        let club = server
            .mock("GET", "/Home/Club/336")
            .match_header("cookie", "ASP.NET_SessionId=sid; .ASPXAUTH=token")
            .with_status(200)
            .with_body(club_page())
            .create_async()
            .await;

        let options = ClientOptions {
            base_url: server.url(),
            ..test_options()
        };
        let mut client = SquashMatrixClient::from_snapshot(&snapshot, options).unwrap();

        let result = client.club_info(336).await.unwrap().found().unwrap();
        assert_eq!(result.name, "Melbourne University");
        club.assert_async().await;
    }

    #[tokio::test]
    async fn test_expired_snapshot_triggers_fresh_handshake() {
        let mut server = mockito::Server::new_async().await;
        let (home, login) = login_mocks(&mut server).await;
        let club = server
            .mock("GET", "/Home/Club/336")
            .with_status(200)
            .with_body(club_page())
            .create_async()
            .await;

        let snapshot = SessionSnapshot {
            player_id: Some(42546),
            email: None,
            password: Some("secret".to_string()),
            suppress_errors: false,
            timeout_secs: 60,
            user_agent: "test-agent".to_string(),
            cookie: ".ASPXAUTH=stale; ASP.NET_SessionId=stale".to_string(),
            expires_at: Some(Utc::now() - Duration::hours(1)),
        };

        let options = ClientOptions {
            base_url: server.url(),
            ..test_options()
        };
        let mut client = SquashMatrixClient::from_snapshot(&snapshot, options).unwrap();

        client.club_info(336).await.unwrap();
        home.assert_async().await;
        login.assert_async().await;
        club.assert_async().await;
    }

    #[tokio::test]
    async fn test_snapshot_captures_session_state() {
        let client = Client::with_dispatcher(authed_options(), MockDispatch::new()).unwrap();
        let snapshot = client.snapshot();

        assert_eq!(snapshot.player_id, Some(42546));
        assert_eq!(snapshot.password.as_deref(), Some("secret"));
        assert_eq!(snapshot.timeout_secs, 60);
        assert!(snapshot.cookie.is_empty());
        assert!(snapshot.expires_at.is_none());
    }
}
