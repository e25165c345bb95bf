//! Authenticated session lifecycle for squashmatrix.com.
//!
//! A [`Session`] owns the credentials, the cookie store and the auth expiry
//! timestamp. It decides when re-authentication is required and performs the
//! two-step login handshake: a GET to the site root to obtain the ASP.NET
//! transport session cookie, then a form POST to the login path that yields
//! the auth cookie.
//!
//! Sessions are mutated only by their own methods and owned by a single
//! [`Client`](crate::client::Client). On renewal the cookie store is rebuilt
//! from scratch; stale cookies are never partially reused.

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};

use crate::constants::{
    DEFAULT_EXPIRY_SECS, ERROR_RETRIEVING_AUTH_TOKEN, ERROR_RETRIEVING_SESSION_ID, LOGIN_PATH,
    PASSWORD_FIELD, REMEMBER_ME_FIELD, USER_NAME_FIELD,
};
use crate::cookies::CookieStore;
use crate::dispatch::{Dispatch, PageRequest};
use crate::errors::Error;
use crate::parser;

/// Login credentials: exactly one identifier plus the password.
///
/// The invariant that only one of `player_id`/`email` is set is enforced by
/// [`Client::new`](crate::client::Client); credentials are immutable once the
/// session is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub player_id: Option<u32>,
    pub email: Option<String>,
    pub password: String,
}

impl Credentials {
    /// Credentials identified by player id.
    pub fn with_player_id(player_id: u32, password: &str) -> Self {
        Credentials {
            player_id: Some(player_id),
            email: None,
            password: password.to_string(),
        }
    }

    /// Credentials identified by email address.
    pub fn with_email(email: &str, password: &str) -> Self {
        Credentials {
            player_id: None,
            email: Some(email.to_string()),
            password: password.to_string(),
        }
    }

    /// The `UserName` form value: player id when set, email otherwise.
    fn identifier(&self) -> String {
        self.player_id
            .map(|id| id.to_string())
            .or_else(|| self.email.clone())
            .unwrap_or_default()
    }
}

/// Session state owned by one client instance.
pub struct Session {
    credentials: Option<Credentials>,
    cookies: CookieStore,
    expires_at: Option<DateTime<Utc>>,
    /// Player id learned from the login redirect for email-based logins.
    resolved_player_id: Option<u32>,
    /// Margin before `expires_at` at which the session re-authenticates
    /// proactively rather than risk mid-request expiry. Equals the operation
    /// timeout.
    renewal_window: Duration,
    /// Lifetime assumed when the auth cookie carries no `expires` attribute.
    fallback_expiry: Duration,
}

impl Session {
    /// An anonymous session: usable for unauthenticated access, which the
    /// site rate-limits much sooner and restricts to public pages.
    pub fn anonymous() -> Self {
        Session {
            credentials: None,
            cookies: CookieStore::new(),
            expires_at: None,
            resolved_player_id: None,
            renewal_window: Duration::zero(),
            fallback_expiry: Duration::seconds(DEFAULT_EXPIRY_SECS as i64),
        }
    }

    /// A credentialed session. No network activity happens here; the first
    /// [`Session::ensure_valid`] call performs the handshake.
    pub fn new(credentials: Credentials, renewal_window_secs: u64, fallback_expiry_secs: u64) -> Self {
        Session {
            credentials: Some(credentials),
            cookies: CookieStore::new(),
            expires_at: None,
            resolved_player_id: None,
            renewal_window: Duration::seconds(renewal_window_secs as i64),
            fallback_expiry: Duration::seconds(fallback_expiry_secs as i64),
        }
    }

    /// Rebuilds an already-authenticated session from snapshot parts.
    ///
    /// The cookies are only honored while `expires_at` is in the future;
    /// otherwise the session behaves like a fresh one and re-authenticates
    /// on first use.
    pub fn restore(
        credentials: Option<Credentials>,
        cookies: CookieStore,
        expires_at: Option<DateTime<Utc>>,
        renewal_window_secs: u64,
        fallback_expiry_secs: u64,
    ) -> Self {
        Session {
            credentials,
            cookies,
            expires_at,
            resolved_player_id: None,
            renewal_window: Duration::seconds(renewal_window_secs as i64),
            fallback_expiry: Duration::seconds(fallback_expiry_secs as i64),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.credentials.is_none()
    }

    /// Player id from the credentials, or the one resolved from the login
    /// redirect when the login used an email address.
    pub fn player_id(&self) -> Option<u32> {
        self.credentials
            .as_ref()
            .and_then(|credentials| credentials.player_id)
            .or(self.resolved_player_id)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn cookies(&self) -> &CookieStore {
        &self.cookies
    }

    /// `Cookie:` header value for the current cookies, when any are held.
    pub fn cookie_header(&self) -> Option<String> {
        self.cookies.auth_header()
    }

    /// `true` when a non-empty auth cookie is held and the expiry is in the
    /// future.
    pub fn is_authenticated(&self) -> bool {
        self.cookies.has_auth_cookie()
            && self
                .expires_at
                .map(|expires_at| expires_at > Utc::now())
                .unwrap_or(false)
    }

    fn needs_handshake(&self) -> bool {
        if !self.cookies.has_auth_cookie() {
            return true;
        }
        match self.expires_at {
            Some(expires_at) => Utc::now() + self.renewal_window >= expires_at,
            None => true,
        }
    }

    /// Ensures the session can serve an authenticated request.
    ///
    /// Anonymous sessions are a no-op. Authenticated sessions far from
    /// expiry are a no-op too, so calling this before every operation costs
    /// nothing in the steady state. Otherwise the full login handshake runs
    /// against `dispatcher`.
    pub async fn ensure_valid<D: Dispatch>(&mut self, dispatcher: &D) -> Result<(), Error> {
        if self.credentials.is_none() {
            return Ok(());
        }
        if !self.needs_handshake() {
            debug!("session valid until {:?}, skipping handshake", self.expires_at);
            return Ok(());
        }
        self.authenticate(dispatcher).await
    }

    async fn authenticate<D: Dispatch>(&mut self, dispatcher: &D) -> Result<(), Error> {
        let Some(credentials) = self.credentials.clone() else {
            return Ok(());
        };

        info!("starting login handshake");
        // Invalidate current state first; a failed handshake must not leave
        // a half-authenticated session behind.
        self.cookies = CookieStore::new();
        self.expires_at = None;

        // Step one: the site root hands out the transport session cookie.
        let home = dispatcher.execute(PageRequest::get("/")).await?;
        let mut cookies = CookieStore::new();
        cookies.absorb(&home.set_cookie);
        if cookies.is_empty() {
            warn!("no session cookie in root response");
            return Err(Error::AuthorizationFailed(
                ERROR_RETRIEVING_SESSION_ID.to_string(),
            ));
        }

        // Step two: the login form POST, carrying the accumulated cookies.
        let mut login = PageRequest::post(
            LOGIN_PATH,
            vec![
                (USER_NAME_FIELD.to_string(), credentials.identifier()),
                (PASSWORD_FIELD.to_string(), credentials.password.clone()),
                (REMEMBER_ME_FIELD.to_string(), "true".to_string()),
            ],
        );
        login.cookie = cookies.auth_header();
        let response = dispatcher.execute(login).await?;

        cookies.absorb(&response.set_cookie);

        // An email-based login learns the player id from the redirect target.
        if self.player_id().is_none() {
            if let Some(location) = &response.location {
                self.resolved_player_id = parser::player_id_from_path(location);
                debug!("resolved player id {:?} from redirect", self.resolved_player_id);
            }
        }

        // A rejection re-renders the login page, usually without resending
        // any cookies; the validation banner carries the reason.
        if !cookies.has_auth_cookie() {
            let messages = parser::log_on_errors(&response.body);
            if messages.is_empty() {
                warn!("login response carried no auth cookie and no error banner");
                return Err(Error::AuthorizationFailed(
                    ERROR_RETRIEVING_AUTH_TOKEN.to_string(),
                ));
            }
            warn!("login rejected: {}", messages.join(", "));
            return Err(Error::AuthorizationFailed(messages.join(", ")));
        }

        let expires_at = cookies
            .auth_expiry()
            .unwrap_or_else(|| Utc::now() + self.fallback_expiry);
        self.cookies = cookies;
        self.expires_at = Some(expires_at);
        info!("authenticated, session expires at {}", expires_at);
        Ok(())
    }
}
