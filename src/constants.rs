//! Fixed URL layout, cookie names and protocol strings for squashmatrix.com.
//!
//! The site exposes no API, so everything here mirrors its server-rendered
//! page layout and the ASP.NET login form. Paths and cookie names are not
//! expected to change independently of the parsers in [`crate::parser`].

/// Origin used for all requests unless overridden in the client options.
pub const SQUASH_MATRIX_URL: &str = "https://www.squashmatrix.com";

/// Path of the login form POST.
pub const LOGIN_PATH: &str = "/Account/LogOn";

/// Path prefix of a player profile page.
pub const PLAYER_PATH: &str = "/Home/Player";

/// Path prefix of a player results page.
pub const PLAYER_RESULTS_PATH: &str = "/Home/PlayerResults";

/// Path prefix of a club page.
pub const CLUB_PATH: &str = "/Home/Club";

/// Path of the search form POST.
pub const SEARCH_PATH: &str = "/Home/Search";

/// Query string that makes the results page render the full results table.
pub const PLAYER_RESULTS_QUERY: &str = "max=0&X-Requested-With=XMLHttpRequest";

/// ASP.NET transport session cookie.
pub const SESSION_ID_COOKIE: &str = "ASP.NET_SessionId";

/// Group id cookie handed out alongside the session cookie.
pub const GROUP_ID_COOKIE: &str = "GroupId";

/// Auth cookie; a non-empty value signals a successful login.
pub const AUTH_COOKIE: &str = ".ASPXAUTH";

/// Login form field names.
pub const USER_NAME_FIELD: &str = "UserName";
pub const PASSWORD_FIELD: &str = "Password";
pub const REMEMBER_ME_FIELD: &str = "RememberMe";

/// Search form field names.
pub const CRITERIA_FIELD: &str = "Criteria";
pub const SQUASH_ONLY_FIELD: &str = "SquashOnly";
pub const RACQUETBALL_ONLY_FIELD: &str = "RacquetballOnly";

/// The origin answers HTTP 409 for at least two distinct causes, telling them
/// apart only by message text. These are the known body markers.
pub const FORBIDDEN_MARKER: &str = "Forbidden";
pub const RATE_LIMITED_MARKER: &str = "Request made too soon";

/// Handshake failure messages, kept byte-identical to the original site
/// client so operators can grep for them.
pub const ERROR_RETRIEVING_SESSION_ID: &str = "Error retrieving ASP.NET_SessionId";
pub const ERROR_RETRIEVING_AUTH_TOKEN: &str = "Error retrieving .ASPXAUTH_TOKEN";

/// Fallback auth lifetime when the auth cookie carries no `expires` attribute.
/// The site usually grants around 52 hours; two days is the conservative
/// default and can be overridden in the client options.
pub const DEFAULT_EXPIRY_SECS: u64 = 60 * 60 * 24 * 2;
