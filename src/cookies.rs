//! Cookie storage for the single squashmatrix.com origin.
//!
//! The site hands out several cookies during the login handshake but only
//! three matter for authenticated requests: the ASP.NET transport session id,
//! the group id and the auth cookie. [`CookieStore::auth_header`] builds the
//! `Cookie:` header value from exactly those, ignoring everything else the
//! server may have set.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use log::trace;

use crate::constants::{AUTH_COOKIE, GROUP_ID_COOKIE, SESSION_ID_COOKIE};

/// A single named cookie scoped to the site origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CookieEntry {
    pub name: String,
    pub value: String,
    /// Expiry from the `expires` attribute, when the server sent one.
    pub expires_at: Option<DateTime<Utc>>,
}

impl CookieEntry {
    /// Parses one `Set-Cookie` header value.
    ///
    /// The first `name=value` pair becomes the cookie; of the attributes only
    /// `expires` is kept. Returns `None` for values with no cookie name.
    pub fn parse(header_value: &str) -> Option<CookieEntry> {
        let mut segments = header_value.split(';');

        let (name, value) = split_pair(segments.next()?)?;
        if name.is_empty() {
            return None;
        }

        let expires_at = segments
            .filter_map(split_pair)
            .find(|(attr, _)| attr.eq_ignore_ascii_case("expires"))
            .and_then(|(_, date)| parse_http_date(&date));

        Some(CookieEntry {
            name,
            value,
            expires_at,
        })
    }
}

fn split_pair(segment: &str) -> Option<(String, String)> {
    let segment = segment.trim();
    let (name, value) = segment.split_once('=')?;
    Some((name.trim().to_string(), value.trim().to_string()))
}

/// Parses the RFC-ish date formats the site uses in `expires` attributes.
///
/// ASP.NET emits `Wed, 01-Mar-2017 10:00:00 GMT` style dates; standard
/// RFC 2822 dates are accepted as well.
pub fn parse_http_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    const FORMATS: [&str; 2] = ["%a, %d-%b-%Y %H:%M:%S GMT", "%a, %d-%b-%y %H:%M:%S GMT"];
    FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(text, format)
            .ok()
            .map(|naive| naive.and_utc())
    })
}

/// Named cookies for the site origin, keyed by cookie name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookieStore {
    entries: HashMap<String, CookieEntry>,
}

impl CookieStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        CookieStore::default()
    }

    /// Rebuilds a store from the string produced by [`CookieStore::serialize`].
    ///
    /// Expiry attributes are not part of the serialized form; the session
    /// level expiry timestamp covers that concern.
    pub fn restore(serialized: &str) -> Self {
        let mut store = CookieStore::new();
        for fragment in serialized.split("; ") {
            if let Some(entry) = CookieEntry::parse(fragment) {
                store.set(entry);
            }
        }
        store
    }

    /// Inserts or replaces a cookie by name.
    pub fn set(&mut self, entry: CookieEntry) {
        trace!("store cookie {}", entry.name);
        self.entries.insert(entry.name.clone(), entry);
    }

    /// Parses and stores every `Set-Cookie` value in `headers`.
    pub fn absorb(&mut self, headers: &[String]) {
        for header_value in headers {
            if let Some(entry) = CookieEntry::parse(header_value) {
                self.set(entry);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&CookieEntry> {
        self.entries.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` when the auth cookie is present with a non-empty value.
    pub fn has_auth_cookie(&self) -> bool {
        self.get(AUTH_COOKIE)
            .map(|entry| !entry.value.is_empty())
            .unwrap_or(false)
    }

    /// Earliest `expires` attribute seen on any stored cookie, preferring the
    /// auth cookie's own attribute when it carries one.
    pub fn auth_expiry(&self) -> Option<DateTime<Utc>> {
        self.get(AUTH_COOKIE)
            .and_then(|entry| entry.expires_at)
            .or_else(|| self.entries.values().find_map(|entry| entry.expires_at))
    }

    /// Builds the `Cookie:` header value from exactly the three cookie names
    /// the site consumes. Other stored cookies are ignored even if present.
    ///
    /// Returns `None` when none of the three is stored.
    pub fn auth_header(&self) -> Option<String> {
        let value = [SESSION_ID_COOKIE, GROUP_ID_COOKIE, AUTH_COOKIE]
            .iter()
            .filter_map(|name| self.get(name))
            .map(|entry| format!("{}={}", entry.name, entry.value))
            .collect::<Vec<_>>()
            .join("; ");

        (!value.is_empty()).then_some(value)
    }

    /// Serializes every stored cookie as a `name=value; name=value` string
    /// for the session snapshot.
    pub fn serialize(&self) -> String {
        let mut pairs: Vec<_> = self
            .entries
            .values()
            .map(|entry| format!("{}={}", entry.name, entry.value))
            .collect();
        // Stable output so snapshots compare well in tests and diffs
        pairs.sort();
        pairs.join("; ")
    }
}
