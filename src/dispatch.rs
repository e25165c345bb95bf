//! Single-request execution and outcome classification.
//!
//! [`HttpDispatcher`] executes one GET or form POST against the site origin,
//! attaches the session headers, and classifies the raw outcome. The
//! [`Dispatch`] trait abstracts it for testing with mocks, the same way the
//! rest of the crate never talks to reqwest directly.
//!
//! Redirects are never followed: the login handshake reads the `Location`
//! header of the redirect response to resolve the player id.

use log::{debug, warn};
use mockall::automock;
use reqwest::header::{COOKIE, HOST, LOCATION, SET_COOKIE, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::{Proxy, Url};

use crate::constants::{FORBIDDEN_MARKER, RATE_LIMITED_MARKER};
use crate::errors::Error;

/// HTTP method of a page request. The site only ever needs these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// How POST form fields are encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormEncoding {
    /// `multipart/form-data`, what the site's own login form submits.
    #[default]
    Multipart,
    /// `application/x-www-form-urlencoded`.
    UrlEncoded,
}

/// One outbound request, relative to the configured origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub form: Vec<(String, String)>,
    /// Pre-built `Cookie:` header value, when the session has cookies.
    pub cookie: Option<String>,
}

impl PageRequest {
    pub fn get(path: impl Into<String>) -> Self {
        PageRequest {
            method: Method::Get,
            path: path.into(),
            query: None,
            form: Vec::new(),
            cookie: None,
        }
    }

    pub fn get_with_query(path: impl Into<String>, query: impl Into<String>) -> Self {
        PageRequest {
            query: Some(query.into()),
            ..PageRequest::get(path)
        }
    }

    pub fn post(path: impl Into<String>, form: Vec<(String, String)>) -> Self {
        PageRequest {
            method: Method::Post,
            path: path.into(),
            query: None,
            form,
            cookie: None,
        }
    }
}

/// Raw response handed back to the caller after successful classification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    /// Every `Set-Cookie` header value, in response order.
    pub set_cookie: Vec<String>,
    /// `Location` header of a redirect response.
    pub location: Option<String>,
    pub body: String,
}

/// Executes one page request against the site.
///
/// Mocked in session and client tests; [`HttpDispatcher`] is the production
/// implementation.
#[automock]
pub trait Dispatch {
    /// Executes the request and classifies the outcome.
    ///
    /// Success means a 2xx or redirect status; everything else maps onto the
    /// error taxonomy via [`classify`].
    async fn execute(&self, request: PageRequest) -> Result<RawResponse, Error>;
}

/// Classifies a raw HTTP outcome into success or an [`Error`] kind.
///
/// The origin overloads HTTP 409 for at least two distinct causes that are
/// distinguishable only by message text, so conflict bodies are sniffed for
/// the known markers. Callers must not assume 409 means one specific thing.
pub fn classify(response: RawResponse) -> Result<RawResponse, Error> {
    match response.status {
        200..=399 => Ok(response),
        409 if response.body.contains(FORBIDDEN_MARKER) => {
            Err(Error::Forbidden(response.body))
        }
        409 if response.body.contains(RATE_LIMITED_MARKER) => {
            Err(Error::RateLimited(response.body))
        }
        status => Err(Error::Unknown {
            status,
            body: response.body,
        }),
    }
}

/// Dispatcher backed by a reqwest client.
pub struct HttpDispatcher {
    client: reqwest::Client,
    base_url: Url,
    /// `Host` header value, derived from the base URL.
    host: String,
    user_agent: String,
    encoding: FormEncoding,
}

impl HttpDispatcher {
    /// Builds the dispatcher for one origin.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Origin all paths are resolved against.
    /// * `user_agent` - Externally provided `User-Agent` string.
    /// * `encoding` - POST form encoding.
    /// * `proxy` - Optional proxy address and port, passed through to reqwest.
    pub fn new(
        base_url: &str,
        user_agent: &str,
        encoding: FormEncoding,
        proxy: Option<(&str, u16)>,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::InvalidOptions(format!("invalid base url: {}", e)))?;
        let host = base_url
            .host_str()
            .ok_or_else(|| Error::InvalidOptions("base url has no host".to_string()))?
            .to_string();

        // The overall operation deadline lives in the client; the transport
        // itself stays unbounded so a nested re-authentication cannot split
        // the budget.
        let mut builder = reqwest::Client::builder().redirect(Policy::none());
        if let Some((address, port)) = proxy {
            builder = builder.proxy(Proxy::all(format!("http://{}:{}", address, port))?);
        }
        let client = builder.build()?;

        Ok(HttpDispatcher {
            client,
            base_url,
            host,
            user_agent: user_agent.to_string(),
            encoding,
        })
    }

    fn url_for(&self, request: &PageRequest) -> Result<Url, Error> {
        let mut url = self
            .base_url
            .join(&request.path)
            .map_err(|e| Error::InvalidOptions(format!("invalid request path: {}", e)))?;
        url.set_query(request.query.as_deref());
        Ok(url)
    }
}

impl Dispatch for HttpDispatcher {
    async fn execute(&self, request: PageRequest) -> Result<RawResponse, Error> {
        let url = self.url_for(&request)?;
        debug!("{:?} {}", request.method, url);

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => {
                let builder = self.client.post(url);
                match self.encoding {
                    FormEncoding::Multipart => {
                        let mut form = reqwest::multipart::Form::new();
                        for (name, value) in request.form {
                            form = form.text(name, value);
                        }
                        builder.multipart(form)
                    }
                    FormEncoding::UrlEncoded => builder.form(&request.form),
                }
            }
        };

        builder = builder
            .header(USER_AGENT, &self.user_agent)
            .header(HOST, &self.host);
        if let Some(cookie) = &request.cookie {
            builder = builder.header(COOKIE, cookie);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let set_cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok().map(str::to_string))
            .collect();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        let raw = RawResponse {
            status,
            set_cookie,
            location,
            body,
        };
        classify(raw).inspect_err(|error| warn!("request failed: {}", error))
    }
}
