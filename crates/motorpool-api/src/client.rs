// Hand-crafted async HTTP client for the Motorpool rental platform API.
//
// Base: configurable, default http://localhost:4000
// Auth: `Authorization: Bearer <token>` on the authenticated verbs

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::envelope::{self, Body};
use crate::error::Error;
use crate::token::TokenStore;
use crate::transport::TransportConfig;

/// Async client for the rental platform API.
///
/// Wraps `reqwest::Client` with relative-path resolution against a
/// configured base, call-time bearer injection from a shared
/// [`TokenStore`], and response-envelope unwrapping. Endpoint groups
/// (auth, cars, rentals, account, admin) are implemented as inherent
/// methods in sibling modules.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: TokenStore,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Create a client with default transport settings.
    ///
    /// The base URL is used verbatim when resolving paths, so pass it
    /// without a trailing slash (e.g. `http://localhost:4000`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        Self::with_transport(base_url, &TransportConfig::default())
    }

    /// Create a client from a `TransportConfig`.
    pub fn with_transport(
        base_url: impl Into<String>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            base_url: base_url.into(),
            token: TokenStore::new(),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages transport).
    pub fn from_reqwest(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            token: TokenStore::new(),
        }
    }

    /// Share an externally owned token slot.
    ///
    /// Lets a session layer hold one [`TokenStore`] across several
    /// clients; all of them see token updates immediately.
    #[must_use]
    pub fn with_token_store(mut self, token: TokenStore) -> Self {
        self.token = token;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token slot used for authenticated requests.
    pub fn token(&self) -> &TokenStore {
        &self.token
    }

    // ── URL resolution ───────────────────────────────────────────────

    /// Resolve a request path against the configured base URL.
    ///
    /// Absolute `http://`/`https://` URLs pass through untouched. A path
    /// with a leading `/` is appended to the base verbatim; anything else
    /// gets a separating `/` inserted. Nothing is validated here: a
    /// malformed result surfaces as a transport error when the request
    /// is sent.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    // ── Request builders ─────────────────────────────────────────────

    /// Start a plain request for callers that need full control over
    /// headers or body. Finish it with [`ApiClient::execute`].
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http.request(method, self.resolve_url(path))
    }

    /// Start an authenticated request.
    ///
    /// Reads the token slot now and sets the `Authorization` header;
    /// everything else is left to the caller. An empty slot still sends
    /// `Bearer ` with no credential.
    pub fn auth_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.request(method, path)
            .header(AUTHORIZATION, self.token.bearer_header())
    }

    /// Send a prepared request and unwrap the response envelope.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, Error> {
        let resp = builder.send().await?;
        read_payload(resp).await
    }

    // ── HTTP verbs (plain) ───────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.resolve_url(path);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        read_payload(resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.resolve_url(path);
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        read_payload(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.resolve_url(path);
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        read_payload(resp).await
    }

    // ── HTTP verbs (authenticated) ───────────────────────────────────

    pub(crate) async fn get_auth<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.resolve_url(path);
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.token.bearer_header())
            .send()
            .await?;
        read_payload(resp).await
    }

    pub(crate) async fn get_auth_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.resolve_url(path);
        debug!("GET {url} params={params:?}");

        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.token.bearer_header())
            .query(params)
            .send()
            .await?;
        read_payload(resp).await
    }

    pub(crate) async fn post_auth<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.resolve_url(path);
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .header(AUTHORIZATION, self.token.bearer_header())
            .json(body)
            .send()
            .await?;
        read_payload(resp).await
    }

    /// POST without a request body (rental lifecycle actions).
    pub(crate) async fn post_auth_empty<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, Error> {
        let url = self.resolve_url(path);
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .header(AUTHORIZATION, self.token.bearer_header())
            .send()
            .await?;
        read_payload(resp).await
    }

    pub(crate) async fn put_auth<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.resolve_url(path);
        debug!("PUT {url}");

        let resp = self
            .http
            .put(url)
            .header(AUTHORIZATION, self.token.bearer_header())
            .json(body)
            .send()
            .await?;
        read_payload(resp).await
    }

    pub(crate) async fn patch_auth<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.resolve_url(path);
        debug!("PATCH {url}");

        let resp = self
            .http
            .patch(url)
            .header(AUTHORIZATION, self.token.bearer_header())
            .json(body)
            .send()
            .await?;
        read_payload(resp).await
    }

    pub(crate) async fn delete_auth(&self, path: &str) -> Result<(), Error> {
        let url = self.resolve_url(path);
        debug!("DELETE {url}");

        let resp = self
            .http
            .delete(url)
            .header(AUTHORIZATION, self.token.bearer_header())
            .send()
            .await?;
        read_empty(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn read_payload<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await?;

    if status.is_success() {
        envelope::unwrap_body(&body)
    } else {
        Err(parse_failure(status, &body))
    }
}

async fn read_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }

    let body = resp.text().await.unwrap_or_default();
    Err(parse_failure(status, &body))
}

/// Turn a non-success response into an error.
///
/// Failure envelopes ride on 4xx/5xx answers, so the body is classified
/// first to keep the platform's message; 401 collapses to
/// [`Error::Authentication`] whatever the body looked like.
fn parse_failure(status: reqwest::StatusCode, raw: &str) -> Error {
    let enveloped = serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|value| match envelope::classify(value) {
            Body::Failure(env) => Some(envelope::failure_error(env, Some(status.as_u16()))),
            Body::Success(_) | Body::Bare(_) => None,
        });

    if status == reqwest::StatusCode::UNAUTHORIZED {
        let message = match enveloped {
            Some(Error::RequestFailed { message, .. }) => message,
            _ => "missing or rejected bearer token".to_owned(),
        };
        return Error::Authentication { message };
    }

    enveloped.unwrap_or_else(|| Error::Http {
        status: status.as_u16(),
        message: if raw.is_empty() {
            status.to_string()
        } else {
            raw.chars().take(200).collect()
        },
    })
}
