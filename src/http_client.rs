use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{RefreshCoordinator, TokenStore};
use crate::config::Config;
use crate::endpoints;
use crate::error::ApiError;
use crate::session::{Session, SessionSink, TracingSink};

/// Path prefix every call shares under the API root
pub const BASE_PREFIX: &str = "/api/event-admin";

/// Refresh endpoint path under the base prefix
const REFRESH_PATH: &str = "/refresh-token";

/// Caller-supplied request descriptor: method, extra headers, JSON body.
/// Immutable per call: the retry after a refresh reuses it as-is.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn put(body: Value) -> Self {
        Self {
            method: Method::PUT,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    /// Add a header. Caller headers override the fixed content type.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Authenticated request executor for the event-admin API.
///
/// One shared pooled client (cookie jar enabled, bounded connect and request
/// timeouts) serves every call. Protected calls carry a bearer token and get
/// exactly one transparent refresh-and-retry on 401; public calls never
/// touch the token slot.
pub struct EventAdminClient {
    http: Client,
    base_url: String,
    tokens: TokenStore,
    session: Session,
    refresh: RefreshCoordinator,
}

impl EventAdminClient {
    /// Create a client with the default tracing-only session sink
    pub fn new(config: Config) -> anyhow::Result<Self> {
        Self::with_session_sink(config, Arc::new(TracingSink))
    }

    /// Create a client with a presentation-layer navigation adapter
    pub fn with_session_sink(
        config: Config,
        sink: Arc<dyn SessionSink>,
    ) -> anyhow::Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .cookie_store(true)
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = format!("{}{}", config.api_root.trim_end_matches('/'), BASE_PREFIX);
        let tokens = TokenStore::new();
        let session = Session::new(tokens.clone(), sink);
        let refresh = RefreshCoordinator::new(
            http.clone(),
            format!("{base_url}{REFRESH_PATH}"),
            tokens.clone(),
            session.clone(),
        );

        Ok(Self {
            http,
            base_url,
            tokens,
            session,
            refresh,
        })
    }

    /// The token slot. Login flows seed it; only the refresh procedure and
    /// session termination write it afterwards.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Resolved base URL, API root plus the shared prefix
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// End the session by hand, e.g. from a logout action
    pub async fn logout(&self) {
        self.session.terminate().await;
    }

    /// Execute one logical call against `{api_root}/api/event-admin{path}`.
    ///
    /// Protected paths require a resident token and get a single
    /// refresh-and-retry when the server rejects it. The decoded JSON body
    /// is returned for success responses; every other outcome is an
    /// `ApiError` carrying a displayable message.
    pub async fn execute(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let visibility = endpoints::classify(path);

        let mut token = None;
        if visibility.is_protected() {
            token = self.tokens.get().await;
            if token.is_none() {
                tracing::warn!(path, "protected call without an access token");
                self.session.terminate().await;
                return Err(ApiError::NoToken);
            }
        }

        let mut response = self.send(path, &options, token.as_deref()).await?;

        if response.status() == StatusCode::UNAUTHORIZED && visibility.is_protected() {
            tracing::debug!(path, "access token rejected, running refresh");
            let stale = token.as_deref().unwrap_or_default();
            let fresh = self.refresh.refresh(stale).await?;
            token = Some(fresh);
            response = self.send(path, &options, token.as_deref()).await?;
        }

        let status = response.status();

        // Decode regardless of status so server-supplied error messages
        // survive; a decode failure outranks any status-derived error.
        let body: Value = response.json().await.map_err(|_| ApiError::Decode)?;

        if status == StatusCode::UNAUTHORIZED {
            // The one refresh has been spent, or the path never had one:
            // the session is dead either way.
            self.session.terminate().await;
            return Err(ApiError::AuthExhausted);
        }

        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Request failed")
                .to_string();
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    /// Issue one HTTP request: fixed JSON content type, caller headers on
    /// top, bearer token when present. Cookies ride along via the jar.
    async fn send(
        &self,
        path: &str,
        options: &RequestOptions,
        token: Option<&str>,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(options.headers.clone());
        if let Some(token) = token {
            let bearer = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                ApiError::Internal(anyhow::anyhow!("access token not usable in a header: {e}"))
            })?;
            headers.insert(AUTHORIZATION, bearer);
        }

        tracing::debug!(method = %options.method, url = %url, "sending request");

        let mut request = self.http.request(options.method.clone(), &url).headers(headers);
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::warn!(url = %url, "request timed out");
                ApiError::Timeout
            } else if e.is_connect() {
                ApiError::Network(format!("connection failed: {e}"))
            } else {
                ApiError::Network(e.to_string())
            }
        })
    }
}
