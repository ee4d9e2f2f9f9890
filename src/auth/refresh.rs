// Token refresh with single-flight coordination

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tokio::sync::Mutex;

use super::store::TokenStore;
use super::types::{RefreshError, RefreshResponse};
use crate::session::Session;

type SharedFlight = Shared<BoxFuture<'static, Result<String, RefreshError>>>;

struct Flight {
    future: SharedFlight,
    id: u64,
}

struct InflightSlot {
    current: Option<Flight>,
    next_id: u64,
}

/// Coordinates token refresh so any number of concurrent 401s produce at
/// most one call to the refresh endpoint.
///
/// The first caller publishes a shared pending flight; later callers attach
/// to it. A caller whose rejected token has already been replaced takes the
/// stored token without any network traffic.
#[derive(Clone)]
pub struct RefreshCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    http: Client,
    refresh_url: String,
    tokens: TokenStore,
    session: Session,
    inflight: Mutex<InflightSlot>,
}

impl RefreshCoordinator {
    pub fn new(http: Client, refresh_url: String, tokens: TokenStore, session: Session) -> Self {
        Self {
            inner: Arc::new(Inner {
                http,
                refresh_url,
                tokens,
                session,
                inflight: Mutex::new(InflightSlot {
                    current: None,
                    next_id: 0,
                }),
            }),
        }
    }

    /// Exchange the ambient refresh credential for a new access token.
    ///
    /// `rejected` is the token the server just refused; it decides whether a
    /// caller can reuse a token somebody else already refreshed.
    pub async fn refresh(&self, rejected: &str) -> Result<String, RefreshError> {
        let (flight, id) = {
            let mut slot = self.inner.inflight.lock().await;

            if let Some(flight) = &slot.current {
                (flight.future.clone(), flight.id)
            } else {
                // Nobody refreshing right now. If the slot holds a token
                // other than the rejected one, another caller finished the
                // exchange while this one was waiting on its 401.
                if let Some(current) = self.inner.tokens.get().await {
                    if current != rejected {
                        return Ok(current);
                    }
                }

                let id = slot.next_id;
                slot.next_id += 1;

                let inner = Arc::clone(&self.inner);
                let future = async move { run_flight(inner).await }.boxed().shared();
                slot.current = Some(Flight {
                    future: future.clone(),
                    id,
                });
                (future, id)
            }
        };

        let result = flight.await;

        // Retire the resolved flight so the next expiry starts a fresh one
        let mut slot = self.inner.inflight.lock().await;
        if slot.current.as_ref().is_some_and(|f| f.id == id) {
            slot.current = None;
        }

        result
    }
}

/// One complete flight: network exchange, then store update on success or
/// store clear plus session termination on failure.
async fn run_flight(inner: Arc<Inner>) -> Result<String, RefreshError> {
    tracing::debug!(url = %inner.refresh_url, "refreshing access token");

    match call_refresh_endpoint(&inner.http, &inner.refresh_url).await {
        Ok(token) => {
            inner.tokens.set(token.clone()).await;
            tracing::debug!("access token refreshed");
            Ok(token)
        }
        Err(err) => {
            tracing::warn!(error = %err, "token refresh failed, terminating session");
            inner.session.terminate().await;
            Err(err)
        }
    }
}

/// Single POST to the refresh endpoint. The cookie jar supplies the refresh
/// credential; the request itself has no body. Never retried.
async fn call_refresh_endpoint(http: &Client, url: &str) -> Result<String, RefreshError> {
    let response = http
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                RefreshError::Timeout
            } else {
                RefreshError::Transport(e.to_string())
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message =
            server_message(&body).unwrap_or_else(|| "Refresh failed".to_string());
        return Err(RefreshError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    let data: RefreshResponse = response
        .json()
        .await
        .map_err(|_| RefreshError::Malformed)?;

    if data.access_token.is_empty() {
        return Err(RefreshError::MissingToken);
    }

    Ok(data.access_token)
}

/// Pull the `message` field out of a JSON error body, if there is one
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
