// Session termination
// Clears the token slot and hands navigation to the presentation layer

use std::sync::Arc;

use crate::auth::TokenStore;

/// Presentation-layer adapter invoked when the session ends.
/// Implementations navigate the user to the login entry point.
pub trait SessionSink: Send + Sync {
    fn redirect_to_login(&self);
}

/// Default sink for embedders without a router wired up
#[derive(Debug, Default)]
pub struct TracingSink;

impl SessionSink for TracingSink {
    fn redirect_to_login(&self) {
        tracing::warn!("session terminated, navigate to /login");
    }
}

/// Forced-logout handler.
///
/// Idempotent: terminating an already-dead session leaves the token slot
/// empty and the client on the login view, same as terminating it once.
#[derive(Clone)]
pub struct Session {
    tokens: TokenStore,
    sink: Arc<dyn SessionSink>,
}

impl Session {
    pub fn new(tokens: TokenStore, sink: Arc<dyn SessionSink>) -> Self {
        Self { tokens, sink }
    }

    /// Clear the token slot and redirect. Fire-and-forget: callers never
    /// branch on a result.
    pub async fn terminate(&self) {
        self.tokens.clear().await;
        self.sink.redirect_to_login();
    }
}
