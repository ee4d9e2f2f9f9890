use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-wide slot for the current access token.
///
/// Absence is a valid state. Expiry is never tracked locally; an expired
/// token is only discovered through a rejected request. Handles are cheap
/// clones sharing one slot, and each write is last-write-wins.
#[derive(Clone, Default)]
pub struct TokenStore {
    slot: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with a token, e.g. right after login
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    pub async fn get(&self) -> Option<String> {
        self.slot.read().await.clone()
    }

    /// Overwrites any previous value
    pub async fn set(&self, token: impl Into<String>) {
        *self.slot.write().await = Some(token.into());
    }

    pub async fn clear(&self) {
        *self.slot.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_clear() {
        let store = TokenStore::new();
        assert_eq!(store.get().await, None);

        store.set("first").await;
        assert_eq!(store.get().await.as_deref(), Some("first"));

        store.set("second").await;
        assert_eq!(store.get().await.as_deref(), Some("second"));

        store.clear().await;
        assert_eq!(store.get().await, None);
    }

    #[tokio::test]
    async fn test_clones_share_the_slot() {
        let store = TokenStore::new();
        let handle = store.clone();

        handle.set("shared").await;
        assert_eq!(store.get().await.as_deref(), Some("shared"));

        store.clear().await;
        assert_eq!(handle.get().await, None);
    }
}
