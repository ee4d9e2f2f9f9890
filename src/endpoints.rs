// Endpoint visibility classification

/// Path prefixes reachable without an access token
pub const PUBLIC_PREFIXES: &[&str] = &["/login", "/forgot-password", "/reset-password"];

/// Whether an endpoint requires a bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
}

impl Visibility {
    pub fn is_protected(self) -> bool {
        matches!(self, Visibility::Protected)
    }
}

/// Classify a request path against the public allow-list.
/// Prefix match, so `/login/verify` is as public as `/login`.
pub fn classify(path: &str) -> Visibility {
    if PUBLIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        Visibility::Public
    } else {
        Visibility::Protected
    }
}
