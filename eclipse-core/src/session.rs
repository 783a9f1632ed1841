//! Authenticated-user lookup

/// Source of the current user's identifier
pub trait SessionProvider: Send + Sync {
    /// Opaque id of the signed-in user, `None` when signed out
    fn current_user_id(&self) -> Option<String>;
}

/// Session with a fixed (possibly absent) user
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    user_id: Option<String>,
}

impl StaticSession {
    pub fn new(user_id: Option<String>) -> Self {
        Self { user_id }
    }

    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self::new(Some(user_id.into()))
    }
}

impl SessionProvider for StaticSession {
    fn current_user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}
