use serde::{Deserialize, Serialize};
use simaru_domain::AuthUser;

/// The client-side session: read once from storage at startup, written on
/// login, cleared on logout. A convenience gate only, never a security
/// boundary.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
    #[serde(default)]
    pub is_logged_in: bool,
}

impl Session {
    pub fn logged_out() -> Self {
        Session::default()
    }

    pub fn logged_in(access_token: String, user: AuthUser) -> Self {
        tracing::debug!(user = %user.email, "session established");
        Session {
            access_token: Some(access_token),
            user: Some(user),
            is_logged_in: true,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in && self.access_token.is_some()
    }

    pub fn clear(&mut self) {
        tracing::debug!("session cleared");
        *self = Session::default();
    }
}

/// Persistence for the session, the analog of browser local storage.
pub trait SessionStore: Send + Sync {
    /// Read the persisted session; a missing or unreadable store means
    /// logged out.
    fn load(&self) -> Session;

    fn save(&self, session: &Session) -> std::io::Result<()>;

    fn clear(&self) -> std::io::Result<()>;
}
