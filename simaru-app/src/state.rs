use std::sync::Arc;
use std::time::Duration;

use simaru_core::repository::{BookingRepository, RepoError, RoomRepository, UserRepository};
use simaru_core::session::{Session, SessionStore};
use simaru_domain::AuthUser;
use simaru_store::app_config::{Config, DataSource, FeatureFlags};
use simaru_store::{FileSessionStore, MemoryStore, RemoteStore};

/// A credential from the hardcoded mock list used when running against
/// fixtures. The identifier is a short username, not an email address.
#[derive(Debug, Clone)]
pub struct MockCredential {
    pub username: String,
    pub password: String,
    pub user: AuthUser,
}

pub enum AuthBackend {
    Mock(Vec<MockCredential>),
    Remote(Arc<RemoteStore>),
}

pub(crate) fn mock_credentials() -> Vec<MockCredential> {
    vec![
        MockCredential {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            user: AuthUser {
                id: 1,
                name: "Admin".to_string(),
                email: "admin@example.com".to_string(),
            },
        },
        MockCredential {
            username: "user".to_string(),
            password: "user123".to_string(),
            user: AuthUser {
                id: 2,
                name: "User".to_string(),
                email: "user@example.com".to_string(),
            },
        },
    ]
}

/// Everything the pages share: the repository backends, the session read
/// once at startup, and its persistence.
pub struct AppState {
    pub rooms: Arc<dyn RoomRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub users: Arc<dyn UserRepository>,
    pub auth: AuthBackend,
    pub session_store: Arc<dyn SessionStore>,
    pub session: Session,
    pub features: FeatureFlags,
    pub page_size: usize,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let session_store: Arc<dyn SessionStore> =
            Arc::new(FileSessionStore::new(&config.session.file));
        let session = session_store.load();

        let state = match config.data.source {
            DataSource::Memory => {
                let store = Arc::new(MemoryStore::from_fixture_dir(&config.fixtures.dir)?);
                AppState {
                    rooms: store.clone(),
                    bookings: store.clone(),
                    users: store,
                    auth: AuthBackend::Mock(mock_credentials()),
                    session_store,
                    session,
                    features: config.features.clone(),
                    page_size: config.list.page_size,
                }
            }
            DataSource::Remote => {
                let store = Arc::new(RemoteStore::new(
                    &config.api.base_url,
                    Duration::from_secs(config.api.timeout_seconds),
                )?);
                store.set_session(session.clone());
                // The API has no users endpoint; user administration stays
                // on the fixture-backed store in both modes.
                let users = Arc::new(MemoryStore::from_fixture_dir(&config.fixtures.dir)?);
                AppState {
                    rooms: store.clone(),
                    bookings: store.clone(),
                    users,
                    auth: AuthBackend::Remote(store),
                    session_store,
                    session,
                    features: config.features.clone(),
                    page_size: config.list.page_size,
                }
            }
        };
        Ok(state)
    }

    /// Authenticate, persist the session, and adopt it for this process.
    /// The remote backend expects an email; the mock list matches on its
    /// short usernames.
    pub async fn login(&mut self, identifier: &str, password: &str) -> Result<(), RepoError> {
        let session = match &self.auth {
            AuthBackend::Remote(store) => store.login(identifier, password).await?,
            AuthBackend::Mock(credentials) => {
                let matched = credentials
                    .iter()
                    .find(|c| c.username == identifier.trim() && c.password == password)
                    .ok_or_else(|| {
                        RepoError::Unauthorized("invalid username or password".to_string())
                    })?;
                Session::logged_in(format!("mock-token-{}", matched.user.id), matched.user.clone())
            }
        };

        self.session_store
            .save(&session)
            .map_err(|err| RepoError::Transport(format!("failed to persist session: {err}")))?;
        self.session = session;
        tracing::info!(user = %identifier, "logged in");
        Ok(())
    }

    /// Clear the session everywhere: process state, persistence, and the
    /// remote client if one is live.
    pub fn logout(&mut self) -> std::io::Result<()> {
        self.session.clear();
        if let AuthBackend::Remote(store) = &self.auth {
            store.set_session(Session::logged_out());
        }
        self.session_store.clear()
    }
}
