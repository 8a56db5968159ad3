//! End-to-end page flows against the in-memory backend: failed writes
//! leave listings untouched, cancelled dialogs change nothing, and login
//! state survives a restart through the session file.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use simaru_app::nav::{self, Route};
use simaru_app::notify::ToastLevel;
use simaru_app::pages::{Confirm, RoomsPage, UsersPage};
use simaru_app::state::{AppState, AuthBackend, MockCredential};
use simaru_core::pipeline::DEFAULT_PAGE_SIZE;
use simaru_core::repository::{RepoError, RoomRepository, UserRepository};
use simaru_core::session::SessionStore;
use simaru_domain::{AuthUser, Room, RoomDraft, RoomStatus, User};
use simaru_store::{FileSessionStore, MemoryStore};

/// A rooms backend whose next `fail_remaining` writes answer like a server
/// returning 500, then delegate to the in-memory store.
struct FlakyRooms {
    inner: MemoryStore,
    fail_remaining: AtomicUsize,
}

impl FlakyRooms {
    fn new(inner: MemoryStore, failures: usize) -> Self {
        FlakyRooms {
            inner,
            fail_remaining: AtomicUsize::new(failures),
        }
    }

    fn maybe_fail(&self) -> Result<(), RepoError> {
        if self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            Err(RepoError::Api {
                status: 500,
                message: "internal server error".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RoomRepository for FlakyRooms {
    async fn list_rooms(&self) -> Result<Vec<Room>, RepoError> {
        self.inner.list_rooms().await
    }

    async fn create_room(&self, draft: &RoomDraft) -> Result<Room, RepoError> {
        self.maybe_fail()?;
        self.inner.create_room(draft).await
    }

    async fn update_room(&self, id: u64, draft: &RoomDraft) -> Result<Room, RepoError> {
        self.maybe_fail()?;
        self.inner.update_room(id, draft).await
    }

    async fn delete_room(&self, id: u64) -> Result<(), RepoError> {
        self.maybe_fail()?;
        self.inner.delete_room(id).await
    }
}

fn room(id: u64, name: &str) -> Room {
    Room::from_draft(
        id,
        &RoomDraft {
            name: name.to_string(),
            description: "test room".to_string(),
            capacity: 10,
            status: RoomStatus::Available,
        },
    )
}

fn valid_draft() -> RoomDraft {
    RoomDraft {
        name: "Room 201".to_string(),
        description: "new".to_string(),
        capacity: 8,
        status: RoomStatus::Available,
    }
}

#[tokio::test]
async fn test_failed_create_then_successful_retry() {
    let inner = MemoryStore::new(vec![room(1, "Room 101")], Vec::new(), Vec::new());
    let repo = Arc::new(FlakyRooms::new(inner, 1));
    let mut page = RoomsPage::new(repo);
    page.load().await;
    let before = page.items().to_vec();

    page.open_new();
    *page.modal.draft_mut().unwrap() = valid_draft();

    // First attempt hits the 500: list unchanged, dialog stays open,
    // exactly one error toast.
    assert!(!page.submit().await);
    assert_eq!(page.items(), before.as_slice());
    assert!(page.modal.is_open());

    let toasts = page.notifier.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Error);

    // The retry succeeds and appends exactly one record.
    assert!(page.submit().await);
    assert!(!page.modal.is_open());
    assert_eq!(page.items().len(), before.len() + 1);
    assert_eq!(page.items().last().unwrap().name, "Room 201");

    let toasts = page.notifier.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Success);
}

#[tokio::test]
async fn test_open_then_cancel_changes_nothing() {
    let store = Arc::new(MemoryStore::new(
        vec![room(1, "Room 101"), room(2, "Room 102")],
        Vec::new(),
        Vec::new(),
    ));
    let mut page = RoomsPage::new(store.clone());
    page.load().await;
    let before = page.items().to_vec();

    page.open_edit(1);
    page.modal.draft_mut().unwrap().name = "Renamed".to_string();
    page.cancel();

    assert_eq!(page.items(), before.as_slice());
    assert_eq!(store.list_rooms().await.unwrap(), before);
    assert!(page.notifier.is_empty());
}

#[tokio::test]
async fn test_delete_last_page_sole_item_reclamps() {
    let users = (1..=6)
        .map(|i| User {
            id: i,
            name: format!("User {i}"),
            email: format!("user{i}@example.com"),
        })
        .collect();
    let store = Arc::new(MemoryStore::new(Vec::new(), Vec::new(), users));
    let mut page = UsersPage::new(store, DEFAULT_PAGE_SIZE);
    page.load().await;

    page.list.page = 2;
    let view = page.view();
    assert_eq!(view.page, 2);
    assert_eq!(view.items.len(), 1);
    let last_id = view.items[0].id;

    assert!(page.delete(last_id, Confirm::Yes).await);
    let view = page.view();
    assert_eq!(view.page, 1);
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.items.len(), 5);
}

fn mock_state(session_store: Arc<dyn SessionStore>) -> AppState {
    let store = Arc::new(MemoryStore::default());
    let session = session_store.load();
    AppState {
        rooms: store.clone(),
        bookings: store.clone(),
        users: store,
        auth: AuthBackend::Mock(vec![MockCredential {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            user: AuthUser {
                id: 1,
                name: "Admin".to_string(),
                email: "admin@example.com".to_string(),
            },
        }]),
        session_store,
        session,
        features: Default::default(),
        page_size: DEFAULT_PAGE_SIZE,
    }
}

#[tokio::test]
async fn test_login_survives_restart_and_gates_navigation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut state = mock_state(Arc::new(FileSessionStore::new(&path)));
    assert_eq!(nav::links(&state.session), vec![Route::Landing, Route::Login]);

    state.login("admin", "admin123").await.unwrap();
    assert!(state.session.is_logged_in());
    assert!(nav::links(&state.session).contains(&Route::Users));

    // A fresh process reads the same session back.
    let restarted = mock_state(Arc::new(FileSessionStore::new(&path)));
    assert!(restarted.session.is_logged_in());
    assert_eq!(
        restarted.session.user.as_ref().map(|u| u.id),
        Some(1)
    );

    let mut state = restarted;
    state.logout().unwrap();
    assert!(!state.session.is_logged_in());

    let after_logout = mock_state(Arc::new(FileSessionStore::new(&path)));
    assert!(!after_logout.session.is_logged_in());
    assert_eq!(
        nav::links(&after_logout.session),
        vec![Route::Landing, Route::Login]
    );
}

#[tokio::test]
async fn test_remote_mode_keeps_users_on_fixtures() {
    use simaru_store::app_config::{
        ApiConfig, Config, DataConfig, DataSource, FeatureFlags, FixturesConfig, ListConfig,
        SessionConfig,
    };

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("users.json"),
        r#"[{ "id": 1, "name": "Budi Santoso", "email": "budi@example.com" }]"#,
    )
    .unwrap();

    let config = Config {
        data: DataConfig {
            source: DataSource::Remote,
        },
        api: ApiConfig {
            base_url: "https://simaru.example.test".to_string(),
            timeout_seconds: 5,
        },
        fixtures: FixturesConfig {
            dir: dir.path().to_string_lossy().into_owned(),
        },
        session: SessionConfig {
            file: dir.path().join("session.json").to_string_lossy().into_owned(),
        },
        features: FeatureFlags::default(),
        list: ListConfig { page_size: 5 },
    };
    let state = AppState::from_config(&config).unwrap();

    // The API has no users endpoint, so user administration reads the
    // fixtures even in remote mode and needs no session.
    let users = state.users.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Budi Santoso");

    // Rooms really are remote: without a token the request is blocked.
    let rooms = state.rooms.list_rooms().await;
    assert!(matches!(rooms, Err(RepoError::Unauthorized(_))));
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = mock_state(Arc::new(FileSessionStore::new(
        dir.path().join("session.json"),
    )));

    let err = state
        .login("admin", "nope")
        .await
        .expect_err("login should fail");
    assert!(matches!(err, RepoError::Unauthorized(_)));
    assert!(!state.session.is_logged_in());
}
