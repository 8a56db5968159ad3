//! Fixture-seeded in-memory repositories. Mutations apply to the current
//! process only and are discarded when it exits, matching the local-only
//! page variants.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use simaru_core::repository::{BookingRepository, RepoError, RoomRepository, UserRepository};
use simaru_domain::{Booking, BookingDraft, Room, RoomDraft, User, UserDraft, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse fixture: {0}")]
    Parse(#[from] serde_json::Error),
}

/// In-memory collections behind mutexes. Locks are held only for the
/// duration of a synchronous splice, never across an await.
#[derive(Default)]
pub struct MemoryStore {
    rooms: Mutex<Vec<Room>>,
    bookings: Mutex<Vec<Booking>>,
    users: Mutex<Vec<User>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Ids are assigned as `max(existing) + 1`; gaps left by deletes are not
/// reused.
fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max + 1)
}

fn read_fixture<T: serde::de::DeserializeOwned>(
    dir: &Path,
    file: &str,
) -> Result<Vec<T>, FixtureError> {
    let path = dir.join(file);
    if !path.exists() {
        tracing::warn!(fixture = file, "fixture file missing, starting empty");
        return Ok(Vec::new());
    }
    let raw = std::fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&raw)?)
}

impl MemoryStore {
    pub fn new(rooms: Vec<Room>, bookings: Vec<Booking>, users: Vec<User>) -> Self {
        MemoryStore {
            rooms: Mutex::new(rooms),
            bookings: Mutex::new(bookings),
            users: Mutex::new(users),
        }
    }

    /// Seed from the static JSON fixtures (`rooms.json`, `bookings.json`,
    /// `users.json`). A missing file leaves that collection empty.
    pub fn from_fixture_dir(dir: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let dir = dir.as_ref();
        let rooms: Vec<Room> = read_fixture(dir, "rooms.json")?;
        let bookings: Vec<Booking> = read_fixture(dir, "bookings.json")?;
        let users: Vec<User> = read_fixture(dir, "users.json")?;
        tracing::info!(
            rooms = rooms.len(),
            bookings = bookings.len(),
            users = users.len(),
            "seeded memory store from {}",
            dir.display()
        );
        Ok(MemoryStore::new(rooms, bookings, users))
    }
}

#[async_trait]
impl RoomRepository for MemoryStore {
    async fn list_rooms(&self) -> Result<Vec<Room>, RepoError> {
        Ok(lock(&self.rooms).clone())
    }

    async fn create_room(&self, draft: &RoomDraft) -> Result<Room, RepoError> {
        draft.validate()?;
        let mut rooms = lock(&self.rooms);
        let room = Room::from_draft(next_id(rooms.iter().map(|r| r.id)), draft);
        rooms.push(room.clone());
        Ok(room)
    }

    async fn update_room(&self, id: u64, draft: &RoomDraft) -> Result<Room, RepoError> {
        draft.validate()?;
        let mut rooms = lock(&self.rooms);
        let room = rooms
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("room {id}")))?;
        room.apply_draft(draft);
        Ok(room.clone())
    }

    async fn delete_room(&self, id: u64) -> Result<(), RepoError> {
        let mut rooms = lock(&self.rooms);
        let before = rooms.len();
        rooms.retain(|r| r.id != id);
        if rooms.len() == before {
            return Err(RepoError::NotFound(format!("room {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn list_bookings(&self) -> Result<Vec<Booking>, RepoError> {
        Ok(lock(&self.bookings).clone())
    }

    async fn create_booking(&self, draft: &BookingDraft) -> Result<Booking, RepoError> {
        draft.validate()?;
        let mut bookings = lock(&self.bookings);
        let id = next_id(bookings.iter().map(|b| b.id));
        // validate() guarantees room and date are set
        let booking = Booking::from_draft(id, draft)
            .ok_or(ValidationError::MissingRoom)?;
        bookings.push(booking.clone());
        Ok(booking)
    }

    async fn update_booking(&self, id: u64, draft: &BookingDraft) -> Result<Booking, RepoError> {
        draft.validate()?;
        let mut bookings = lock(&self.bookings);
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("booking {id}")))?;
        booking.apply_draft(draft);
        Ok(booking.clone())
    }

    async fn delete_booking(&self, id: u64) -> Result<(), RepoError> {
        let mut bookings = lock(&self.bookings);
        let before = bookings.len();
        bookings.retain(|b| b.id != id);
        if bookings.len() == before {
            return Err(RepoError::NotFound(format!("booking {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, RepoError> {
        Ok(lock(&self.users).clone())
    }

    async fn create_user(&self, draft: &UserDraft) -> Result<User, RepoError> {
        draft.validate()?;
        let mut users = lock(&self.users);
        let user = User::from_draft(next_id(users.iter().map(|u| u.id)), draft);
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: u64, draft: &UserDraft) -> Result<User, RepoError> {
        draft.validate()?;
        let mut users = lock(&self.users);
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("user {id}")))?;
        user.apply_draft(draft);
        Ok(user.clone())
    }

    async fn delete_user(&self, id: u64) -> Result<(), RepoError> {
        let mut users = lock(&self.users);
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(RepoError::NotFound(format!("user {id}")));
        }
        Ok(())
    }
}
