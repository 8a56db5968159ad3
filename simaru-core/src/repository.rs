use async_trait::async_trait;
use simaru_domain::{Booking, BookingDraft, Room, RoomDraft, User, UserDraft, ValidationError};

/// Failures surfaced by a repository backend.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// No usable session token; the request was never issued.
    #[error("not logged in: {0}")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The API answered with a non-success status and a message body.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never completed (connection, timeout, decode).
    #[error("request failed: {0}")]
    Transport(String),
}

/// Repository trait for room data access
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn list_rooms(&self) -> Result<Vec<Room>, RepoError>;

    async fn create_room(&self, draft: &RoomDraft) -> Result<Room, RepoError>;

    async fn update_room(&self, id: u64, draft: &RoomDraft) -> Result<Room, RepoError>;

    async fn delete_room(&self, id: u64) -> Result<(), RepoError>;
}

/// Repository trait for booking data access
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list_bookings(&self) -> Result<Vec<Booking>, RepoError>;

    async fn create_booking(&self, draft: &BookingDraft) -> Result<Booking, RepoError>;

    async fn update_booking(&self, id: u64, draft: &BookingDraft) -> Result<Booking, RepoError>;

    async fn delete_booking(&self, id: u64) -> Result<(), RepoError>;
}

/// Repository trait for user data access
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, RepoError>;

    async fn create_user(&self, draft: &UserDraft) -> Result<User, RepoError>;

    async fn update_user(&self, id: u64, draft: &UserDraft) -> Result<User, RepoError>;

    async fn delete_user(&self, id: u64) -> Result<(), RepoError>;
}
