pub mod booking;
pub mod category;
pub mod error;
pub mod profile;
pub mod room;
pub mod user;

pub use booking::{Booking, BookingDraft, BookingStatus};
pub use category::Category;
pub use error::ValidationError;
pub use profile::Profile;
pub use room::{Room, RoomDraft, RoomStatus};
pub use user::{AuthUser, User, UserDraft};
