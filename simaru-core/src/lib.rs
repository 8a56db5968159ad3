pub mod pipeline;
pub mod repository;
pub mod session;

pub use pipeline::{
    apply, paginate, BookingField, ListState, PageView, RoomField, Searchable, SortDirection,
    SortKey, UserField, DEFAULT_PAGE_SIZE,
};
pub use repository::{BookingRepository, RepoError, RoomRepository, UserRepository};
pub use session::{Session, SessionStore};
