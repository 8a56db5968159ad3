//! Page controllers. Each page follows the same shape: load a collection
//! into local state, derive the visible listing through the pipeline, and
//! mutate through its repository while surfacing outcomes as toasts.

pub mod bookings;
pub mod landing;
pub mod login;
pub mod profile;
pub mod rooms;
pub mod users;

pub use bookings::BookingsPage;
pub use landing::Landing;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use rooms::RoomsPage;
pub use users::UsersPage;

/// Destructive actions require explicit confirmation; `No` is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Yes,
    No,
}

/// Add/edit dialog state:
/// `Closed -> Open -> (submit -> Closed) | (cancel -> Closed)`.
/// Cancelling discards the draft and leaves the collection untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal<D> {
    Closed,
    Open { editing: Option<u64>, draft: D },
}

impl<D: Default + Clone> Modal<D> {
    pub fn open_new(&mut self) {
        *self = Modal::Open {
            editing: None,
            draft: D::default(),
        };
    }

    pub fn open_edit(&mut self, id: u64, draft: D) {
        *self = Modal::Open {
            editing: Some(id),
            draft,
        };
    }

    pub fn cancel(&mut self) {
        *self = Modal::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Modal::Open { .. })
    }

    pub fn editing(&self) -> Option<u64> {
        match self {
            Modal::Open { editing, .. } => *editing,
            Modal::Closed => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            Modal::Open { draft, .. } => Some(draft),
            Modal::Closed => None,
        }
    }

    pub fn draft(&self) -> Option<&D> {
        match self {
            Modal::Open { draft, .. } => Some(draft),
            Modal::Closed => None,
        }
    }
}

impl<D> Default for Modal<D> {
    fn default() -> Self {
        Modal::Closed
    }
}
