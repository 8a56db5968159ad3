pub mod cli;
pub mod nav;
pub mod notify;
pub mod pages;
pub mod render;
pub mod state;

pub use nav::Route;
pub use notify::{Notifier, Toast, ToastLevel};
pub use state::{AppState, AuthBackend};
