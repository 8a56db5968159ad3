pub mod app_config;
pub mod memory;
pub mod remote;
pub mod session_file;

pub use app_config::{Config, DataSource};
pub use memory::MemoryStore;
pub use remote::RemoteStore;
pub use session_file::FileSessionStore;
