// User profile context: file-backed, loaded fresh per request.

pub mod handlers;
pub mod loader;

pub use loader::{load_context, UserContext};
