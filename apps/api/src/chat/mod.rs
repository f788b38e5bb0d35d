// FRIDAY chat assistant and its session storage.

pub mod assistant;
pub mod handlers;
pub mod prompts;
pub mod session_store;
