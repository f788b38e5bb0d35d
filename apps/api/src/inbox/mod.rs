// Email triage: decode Gmail messages and classify each into to-dos and team updates.

pub mod classifier;
pub mod email;
pub mod prompts;
