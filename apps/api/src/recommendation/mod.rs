// Career recommendations: three concurrent topic generators feeding one synthesis call.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod synthesizer;
pub mod topics;
