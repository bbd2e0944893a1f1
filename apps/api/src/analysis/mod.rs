// Profession forecast built from a Gemini structured-output call.
// All model calls go through llm_client, never direct HTTP.

pub mod board;
pub mod client;
pub mod handlers;
pub mod insights;
pub mod models;
pub mod prompts;
pub mod schema;
pub mod validation;
