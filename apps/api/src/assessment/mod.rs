// JD assessment: session seeding, turn exchange, and the HTTP handlers that drive them.
// All model calls go through llm_client::ChatBackend.

pub mod handlers;
pub mod prompts;
pub mod session;
pub mod store;
