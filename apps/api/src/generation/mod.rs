// Tailoring flow: keyword extraction feeds the composer, the dispatcher makes
// the single model call. All LLM calls go through llm_client.

pub mod composer;
pub mod dispatcher;
pub mod handlers;
pub mod prompts;
