// Field Optimizer — plain-language rewriting of recruitment listing fields.
// All LLM calls go through llm_client; no direct OpenAI calls here.

pub mod fields;
pub mod handlers;
pub mod prompts;
pub mod rewrite;
