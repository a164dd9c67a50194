// Curation of constitutional examples: records, the in-memory store, JSONL
// persistence, few-shot prompts, and the teacher-model workflows.
// All LLM calls go through llm_client — nothing here talks to the provider directly.

pub mod handlers;
pub mod jsonl;
pub mod models;
pub mod prompts;
pub mod response_parser;
pub mod store;
pub mod teacher;
