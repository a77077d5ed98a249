//! Prompt → model → parser pipelines for chainserve.
//!
//! - [`prompt`] — Prompt assemblers and their input types
//! - [`StrOutputParser`] — Extracts plain text from a model response
//! - [`Pipeline`] — Assembler, model and parser composed into one callable
//! - [`Runnable`] — Type-erased pipeline taking JSON input, used by the HTTP layer
//! - [`presets`] — The four pipelines the server exposes
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chainserve_chain::{presets, prompt::TopicInput};
//! use chainserve_llm::OllamaClient;
//!
//! let model = Arc::new(OllamaClient::new("llama3:8b", "http://localhost:11434"));
//! let chain = presets::topic_chain(model);
//! let text = chain.invoke(TopicInput { topic: "Rust".into() }).await?;
//! ```

mod parser;
mod pipeline;
pub mod presets;
pub mod prompt;
mod schema;

pub use parser::StrOutputParser;
pub use pipeline::{Pipeline, Runnable};
pub use schema::InputSchema;
