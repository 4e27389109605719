//! LLM module for medassist
//!
//! Model selection and the two hosted providers: Google Gemini and Groq.

mod client;
mod gemini;
mod groq;

pub use client::{build_provider, LlmProvider, ModelId};
pub use gemini::GeminiClient;
pub use groq::GroqClient;
