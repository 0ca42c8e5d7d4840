//! LLM-backed Capabilities
//!
//! Adapters that put a language model behind one of the capability traits in
//! [`crate::tools`].
//!
//! # Supported Providers
//!
//! Enable providers via Cargo features:
//! - `ollama` - Local Ollama server, used as the chunk summarizer (default)
//!
//! # Example
//!
//! ```ignore
//! use delve::llm::ollama::OllamaSummarizer;
//! use delve::tools::ChunkSummarizer;
//!
//! let summarizer = OllamaSummarizer::new("http://localhost:11434", "llama3.2");
//! let note = summarizer.summarize_chunk(&chunk).await?;
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;
