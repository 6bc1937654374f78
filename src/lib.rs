//! Research agent: answers questions from live web sources with citations.
//!
//! A query flows through one sequential pipeline:
//! Search → Fetch → Score → Dedup → Rank → Synthesize
//!
//! # Architecture
//!
//! - **Retrieval and ranking** live in the `research-search` crate: SerpAPI
//!   search, page fetching with bounded text extraction, heuristic quality
//!   scoring, per-domain deduplication and top-k selection
//! - **Synthesis**: [`synthesis`] builds a grounding prompt over the selected
//!   sources and maps `[n]` markers in the model's answer back to sources
//! - **Models**: [`llm`] adapts Gemini and OpenAI-compatible endpoints to a
//!   single [`llm::LanguageModel`] trait
//! - **Orchestration**: [`agent::ResearchAgent`] runs the pipeline, times it
//!   and appends to its [`history::HistoryStore`]

pub mod agent;
pub mod config;
pub mod error;
pub mod history;
pub mod llm;
pub mod synthesis;

pub use agent::{Metrics, QueryOutcome, ResearchAgent, NO_SOURCES_ANSWER};
pub use config::{AgentConfig, LlmConfig, LlmProvider, RankingConfig};
pub use error::{AgentError, Result};
pub use history::{HistoryStore, QueryRecord, ResponseRecord};
pub use llm::{build_model, Completion, LanguageModel, LlmError, TokenUsage};
pub use synthesis::{Synthesis, Synthesizer};
