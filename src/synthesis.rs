//! Grounded answer synthesis with numeric citations.
//!
//! The selected sources are numbered from 1 in the prompt. The model is
//! asked to cite them as `[n]`, and those markers are mapped back to the
//! sources afterwards. Out-of-range markers are ignored.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use research_search::EnrichedSource;

use crate::config::DEFAULT_CONTEXT_CHARS;
use crate::llm::{LanguageModel, TokenUsage};

/// Answer returned when there is nothing to ground on.
pub const NO_ANSWER: &str = "I don't know";

/// Answer returned when the model call fails.
pub const GENERATION_FAILED: &str =
    "I encountered an error while generating the answer. Please try again.";

static CITATION_MARKER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\[(\d+)\]").ok());

/// Outcome of a synthesis step.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    /// The answer text, verbatim from the model or a fixed fallback.
    pub answer: String,
    /// Sources referenced by the answer, ascending by marker number.
    pub citations: Vec<EnrichedSource>,
    /// Token usage reported by the model, if any.
    pub usage: Option<TokenUsage>,
}

impl Synthesis {
    fn fallback(answer: &str) -> Self {
        Self {
            answer: answer.to_owned(),
            citations: Vec::new(),
            usage: None,
        }
    }
}

/// Build the grounding prompt for `query` over `sources`.
///
/// Each source contributes its 1-based number, URL and at most
/// `context_chars` characters of content.
pub fn build_prompt(query: &str, sources: &[EnrichedSource], context_chars: usize) -> String {
    let context = sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            let excerpt: String = source.content.chars().take(context_chars).collect();
            format!("SOURCE {}:\nURL: {}\nContent: {excerpt}\n", i + 1, source.link)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Answer the question using only the sources below.\n\n\
         QUESTION: {query}\n\n\
         {context}\n\
         Instructions:\n\
         1. Answer concisely and directly.\n\
         2. If the sources do not contain the answer, reply \"{NO_ANSWER}\".\n\
         3. Cite sources with their numbers in square brackets, e.g. [1] or [2].\n\n\
         ANSWER:"
    )
}

/// Extract cited 1-based marker numbers from `answer`, deduplicated and
/// ascending.
pub fn parse_citation_markers(answer: &str) -> BTreeSet<usize> {
    let Some(re) = CITATION_MARKER.as_ref() else {
        return BTreeSet::new();
    };
    re.captures_iter(answer)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<usize>().ok())
        .collect()
}

/// Map the markers in `answer` to sources. Markers outside `1..=len` are
/// dropped.
pub fn parse_citations(answer: &str, sources: &[EnrichedSource]) -> Vec<EnrichedSource> {
    parse_citation_markers(answer)
        .into_iter()
        .filter_map(|n| n.checked_sub(1).and_then(|i| sources.get(i)).cloned())
        .collect()
}

/// Synthesizes answers from sources with a language model.
pub struct Synthesizer<'a> {
    model: &'a dyn LanguageModel,
    context_chars: usize,
}

impl<'a> Synthesizer<'a> {
    /// Create a synthesizer with the default per-source context size.
    pub fn new(model: &'a dyn LanguageModel) -> Self {
        Self {
            model,
            context_chars: DEFAULT_CONTEXT_CHARS,
        }
    }

    /// Override the per-source context size.
    pub fn with_context_chars(mut self, context_chars: usize) -> Self {
        self.context_chars = context_chars;
        self
    }

    /// Answer `query` from `sources`.
    ///
    /// Makes no model call when `sources` is empty. A model failure is
    /// logged and replaced by [`GENERATION_FAILED`].
    pub async fn synthesize(&self, query: &str, sources: &[EnrichedSource]) -> Synthesis {
        if sources.is_empty() {
            tracing::debug!("no sources to synthesize from");
            return Synthesis::fallback(NO_ANSWER);
        }

        let prompt = build_prompt(query, sources, self.context_chars);
        match self.model.generate(&prompt).await {
            Ok(completion) => {
                let citations = parse_citations(&completion.text, sources);
                tracing::debug!(
                    provider = self.model.name(),
                    cited = citations.len(),
                    "answer generated"
                );
                Synthesis {
                    answer: completion.text,
                    citations,
                    usage: completion.usage,
                }
            }
            Err(e) => {
                tracing::error!(provider = self.model.name(), error = %e, "answer generation failed");
                Synthesis::fallback(GENERATION_FAILED)
            }
        }
    }
}
