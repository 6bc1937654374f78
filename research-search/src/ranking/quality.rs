//! Heuristic source quality scoring.
//!
//! Assigns each (URL, content) pair an integer trust score:
//!
//! ```text
//! score = 5
//!       + 2  if the domain contains a reputable marker
//!       - 1  if the domain contains a low-trust marker
//!       + 1  if content is longer than 2000 chars
//!       - 1  if content is shorter than 500 chars
//!       + 1  if content mentions an academic indicator
//! clamped to 1..=10
//! ```
//!
//! Domain markers are matched as raw substrings of the lower-cased
//! network location, not as suffixes: `notgov.com.evil.org` counts as
//! reputable because it contains `.org`.

use super::domain::domain_of;

/// Starting score before any adjustment.
pub const BASELINE_SCORE: i32 = 5;

/// Lowest score a source can receive.
pub const MIN_SCORE: u8 = 1;

/// Highest score a source can receive.
pub const MAX_SCORE: u8 = 10;

/// Domain substrings that earn the reputable bonus.
pub const REPUTABLE_DOMAINS: &[&str] = &[
    ".edu",
    ".gov",
    ".org",
    "wikipedia.org",
    "bbc.com",
    "reuters.com",
    "nytimes.com",
    "nature.com",
    "sciencedirect.com",
    "springer.com",
];

/// Domain substrings that incur the low-trust penalty.
pub const LOW_TRUST_DOMAINS: &[&str] = &["blogspot.com", "wordpress.com", "medium.com", "quora.com"];

/// Words whose presence suggests research-backed content.
pub const ACADEMIC_INDICATORS: &[&str] = &[
    "study",
    "research",
    "data",
    "analysis",
    "experiment",
    "results",
];

/// Content longer than this many characters earns a bonus.
const LONG_CONTENT_CHARS: usize = 2000;

/// Content shorter than this many characters incurs a penalty.
const SHORT_CONTENT_CHARS: usize = 500;

/// The individual adjustments that make up a quality score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// The lower-cased network location the domain rules were applied to.
    pub domain: String,
    /// Whether a reputable marker matched.
    pub reputable: bool,
    /// Whether a low-trust marker matched.
    pub low_trust: bool,
    /// `+1`, `-1` or `0` from content length; `0` when content is absent.
    pub length_adjustment: i32,
    /// Whether an academic indicator appeared in the content.
    pub academic: bool,
}

impl ScoreBreakdown {
    /// Sum of all adjustments before clamping.
    pub fn raw(&self) -> i32 {
        let mut score = BASELINE_SCORE + self.length_adjustment;
        if self.reputable {
            score += 2;
        }
        if self.low_trust {
            score -= 1;
        }
        if self.academic {
            score += 1;
        }
        score
    }

    /// Final clamped score.
    pub fn score(&self) -> u8 {
        clamp_score(self.raw())
    }

    /// One-line human explanation of the score.
    pub fn explain(&self) -> String {
        let mut reasons = Vec::new();
        if self.reputable {
            reasons.push("reputable domain (+2)");
        }
        if self.low_trust {
            reasons.push("user-generated content host (-1)");
        }
        match self.length_adjustment {
            1 => reasons.push("substantial content (+1)"),
            -1 => reasons.push("thin content (-1)"),
            _ => {}
        }
        if self.academic {
            reasons.push("research indicators (+1)");
        }

        let location = if self.domain.is_empty() {
            "an unknown domain"
        } else {
            self.domain.as_str()
        };
        if reasons.is_empty() {
            format!("{location} scored {}/10 at baseline", self.score())
        } else {
            format!("{location} scored {}/10: {}", self.score(), reasons.join(", "))
        }
    }
}

/// Compute the full score breakdown for a source.
pub fn score_breakdown(url: &str, content: Option<&str>) -> ScoreBreakdown {
    let domain = domain_of(url);
    let reputable = REPUTABLE_DOMAINS.iter().any(|marker| domain.contains(marker));
    let low_trust = LOW_TRUST_DOMAINS.iter().any(|marker| domain.contains(marker));

    // An empty page carries no content signal at all.
    let (length_adjustment, academic) = match content.filter(|text| !text.is_empty()) {
        Some(text) => {
            let chars = text.chars().count();
            let length_adjustment = if chars > LONG_CONTENT_CHARS {
                1
            } else if chars < SHORT_CONTENT_CHARS {
                -1
            } else {
                0
            };
            let lowered = text.to_lowercase();
            let academic = ACADEMIC_INDICATORS.iter().any(|word| lowered.contains(word));
            (length_adjustment, academic)
        }
        None => (0, false),
    };

    ScoreBreakdown {
        domain,
        reputable,
        low_trust,
        length_adjustment,
        academic,
    }
}

/// Score a source in `1..=10`.
pub fn score_source(url: &str, content: Option<&str>) -> u8 {
    score_breakdown(url, content).score()
}

/// Clamp a raw score into `MIN_SCORE..=MAX_SCORE`.
pub fn clamp_score(raw: i32) -> u8 {
    // The clamp bounds fit in u8.
    raw.clamp(i32::from(MIN_SCORE), i32::from(MAX_SCORE)) as u8
}
