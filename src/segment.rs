//! Splits accumulated model output into a reasoning segment and the visible
//! answer.
//!
//! Reasoning models emit their chain of thought between `<think>` and
//! `</think>` markers ahead of the answer proper. During streaming the
//! accumulated text is re-segmented after every delta, so [`segment`] must be
//! pure and cheap: a single forward scan for the first open tag and the first
//! close tag after it. Re-scanning the whole accumulator per delta is
//! quadratic over the total stream length, which is fine at interactive chat
//! lengths; an incremental scanner would have to preserve these exact results.

/// Marker that opens a reasoning segment.
pub const THINK_OPEN: &str = "<think>";

/// Marker that closes a reasoning segment.
pub const THINK_CLOSE: &str = "</think>";

/// The reasoning/answer pair derived from an accumulated response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segments {
    /// Content strictly between the first open tag and the first close tag
    /// after it, trimmed. Empty when no complete delimited region exists.
    pub reasoning: String,

    /// The visible answer: the input with the delimited region removed and
    /// trimmed, or the input verbatim when no region has closed.
    pub answer: String,
}

impl Segments {
    /// Returns true if a complete reasoning segment was extracted.
    pub fn has_reasoning(&self) -> bool {
        !self.reasoning.is_empty()
    }
}

/// Segments the full accumulated response text.
///
/// The input may be a partial response whose close tag has not arrived yet.
/// Until both tags are present the whole input is returned as the answer,
/// untrimmed and with any dangling open tag left in place; once the close tag
/// appears, reasoning and answer populate in a single step. Only the first
/// delimited region is removed; any later tag pair stays in the answer.
///
/// The function is pure and idempotent, so callers may invoke it on every
/// delta and on the final accumulator and rely on identical results for
/// identical inputs.
pub fn segment(full_text: &str) -> Segments {
    let Some(open) = full_text.find(THINK_OPEN) else {
        return Segments {
            reasoning: String::new(),
            answer: full_text.to_string(),
        };
    };
    let interior = open + THINK_OPEN.len();
    let Some(close) = full_text[interior..].find(THINK_CLOSE) else {
        // Mid-reasoning, or the close tag never arrives: the raw text is the
        // answer, dangling open tag included.
        return Segments {
            reasoning: String::new(),
            answer: full_text.to_string(),
        };
    };
    let close = interior + close;
    let reasoning = full_text[interior..close].trim().to_string();
    let mut answer = String::with_capacity(full_text.len());
    answer.push_str(&full_text[..open]);
    answer.push_str(&full_text[close + THINK_CLOSE.len()..]);
    Segments {
        reasoning,
        answer: answer.trim().to_string(),
    }
}
