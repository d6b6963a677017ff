//! Substring stop-sequence matching over text fragments.
//!
//! Fragment boundaries need not align with pattern boundaries: a single
//! decoded fragment can cover several characters of progress, or finish one
//! pattern while starting another. Matching therefore compares the suffix of
//! the accumulated text (withheld fragments plus the newest one) against
//! prefixes of every pattern, longest first, so a full match always wins
//! over a shorter partial match of the same pattern.
//!
//! Comparison is byte-wise over the UTF-8 encoding; matched lengths and
//! pattern lengths are byte counts.

use super::engine::{Overlap, StopError, StopHandler};

/// Suffix-of-text vs prefix-of-pattern overlap over literal stop strings.
pub struct TextOverlap {
    patterns: Vec<String>,
}

impl TextOverlap {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }
}

impl Overlap for TextOverlap {
    type Unit = String;
    type Context = String;

    fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    fn pattern_len(&self, idx: usize) -> usize {
        self.patterns[idx].len()
    }

    fn context(&self, pending: &[String], unit: &String) -> String {
        let mut text = String::with_capacity(
            pending.iter().map(String::len).sum::<usize>() + unit.len(),
        );
        for fragment in pending {
            text.push_str(fragment);
        }
        text.push_str(unit);
        text
    }

    fn matched_len(&self, idx: usize, _prior: usize, ctx: &String) -> usize {
        let pattern = self.patterns[idx].as_bytes();
        let text = ctx.as_bytes();
        let longest = pattern.len().min(text.len());
        // Longest overlap first: a completed pattern must not be mistaken
        // for a shorter restart of the same pattern.
        for k in (1..=longest).rev() {
            if text.ends_with(&pattern[..k]) {
                return k;
            }
        }
        0
    }
}

/// Stop handler over text fragments, emitting `eos_token` on a match.
pub type TextStopHandler = StopHandler<TextOverlap>;

/// Build a [`TextStopHandler`] from literal stop strings.
///
/// An empty `stop_sequences` yields a pass-through handler.
pub fn text_handler(
    stop_sequences: Vec<String>,
    eos_token: impl Into<String>,
) -> Result<TextStopHandler, StopError> {
    StopHandler::new(TextOverlap::new(stop_sequences), eos_token.into())
}
