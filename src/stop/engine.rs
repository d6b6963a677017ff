//! Shared stop-sequence detection engine.
//!
//! One generic engine drives both the token-id and the text variant. The
//! variants differ only in how far the incoming unit advances each pattern,
//! which is captured by the [`Overlap`] trait: positional equality for token
//! ids, suffix/prefix overlap for text fragments.

use thiserror::Error;

/// Errors from stop-sequence handler construction and stepping.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StopError {
    /// A zero-length stop pattern has no defined matching semantics.
    #[error("stop pattern {index} is empty")]
    EmptyPattern { index: usize },

    /// `process` was called after `finalize` on the same handler.
    #[error("process called after finalize")]
    Finished,
}

/// How far the newest unit advances each configured stop pattern.
///
/// Implementations hold the pattern set and report, per pattern, the new
/// matched length given the prior matched length and the pending buffer.
/// A returned length equal to [`pattern_len`](Overlap::pattern_len) means
/// the pattern just completed.
pub trait Overlap {
    /// The atomic unit consumed per step (a token id or a text fragment).
    type Unit: Clone;

    /// Per-call matching context, built once and shared across patterns.
    type Context;

    /// Number of configured stop patterns. Zero means pass-through mode.
    fn pattern_count(&self) -> usize;

    /// Length of pattern `idx` in match steps.
    fn pattern_len(&self, idx: usize) -> usize;

    /// Build the matching context for one incoming unit.
    fn context(&self, pending: &[Self::Unit], unit: &Self::Unit) -> Self::Context;

    /// New matched length for pattern `idx`, given the prior matched length.
    fn matched_len(&self, idx: usize, prior: usize, ctx: &Self::Context) -> usize;
}

/// Streaming stop-sequence handler.
///
/// Sits between a generator and its consumer: fed one unit per call via
/// [`process`](Self::process), it returns the units that are now safe to
/// release downstream, withholding anything that may still be the start of a
/// stop sequence. When a pattern completes, the matched units are consumed
/// and replaced by a single sentinel. [`finalize`](Self::finalize) releases
/// whatever is still withheld at end-of-stream.
///
/// One handler per generation stream; calls must be serialized.
pub struct StopHandler<O: Overlap> {
    overlap: O,
    /// Per-pattern matched lengths. Always strictly below the pattern length
    /// between calls; completion is resolved into a stop event immediately.
    trackers: Vec<usize>,
    /// Units withheld because they may still complete a pattern. Shared
    /// across all patterns, not owned per pattern.
    pending: Vec<O::Unit>,
    sentinel: O::Unit,
    finished: bool,
}

impl<O: Overlap> StopHandler<O> {
    /// Create a handler for the given overlap function and sentinel.
    ///
    /// With zero configured patterns the handler is in pass-through mode and
    /// never buffers. Any empty pattern is rejected.
    pub fn new(overlap: O, sentinel: O::Unit) -> Result<Self, StopError> {
        for index in 0..overlap.pattern_count() {
            if overlap.pattern_len(index) == 0 {
                return Err(StopError::EmptyPattern { index });
            }
        }
        let trackers = vec![0; overlap.pattern_count()];
        Ok(Self {
            overlap,
            trackers,
            pending: Vec::new(),
            sentinel,
            finished: false,
        })
    }

    /// True when no stop patterns are configured.
    pub fn is_passthrough(&self) -> bool {
        self.trackers.is_empty()
    }

    /// Number of units currently withheld from the consumer.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Feed one unit; returns the units released by this step, oldest first.
    ///
    /// A completed stop sequence releases exactly one sentinel in place of
    /// the matched content. Returns [`StopError::Finished`] if the handler
    /// was already finalized.
    pub fn process(&mut self, unit: O::Unit) -> Result<Vec<O::Unit>, StopError> {
        if self.finished {
            return Err(StopError::Finished);
        }
        if self.trackers.is_empty() {
            return Ok(vec![unit]);
        }

        let ctx = self.overlap.context(&self.pending, &unit);
        let mut next = Vec::with_capacity(self.trackers.len());
        let mut completed = false;
        let mut in_progress = false;
        for (idx, &prior) in self.trackers.iter().enumerate() {
            let len = self.overlap.matched_len(idx, prior, &ctx);
            debug_assert!(len <= self.overlap.pattern_len(idx));
            if len == self.overlap.pattern_len(idx) {
                completed = true;
            }
            if len > 0 {
                in_progress = true;
            }
            next.push(len);
        }

        if completed {
            // The matched units are consumed, not re-emitted.
            self.pending.clear();
            self.trackers.iter_mut().for_each(|t| *t = 0);
            return Ok(vec![self.sentinel.clone()]);
        }

        let mut released = Vec::new();
        if in_progress {
            // Any pattern falling back releases the whole buffer: it is
            // shared across patterns, so nothing finer-grained is possible.
            if next.iter().zip(&self.trackers).any(|(n, prior)| n < prior) {
                released.append(&mut self.pending);
            }
            self.trackers.copy_from_slice(&next);
            self.pending.push(unit);
        } else {
            released.append(&mut self.pending);
            released.push(unit);
            self.trackers.iter_mut().for_each(|t| *t = 0);
        }
        Ok(released)
    }

    /// Release whatever is still withheld at end-of-stream, oldest first.
    ///
    /// A generation ending mid-partial-match gets its tentatively withheld
    /// units back instead of losing them. A second call emits nothing.
    pub fn finalize(&mut self) -> Vec<O::Unit> {
        self.finished = true;
        self.trackers.iter_mut().for_each(|t| *t = 0);
        std::mem::take(&mut self.pending)
    }
}
