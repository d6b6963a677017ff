//! Unit-exact stop-sequence matching over token ids.
//!
//! A stop sequence is a fixed list of token ids; the incoming id either
//! matches the next position of a pattern exactly or resets that pattern's
//! progress to zero.

use super::engine::{Overlap, StopError, StopHandler};

/// Positional-equality overlap over token-id patterns.
pub struct TokenOverlap {
    patterns: Vec<Vec<u32>>,
}

impl TokenOverlap {
    pub fn new(patterns: Vec<Vec<u32>>) -> Self {
        Self { patterns }
    }
}

impl Overlap for TokenOverlap {
    type Unit = u32;
    type Context = u32;

    fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    fn pattern_len(&self, idx: usize) -> usize {
        self.patterns[idx].len()
    }

    fn context(&self, _pending: &[u32], unit: &u32) -> u32 {
        *unit
    }

    fn matched_len(&self, idx: usize, prior: usize, ctx: &u32) -> usize {
        if self.patterns[idx][prior] == *ctx {
            prior + 1
        } else {
            0
        }
    }
}

/// Stop handler over token ids, emitting `eos_token_id` on a match.
pub type TokenStopHandler = StopHandler<TokenOverlap>;

/// Build a [`TokenStopHandler`] from tokenized stop sequences.
///
/// An empty `stop_sequences_token_ids` yields a pass-through handler.
pub fn token_handler(
    stop_sequences_token_ids: Vec<Vec<u32>>,
    eos_token_id: u32,
) -> Result<TokenStopHandler, StopError> {
    StopHandler::new(TokenOverlap::new(stop_sequences_token_ids), eos_token_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn drive(handler: &mut TokenStopHandler, input: &[u32]) -> Vec<u32> {
        let mut out = Vec::new();
        for &id in input {
            out.extend(handler.process(id).unwrap());
        }
        out
    }

    #[test]
    fn test_single_match_emits_one_sentinel() {
        let mut handler = token_handler(vec![vec![1, 2, 3]], 99).unwrap();
        let mut out = drive(&mut handler, &[5, 1, 2, 3, 7]);
        out.extend(handler.finalize());
        assert_eq!(out, vec![5, 99, 7]);
    }

    #[test]
    fn test_partial_match_then_mismatch_releases_in_order() {
        let mut handler = token_handler(vec![vec![1, 2, 3]], 99).unwrap();
        assert!(handler.process(1).unwrap().is_empty());
        assert!(handler.process(2).unwrap().is_empty());
        // 7 breaks the match, so the withheld ids come back in arrival order.
        assert_eq!(handler.process(7).unwrap(), vec![1, 2, 7]);
        assert!(handler.finalize().is_empty());
    }

    #[test]
    fn test_first_completed_match_resets_all_trackers() {
        let mut handler = token_handler(vec![vec![1, 2], vec![1, 3]], 99).unwrap();
        assert!(handler.process(1).unwrap().is_empty());
        assert_eq!(handler.process(2).unwrap(), vec![99]);
        // The second pattern's progress was reset too: 3 alone is not a
        // continuation of [1, 3].
        assert_eq!(handler.process(3).unwrap(), vec![3]);
    }

    #[test]
    fn test_regression_on_one_pattern_flushes_shared_buffer() {
        let mut handler = token_handler(vec![vec![1, 2, 3], vec![1, 4]], 99).unwrap();
        assert!(handler.process(1).unwrap().is_empty());
        // 2 advances [1,2,3] but regresses [1,4]; the buffer is shared, so
        // the withheld 1 is released even though [1,2,3] is still live.
        assert_eq!(handler.process(2).unwrap(), vec![1]);
        assert_eq!(handler.pending_len(), 1);
    }

    #[test]
    fn test_single_token_pattern() {
        let mut handler = token_handler(vec![vec![42]], 99).unwrap();
        assert_eq!(handler.process(7).unwrap(), vec![7]);
        assert_eq!(handler.process(42).unwrap(), vec![99]);
        assert_eq!(handler.process(7).unwrap(), vec![7]);
    }

    #[test]
    fn test_finalize_flushes_residual_buffer() {
        let mut handler = token_handler(vec![vec![8, 9, 10]], 99).unwrap();
        assert!(handler.process(8).unwrap().is_empty());
        assert!(handler.process(9).unwrap().is_empty());
        assert_eq!(handler.finalize(), vec![8, 9]);
        assert!(handler.finalize().is_empty());
    }

    prop_compose! {
        fn id_vec(range: std::ops::Range<usize>)
            (v in prop::collection::vec(0u32..8, range)) -> Vec<u32> { v }
    }

    proptest! {
        // With no patterns configured, process is the identity per unit.
        #[test]
        fn prop_passthrough_identity(input in id_vec(0..64)) {
            let mut handler = token_handler(vec![], 99).unwrap();
            let mut out = drive(&mut handler, &input);
            out.extend(handler.finalize());
            prop_assert_eq!(out, input);
        }

        // No unit is ever lost: as long as no stop sequence completes, the
        // released units plus the finalize flush reproduce the input exactly.
        #[test]
        fn prop_no_loss_without_match(
            pattern in id_vec(2..6),
            input in id_vec(0..64),
        ) {
            let sentinel = 99u32;
            let mut handler = token_handler(vec![pattern], sentinel).unwrap();
            let mut out = drive(&mut handler, &input);
            out.extend(handler.finalize());
            if !out.contains(&sentinel) {
                prop_assert_eq!(out, input);
            } else {
                // A match consumed some units; nothing beyond them may vanish.
                prop_assert!(out.len() <= input.len());
            }
        }
    }
}
