//! Streaming stop-sequence detection.
//!
//! A [`StopHandler`] sits between a token/text generator and its consumer.
//! Fed one atomic unit per step, it withholds anything that may still be the
//! start of a configured stop sequence, releases withheld units as soon as
//! they provably cannot complete one, and replaces a completed sequence with
//! a single sentinel so the consumer knows to stop.
//!
//! Two parameterizations of one engine:
//! - [`TokenStopHandler`] matches token ids by positional equality.
//! - [`TextStopHandler`] matches decoded text by suffix/prefix overlap,
//!   since fragment boundaries need not align with pattern boundaries.
//!
//! ```
//! use haltr::stop::token_handler;
//!
//! let mut handler = token_handler(vec![vec![1, 2, 3]], 99).unwrap();
//! let mut out = Vec::new();
//! for id in [5u32, 1, 2, 3, 7] {
//!     out.extend(handler.process(id).unwrap());
//! }
//! out.extend(handler.finalize());
//! assert_eq!(out, vec![5, 99, 7]);
//! ```

mod engine;
mod text;
mod token;

pub use engine::{Overlap, StopError, StopHandler};
pub use text::{text_handler, TextOverlap, TextStopHandler};
pub use token::{token_handler, TokenOverlap, TokenStopHandler};
