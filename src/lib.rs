//! Haltr - streaming stop-sequence handling for LLM generation streams
//!
//! Haltr sits between a model's per-step token/text producer and its
//! consumer. It watches the incrementally produced stream for configured
//! stop sequences, withholding output that might still complete one and
//! replacing a completed sequence with a single sentinel — without looking
//! ahead and without re-processing anything already released.
//!
//! # Architecture
//!
//! - **stop**: the detection engine, one generic state machine with a
//!   token-id variant and a text-fragment variant
//! - **config**: filter configuration and environment lookups
//! - **fetch**: weight-file presence check and parallel `pget` downloads
//! - **timing**: marker-tagged elapsed-time logging
//! - **cli**: `haltr filter` and `haltr fetch`
//!
//! # Example
//!
//! ```
//! use haltr::stop::text_handler;
//!
//! let mut handler = text_handler(vec!["</s>".to_string()], "<|endoftext|>").unwrap();
//! assert_eq!(handler.process("hello ".to_string()).unwrap(), vec!["hello "]);
//! assert!(handler.process("</".to_string()).unwrap().is_empty());
//! assert_eq!(handler.process("s>".to_string()).unwrap(), vec!["<|endoftext|>"]);
//! ```

pub mod cli;
pub mod config;
pub mod fetch;
pub mod stop;
pub mod timing;

// Re-export key types
pub use config::FilterConfig;
pub use stop::{StopError, StopHandler, TextStopHandler, TokenStopHandler};
pub use timing::StageTimer;
