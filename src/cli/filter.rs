//! Streaming filter command
//!
//! Reads stdin line by line, feeds each line through a text stop handler,
//! and writes released fragments to stdout. Stops at the sentinel; flushes
//! withheld fragments at end of input.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use crate::config::FilterConfig;
use crate::timing::StageTimer;

/// Run the stdin filter.
pub async fn filter(stop: Vec<String>, sentinel: String, config: Option<PathBuf>) -> Result<()> {
    let config = match config {
        // Explicit --stop flags win over the config file.
        Some(path) if stop.is_empty() => {
            if path.extension().is_some_and(|ext| ext == "json") {
                FilterConfig::from_json(&path)?
            } else {
                FilterConfig::from_yaml(&path)?
            }
        }
        _ => FilterConfig {
            stop_sequences: stop,
            sentinel,
        },
    };

    let sentinel = config.sentinel.clone();
    let mut handler = config.into_handler()?;
    let mut timer = StageTimer::new("filter");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut fragments = 0usize;
    let mut stopped = false;

    for line in stdin.lock().lines() {
        let mut fragment = line?;
        fragment.push('\n');
        fragments += 1;

        for released in handler.process(fragment)? {
            if released == sentinel {
                stopped = true;
                break;
            }
            stdout.write_all(released.as_bytes())?;
        }
        if stopped {
            break;
        }
        stdout.flush()?;
    }

    if !stopped {
        for released in handler.finalize() {
            stdout.write_all(released.as_bytes())?;
        }
    }
    stdout.flush()?;

    timer.log(&format!(
        "processed {} fragment(s), stop sequence {}",
        fragments,
        if stopped { "matched" } else { "not matched" }
    ));
    Ok(())
}
