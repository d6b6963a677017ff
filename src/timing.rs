//! Marker-tagged elapsed-time logging.

use std::time::Instant;

use rand::Rng;

/// Tags timing logs with a random per-instance marker so interleaved runs
/// can be told apart, and reports elapsed time since construction and since
/// the previous log call.
pub struct StageTimer {
    marker: String,
    start: Instant,
    last: Instant,
}

impl StageTimer {
    /// Create a timer whose logs are tagged `<prefix>-<random id>`.
    pub fn new(prefix: &str) -> Self {
        let mut rng = rand::thread_rng();
        let marker = format!("{}-{:06}", prefix, rng.gen_range(0..1_000_000));
        let now = Instant::now();
        Self {
            marker,
            start: now,
            last: now,
        }
    }

    /// The marker this timer tags its logs with.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Log a message with elapsed-since-start and elapsed-since-last figures.
    pub fn log(&mut self, message: &str) {
        let now = Instant::now();
        let since_start = now.duration_since(self.start).as_secs_f64();
        let since_last = now.duration_since(self.last).as_secs_f64();
        tracing::info!(
            "{}: {} - {:.2}s since start, {:.2}s since last log",
            self.marker,
            message,
            since_start,
            since_last,
        );
        self.last = now;
    }
}

impl Default for StageTimer {
    fn default() -> Self {
        Self::new("timings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_keeps_prefix() {
        let timer = StageTimer::new("predict");
        assert!(timer.marker().starts_with("predict-"));
    }

    #[test]
    fn test_markers_distinguish_instances() {
        // Random six-digit suffixes; a collision across two draws would be
        // a one-in-a-million flake, which we accept.
        let a = StageTimer::new("stage");
        let b = StageTimer::new("stage");
        assert_ne!(a.marker(), b.marker());
    }

    #[test]
    fn test_log_advances_last_instant() {
        let mut timer = StageTimer::new("stage");
        let before = timer.last;
        timer.log("checkpoint");
        assert!(timer.last >= before);
    }
}
