use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for pipeline orchestration events.
///
/// Decouples use cases from specific output mechanisms so each caller can
/// observe a run without changing the orchestration code.
pub trait PipelineLogger: Send {
    /// Report that `completed` files have been written so far.
    fn progress(&mut self, completed: usize);

    /// Record a per-utterance measurement (e.g. phone count).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _completed: usize) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger that forwards to the `log` facade and summarises
/// the run at the end.
///
/// Progress output is throttled to every `throttle` files.
pub struct LogPipelineLogger {
    throttle: usize,
    /// Running `(sum, count)` per metric name.
    metrics: HashMap<String, (f64, usize)>,
    start_time: Instant,
    completed: usize,
}

impl LogPipelineLogger {
    pub fn new(throttle: usize) -> Self {
        Self {
            throttle: throttle.max(1),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            completed: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if nothing was
    /// written.
    pub fn summary_string(&self) -> Option<String> {
        if self.completed == 0 && self.metrics.is_empty() {
            return None;
        }

        let elapsed = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Conversion summary ({} files, {elapsed:.1}s total):",
            self.completed
        )];

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            let avg = self.metric_average(name).unwrap_or(0.0);
            lines.push(format!("  {name}: avg {avg:.1}"));
        }

        if self.completed > 0 && elapsed > 0.0 {
            let rate = self.completed as f64 / elapsed;
            lines.push(format!("  Throughput: {rate:.1} files/s"));
        }

        Some(lines.join("\n"))
    }

    pub fn metric_average(&self, name: &str) -> Option<f64> {
        self.metrics
            .get(name)
            .filter(|(_, count)| *count > 0)
            .map(|(sum, count)| sum / *count as f64)
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn progress(&mut self, completed: usize) {
        self.completed = completed;
        if completed % self.throttle == 0 {
            log::info!("Written: {completed} TextGrids");
        }
    }

    fn metric(&mut self, name: &str, value: f64) {
        let (sum, count) = self.metrics.entry(name.to_string()).or_default();
        *sum += value;
        *count += 1;
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
