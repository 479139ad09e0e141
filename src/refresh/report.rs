//! Aggregated result reporting
//!
//! Every step returns a [`StepReport`] listing the items it succeeded on,
//! failed on, and skipped, instead of only logging. The [`RunReport`] strings
//! them together and renders the end-of-run summary with elapsed wall-clock
//! time.

use std::time::{Duration, Instant};

/// Per-item outcome of one refresh step.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: &'static str,
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, String)>,
    pub skipped: Vec<String>,
}

impl StepReport {
    pub fn new(step: &'static str) -> Self {
        Self {
            step,
            succeeded: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn ok(&mut self, item: impl Into<String>) {
        self.succeeded.push(item.into());
    }

    pub fn fail(&mut self, item: impl Into<String>, reason: impl ToString) {
        self.failed.push((item.into(), reason.to_string()));
    }

    pub fn skip(&mut self, item: impl Into<String>) {
        self.skipped.push(item.into());
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Whole-run outcome: one report per step plus wall-clock timing.
#[derive(Debug)]
pub struct RunReport {
    started: Instant,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, step: StepReport) {
        self.steps.push(step);
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn total_failed(&self) -> usize {
        self.steps.iter().map(|s| s.failed.len()).sum()
    }

    pub fn total_succeeded(&self) -> usize {
        self.steps.iter().map(|s| s.succeeded.len()).sum()
    }

    /// Render the run summary, one line per step plus every failure and the
    /// elapsed time in minutes and seconds.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for step in &self.steps {
            let mut line = format!(
                "{}: {} ok, {} failed",
                step.step,
                step.succeeded.len(),
                step.failed.len()
            );
            if !step.skipped.is_empty() {
                line.push_str(&format!(", {} skipped", step.skipped.len()));
            }
            lines.push(line);
            for (item, reason) in &step.failed {
                lines.push(format!("  failed {}: {}", item, reason));
            }
        }
        let elapsed = self.elapsed();
        lines.push(format!(
            "Refresh completed in {:.2} minutes ({:.2} seconds)",
            elapsed.as_secs_f64() / 60.0,
            elapsed.as_secs_f64()
        ));
        lines
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
