//! Progress indicators for long-running API calls.

use indicatif::{ProgressBar, ProgressStyle};
use restkit::PollCallback;
use std::fmt;
use std::time::Duration;

/// Create a spinner with a message
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Reports creation polling on a spinner.
pub struct PollSpinner {
    bar: ProgressBar,
}

impl PollSpinner {
    pub fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

impl PollCallback for PollSpinner {
    fn on_retry(&self, attempt: u32, max_attempts: u32, error: &dyn fmt::Display, delay: Duration) {
        log::debug!("Poll attempt {attempt}/{max_attempts} failed: {error}");
        self.bar.set_message(format!(
            "Waiting for the new entity to become visible ({attempt}/{max_attempts}, next try in {}s)",
            delay.as_secs()
        ));
    }
}
