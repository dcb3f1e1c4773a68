use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Live `completed / total` indicator for a probe run. Writes to the
/// console, never to the persisted output.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self { bar: None, enabled }
    }

    pub fn start_probing(&mut self, total: usize) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} URLs probed ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Probing URLs");
        pb.enable_steady_tick(Duration::from_millis(120));
        self.bar = Some(pb);
    }

    /// `completed` is the monotonically increasing completion count.
    pub fn update(&self, completed: usize) {
        if let Some(ref pb) = self.bar {
            pb.set_position(completed as u64);
        }
    }

    pub fn finish(&self, total: usize) {
        if let Some(ref pb) = self.bar {
            pb.finish_with_message(format!("✓ Probed {total} URL(s)"));
        }
    }
}
