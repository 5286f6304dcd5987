use crate::walker::FileRecord;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress over the files being written. Hidden when stdout is not a terminal.
pub struct FileProgress {
    pb: ProgressBar,
}

impl FileProgress {
    pub fn new() -> Self {
        let pb = if console::Term::stdout().is_term() {
            let pb = ProgressBar::new_spinner();
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };
        Self { pb }
    }

    pub fn update(&self, index: usize, total: usize, file: &FileRecord) {
        if self.pb.length() != Some(total as u64) {
            self.pb.set_length(total as u64);
            if let Ok(style) = ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}") {
                self.pb.set_style(style);
            }
        }
        self.pb.set_position(index as u64);
        self.pb.set_message(file.relative_path.display().to_string());
    }

    pub fn clear(&self) {
        self.pb.finish_and_clear();
    }
}

impl Default for FileProgress {
    fn default() -> Self {
        Self::new()
    }
}
