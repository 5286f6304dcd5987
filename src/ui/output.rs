use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;
use std::path::Path;

pub fn done_message(files: usize, output: &Path) -> String {
    format!("Done! Collected {} files. Check {}", files, output.display())
}

/// The completion line.
pub fn done(files: usize, output: &Path) {
    println!("{}", done_message(files, output).style(theme().success.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}
