use crate::{Error, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// Patterns applied to every run, after the ignore file.
pub const BUILTIN_PATTERNS: &[&str] = &[
    ".git",
    "package-lock.json",
    "repository_amalgamator.py",
    crate::config::CONFIG_FILE_NAME,
];

pub struct IgnoreFilter {
    inner: Gitignore,
}

impl IgnoreFilter {
    /// Build the matcher for `root` from `<root>/<ignore_file>` (if present), the
    /// built-in patterns, then `extra_excludes`, in that order.
    pub fn new(root: &Path, ignore_file: &str, extra_excludes: &[String]) -> Result<Self> {
        // `Gitignore::matched` strips the builder root from candidates byte-wise, so a
        // relative root like `web` would eat the front of `webapp/...`
        let root = std::path::absolute(root)?;
        let mut builder = GitignoreBuilder::new(&root);

        // 1. Ignore file at the root; absence means no file-sourced patterns
        let ignore_path = root.join(ignore_file);
        if ignore_path.is_file() {
            let contents = std::fs::read_to_string(&ignore_path).map_err(|source| {
                Error::IgnoreFile {
                    path: ignore_path.clone(),
                    source,
                }
            })?;
            for line in contents.lines() {
                add_pattern(&mut builder, Some(&ignore_path), line);
            }
        }

        // 2. Built-ins
        for pattern in BUILTIN_PATTERNS {
            add_pattern(&mut builder, None, pattern);
        }

        // 3. User excludes, last so they may re-include with `!`
        for pattern in extra_excludes {
            add_pattern(&mut builder, None, pattern);
        }

        Ok(Self {
            inner: builder.build()?,
        })
    }

    /// Whether `relative_path` (relative to the root) is excluded.
    pub fn matches(&self, relative_path: &Path, is_dir: bool) -> bool {
        self.inner.matched(relative_path, is_dir).is_ignore()
    }

    pub fn num_patterns(&self) -> u64 {
        self.inner.num_ignores() + self.inner.num_whitelists()
    }
}

fn add_pattern(builder: &mut GitignoreBuilder, from: Option<&Path>, line: &str) {
    if let Err(err) = builder.add_line(from.map(Path::to_path_buf), line) {
        tracing::warn!("Skipping invalid ignore pattern {:?}: {}", line, err);
    }
}
