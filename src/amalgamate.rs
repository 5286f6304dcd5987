//! Writes the single-file amalgamation: one `Path:`/`Contents:` record per file.

use crate::config::AmalgamateOptions;
use crate::ignore::IgnoreFilter;
use crate::walker::{self, FileRecord};
use crate::Result;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Why a single file could not be read. The run continues regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFailure {
    NotFound,
    PermissionDenied,
    Io,
}

impl ReadFailure {
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Io,
        }
    }
}

impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "file not found",
            Self::PermissionDenied => "permission denied",
            Self::Io => "I/O error",
        };
        f.write_str(label)
    }
}

/// Contents of one record, or the diagnostic that replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContents {
    Text(String),
    Failed { kind: ReadFailure, message: String },
}

impl fmt::Display for FileContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Failed { kind, message } => {
                writeln!(f, "Failed to read file ({}): {}", kind, message)
            }
        }
    }
}

/// Read `path` as UTF-8 with replacement, mapping U+2028/U+2029 to `\n`.
pub fn read_contents(path: &Path) -> FileContents {
    match std::fs::read(path) {
        Ok(bytes) => {
            FileContents::Text(normalize_line_separators(&String::from_utf8_lossy(&bytes)))
        }
        Err(err) => FileContents::Failed {
            kind: ReadFailure::from_io(&err),
            message: err.to_string(),
        },
    }
}

pub fn normalize_line_separators(text: &str) -> String {
    text.replace(['\u{2028}', '\u{2029}'], "\n")
}

pub fn write_record<W: Write>(
    out: &mut W,
    relative_path: &Path,
    contents: &FileContents,
) -> io::Result<()> {
    write!(
        out,
        "Path: {}\nContents:\n{}\n\n",
        relative_path.display(),
        contents
    )
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub output: PathBuf,
    pub files: usize,
    pub failed: Vec<PathBuf>,
    pub bytes: u64,
}

pub struct Amalgamator {
    options: AmalgamateOptions,
}

impl Amalgamator {
    pub fn new(options: AmalgamateOptions) -> Self {
        Self { options }
    }

    /// Run the whole pipeline. `on_file` is called before each file is written.
    pub fn run_with<F>(&self, mut on_file: F) -> Result<Summary>
    where
        F: FnMut(usize, usize, &FileRecord),
    {
        let opts = &self.options;
        tracing::debug!("Amalgamating with {:?}", opts);

        let filter = IgnoreFilter::new(&opts.root, &opts.ignore_file, &opts.extra_excludes)?;
        tracing::debug!("Compiled {} ignore patterns", filter.num_patterns());

        // Remove stale output before walking so it never lands in its own amalgamation
        if opts.output.exists() {
            std::fs::remove_file(&opts.output)?;
        }

        let files = walker::collect_files(&opts.root, &filter, opts.sort)?;

        let mut out = BufWriter::new(File::create(&opts.output)?);
        let mut summary = Summary {
            output: opts.output.clone(),
            files: files.len(),
            failed: Vec::new(),
            bytes: 0,
        };

        for (index, file) in files.iter().enumerate() {
            on_file(index, files.len(), file);

            let contents = read_contents(&file.absolute_path);
            match &contents {
                FileContents::Text(text) => summary.bytes += text.len() as u64,
                FileContents::Failed { kind, message } => {
                    tracing::debug!(
                        "Failed to read {} ({}): {}",
                        file.relative_path.display(),
                        kind,
                        message
                    );
                    summary.failed.push(file.relative_path.clone());
                }
            }
            write_record(&mut out, &file.relative_path, &contents)?;
        }

        out.flush()?;
        Ok(summary)
    }

    pub fn run(&self) -> Result<Summary> {
        self.run_with(|_, _, _| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_OUTPUT_NAME;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, contents: &[u8]) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn run_sorted(root: &Path) -> (Summary, String) {
        let mut options = AmalgamateOptions::new(root);
        options.sort = true;
        let summary = Amalgamator::new(options).run().unwrap();
        let output = fs::read_to_string(root.join(DEFAULT_OUTPUT_NAME)).unwrap();
        (summary, output)
    }

    #[test]
    fn test_record_format() {
        let mut buf = Vec::new();
        write_record(&mut buf, Path::new("a.txt"), &FileContents::Text("hello".into())).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Path: a.txt\nContents:\nhello\n\n");
    }

    #[test]
    fn test_failure_diagnostic() {
        let contents = FileContents::Failed {
            kind: ReadFailure::NotFound,
            message: "No such file or directory (os error 2)".into(),
        };
        assert_eq!(
            contents.to_string(),
            "Failed to read file (file not found): No such file or directory (os error 2)\n"
        );
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let contents = read_contents(&dir.path().join("gone.txt"));
        match contents {
            FileContents::Failed { kind, .. } => assert_eq!(kind, ReadFailure::NotFound),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_line_separators_and_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("odd.txt");
        let mut bytes = "one\u{2028}two\u{2029}three ".as_bytes().to_vec();
        bytes.push(0xff);
        fs::write(&path, bytes).unwrap();

        assert_eq!(
            read_contents(&path),
            FileContents::Text("one\ntwo\nthree \u{FFFD}".into())
        );
    }

    #[test]
    fn test_full_run() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, ".gitignore", b"*.log\nbuild/\n!build/keep.txt\n");
        touch(root, "README.md", b"# Title\n");
        touch(root, "src/main.rs", b"fn main() {}\n");
        touch(root, "debug.log", b"noise");
        touch(root, "build/keep.txt", b"pruned");
        touch(root, ".git/HEAD", b"ref: refs/heads/main");
        touch(root, "package-lock.json", b"{}");
        touch(root, "repository_amalgamator.py", b"print()");

        let (summary, output) = run_sorted(root);

        assert_eq!(summary.files, 3);
        assert!(summary.failed.is_empty());
        assert_eq!(
            output,
            "Path: .gitignore\nContents:\n*.log\nbuild/\n!build/keep.txt\n\n\n\
             Path: README.md\nContents:\n# Title\n\n\n\
             Path: src/main.rs\nContents:\nfn main() {}\n\n\n"
        );
    }

    #[test]
    fn test_existing_output_is_replaced() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "a.txt", b"a");
        touch(root, DEFAULT_OUTPUT_NAME, b"stale contents that must not survive");

        let (summary, output) = run_sorted(root);

        assert_eq!(summary.files, 1);
        assert_eq!(output, "Path: a.txt\nContents:\na\n\n");
    }

    #[test]
    fn test_idempotent() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "x/1.txt", b"one");
        touch(root, "x/y/2.txt", b"two");
        touch(root, "3.txt", b"three");

        let (_, first) = run_sorted(root);
        let (_, second) = run_sorted(root);

        assert_eq!(first, second);
    }

    #[test]
    fn test_vanished_file_is_substituted() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "a.txt", b"a");
        touch(root, "b.txt", b"b");

        let mut options = AmalgamateOptions::new(root);
        options.sort = true;
        let summary = Amalgamator::new(options)
            .run_with(|index, _, file| {
                if index == 0 {
                    fs::remove_file(root.join("b.txt")).unwrap();
                }
                assert!(file.absolute_path.starts_with(root));
            })
            .unwrap();

        assert_eq!(summary.files, 2);
        assert_eq!(summary.failed, vec![PathBuf::from("b.txt")]);
        let output = fs::read_to_string(root.join(DEFAULT_OUTPUT_NAME)).unwrap();
        assert!(output.starts_with(
            "Path: a.txt\nContents:\na\n\n\
             Path: b.txt\nContents:\nFailed to read file (file not found): "
        ));
    }

    #[test]
    fn test_custom_output_and_excludes() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "keep.rs", b"k");
        touch(root, "drop.min.js", b"d");

        let mut options = AmalgamateOptions::new(root);
        options.output = root.join("bundle.txt");
        options.extra_excludes = vec!["*.min.js".into(), "bundle.txt".into()];
        let summary = Amalgamator::new(options).run().unwrap();

        assert_eq!(summary.files, 1);
        let output = fs::read_to_string(root.join("bundle.txt")).unwrap();
        assert_eq!(output, "Path: keep.rs\nContents:\nk\n\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_substituted() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "a.txt", b"a");
        touch(root, "secret.txt", b"s");
        let secret = root.join("secret.txt");
        fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind a privileged user
        if fs::read(&secret).is_ok() {
            return;
        }

        let (summary, output) = run_sorted(root);

        assert_eq!(summary.files, 2);
        assert_eq!(summary.failed, vec![PathBuf::from("secret.txt")]);
        assert!(output.starts_with(
            "Path: a.txt\nContents:\na\n\n\
             Path: secret.txt\nContents:\nFailed to read file (permission denied): "
        ));
        assert!(output.ends_with("\n\n\n"));
    }
}
