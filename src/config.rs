use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "amalgamator.toml";
pub const DEFAULT_OUTPUT_NAME: &str = "repository_amalgamation.txt";
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AmalgamatorConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_file: Option<String>,
    pub exclude: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<bool>,
}

impl AmalgamatorConfig {
    /// Starter contents written by `amalgamator init`.
    pub fn starter() -> Self {
        Self {
            output: Some(DEFAULT_OUTPUT_NAME.to_string()),
            ignore_file: Some(DEFAULT_IGNORE_FILE.to_string()),
            exclude: Vec::new(),
            sort: Some(false),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct AmalgamateOptions {
    pub root: PathBuf,
    pub output: PathBuf,
    pub ignore_file: String,
    pub extra_excludes: Vec<String>,
    pub sort: bool,
}

impl AmalgamateOptions {
    /// Defaults for `root`, matching a bare invocation.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            output: root.join(DEFAULT_OUTPUT_NAME),
            root,
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            extra_excludes: Vec::new(),
            sort: false,
        }
    }

    /// Layer config-file values over the defaults.
    pub fn with_config(mut self, config: &AmalgamatorConfig) -> Self {
        if let Some(output) = &config.output {
            self.output = self.root.join(output);
        }
        if let Some(ignore_file) = &config.ignore_file {
            self.ignore_file = ignore_file.clone();
        }
        self.extra_excludes.extend(config.exclude.iter().cloned());
        if let Some(sort) = config.sort {
            self.sort = sort;
        }
        self
    }

    /// Keep the config file out of the amalgamation, whatever it is named. Added
    /// after every other pattern, so it cannot be re-included.
    pub fn exclude_config_file(mut self, config_path: &Path) -> Self {
        if let Some(pattern) = anchored_pattern(&self.root, config_path) {
            self.extra_excludes.push(pattern);
        }
        self
    }
}

/// Root-anchored gitignore pattern for `path`, or `None` when it lies outside `root`.
fn anchored_pattern(root: &Path, path: &Path) -> Option<String> {
    let root = std::path::absolute(root).ok()?;
    let path = std::path::absolute(path).ok()?;
    let relative = path.strip_prefix(&root).ok()?;

    let mut pattern = String::new();
    for component in relative.components() {
        pattern.push('/');
        for ch in component.as_os_str().to_string_lossy().chars() {
            if matches!(ch, '\\' | '*' | '?' | '[' | ']' | ' ') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
    }
    (!pattern.is_empty()).then_some(pattern)
}

pub fn default_config_path_in(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

pub fn load_config(path: &Path) -> Result<Option<AmalgamatorConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)?;
    let config: AmalgamatorConfig = toml::from_str(&contents).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &AmalgamatorConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::ConfigExists(path.to_path_buf()));
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
