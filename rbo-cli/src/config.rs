//! Settings file for the rbo CLI.
//!
//! Looked up at `$XDG_CONFIG_HOME/rbo/config.toml`, falling back to
//! `~/.config/rbo/config.toml`. Every key is optional; flags win.
use serde::Deserialize;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RboConfig {
    pub p: Option<f64>,
    pub depth: Option<usize>,
    pub ascending: Option<bool>,
}

const TEMPLATE: &str = "\
# rbo configuration
# All values here can be overridden by CLI flags.

# Persistence: probability of looking one rank deeper. Strictly between 0 and 1.
# p = 0.9

# Evaluation depth. Defaults to the length of the shorter ranking.
# depth = 10

# For score maps: rank lower scores first (rank-like scores).
# ascending = false
";

/// Where the settings file lives when `--config` is not given.
/// `None` when neither `XDG_CONFIG_HOME` nor `HOME` is set.
pub fn default_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("rbo").join("config.toml"))
}

impl RboConfig {
    /// Read settings from `path`. A file that does not exist yields all defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("Failed to read config at {}: {e}", path.display())),
        };
        toml::from_str(&content).map_err(|e| format!("Failed to parse config at {}: {e}", path.display()))
    }
}

/// Write the commented template to `path`, creating parent directories.
/// Never overwrites: an existing file is an error.
pub fn write_template(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {e}", parent.display()))?;
    }

    let mut file = OpenOptions::new().write(true).create_new(true).open(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => format!("Config file already exists at {}", path.display()),
        _ => format!("Failed to create {}: {e}", path.display()),
    })?;
    file.write_all(TEMPLATE.as_bytes())
        .map_err(|e| format!("Failed to write config to {}: {e}", path.display()))
}
