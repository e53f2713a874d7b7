// License: MIT

use std::env;
use std::path::{Path, PathBuf};

pub fn default_log_path(file: &str) -> PathBuf {
    let base = env::var_os("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/state")))
        .unwrap_or_else(|| PathBuf::from("/tmp"));
    base.join("pinmark").join(file)
}

pub fn config_dir() -> PathBuf {
    let dir: PathBuf = if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg)
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(home).join(".config")
    };
    dir.join("pinmark")
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("pinmark.rune")
}

pub fn default_prefs_path() -> PathBuf {
    config_dir().join("prefs.json")
}

pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Replaces `$env.HOME` the way the config file spells it.
pub fn expand_env(s: &str) -> String {
    let mut out = s.to_string();
    if out.contains("$env.HOME") {
        if let Ok(home) = env::var("HOME") {
            out = out.replace("$env.HOME", &home);
        }
    }
    out
}
