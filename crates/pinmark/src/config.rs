// License: MIT
//
// Optional user config at $XDG_CONFIG_HOME/pinmark/pinmark.rune:
//
//   pinmark:
//     capture_command "capit region"
//     history_command "xdg-open $env.HOME/Pictures/Screenshots"
//     more_command ""
//     text_colour "#000000"
//   end

use std::path::Path;

use rune_cfg::RuneConfig;

use pinmark_core::Colour;
use pinmark_dock::ViewKind;

use crate::paths::expand_env;

#[derive(Debug, Clone)]
pub struct PinmarkConfig {
    /// argv per view; empty means "not configured".
    pub capture_command: Vec<String>,
    pub history_command: Vec<String>,
    pub more_command: Vec<String>,
    pub text_colour: Option<Colour>,
}

impl Default for PinmarkConfig {
    fn default() -> Self {
        Self {
            capture_command: vec!["capit".into(), "region".into()],
            history_command: Vec::new(),
            more_command: Vec::new(),
            text_colour: None,
        }
    }
}

impl PinmarkConfig {
    pub fn command_for(&self, kind: ViewKind) -> &[String] {
        match kind {
            ViewKind::Capture => &self.capture_command,
            ViewKind::History => &self.history_command,
            ViewKind::More => &self.more_command,
        }
    }
}

pub fn load(path: &Path) -> Result<PinmarkConfig, String> {
    if !path.exists() {
        return Ok(PinmarkConfig::default());
    }

    let rc = RuneConfig::from_file(path).map_err(|e| format!("failed to read config: {e}"))?;

    parse_config(&rc)
}

fn parse_config(rc: &RuneConfig) -> Result<PinmarkConfig, String> {
    let mut cfg = PinmarkConfig::default();

    if !rc.has("pinmark") {
        return Ok(cfg);
    }

    let string_at = |key: &str| -> Result<Option<String>, String> {
        rc.get_optional::<String>(key)
            .map_err(|e| format!("config error at {key}: {e}"))
    };

    if let Some(cmd) = string_at("pinmark.capture_command")? {
        cfg.capture_command = split_command(&cmd)
            .map_err(|e| format!("config error at pinmark.capture_command: {e}"))?;
    }

    if let Some(cmd) = string_at("pinmark.history_command")? {
        cfg.history_command = split_command(&cmd)
            .map_err(|e| format!("config error at pinmark.history_command: {e}"))?;
    }

    if let Some(cmd) = string_at("pinmark.more_command")? {
        cfg.more_command = split_command(&cmd)
            .map_err(|e| format!("config error at pinmark.more_command: {e}"))?;
    }

    if let Some(colour) = string_at("pinmark.text_colour")? {
        cfg.text_colour = Some(
            Colour::parse_hex(&colour)
                .map_err(|e| format!("config error at pinmark.text_colour: {e}"))?,
        );
    }

    Ok(cfg)
}

/// Shell-style split after `$env.HOME` expansion. Blank means unset.
pub fn split_command(cmd: &str) -> Result<Vec<String>, String> {
    let expanded = expand_env(cmd.trim());
    if expanded.is_empty() {
        return Ok(Vec::new());
    }
    shlex::split(&expanded).ok_or_else(|| format!("unbalanced quotes in \"{cmd}\""))
}
