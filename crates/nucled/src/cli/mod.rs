//! CLI subcommands — LED status, indicator control, configuration.

mod config_cmd;
mod set;
mod status;

use std::path::Path;

use clap::Subcommand;
use serde::Serialize;

pub(super) use nucled_lib::config::Config;
pub(super) use nucled_lib::directory::LedSlot;
pub(super) use nucled_lib::error::Result;
pub(super) use nucled_lib::procfile::LedController;

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{key:<width$}{value}", width = w);
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Load the config, from a custom path when given.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    match custom_path {
        Some(path) => {
            let (config, warnings) = Config::load_from(path);
            for w in &warnings {
                log::warn!("{w}");
            }
            config
        }
        None => Config::load(),
    }
}

/// Open the configured firmware gateway behind its lock.
pub(super) fn open_controller(
    config: &Config,
) -> Result<LedController<nucled_lib::gateway::AcpiCallGateway>> {
    Ok(LedController::new(config.open_gateway()?))
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct StatusOutput {
    pub version: String,
    pub leds: Vec<LedSlot>,
}

#[derive(Serialize)]
pub(super) struct ApplyOutput {
    pub command: String,
    pub status: u8,
    pub status_name: &'static str,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show every LED's capabilities and current indicator
    Status,

    /// Assign an indicator to an LED
    SetIndicator {
        /// LED id (0-7)
        led: u8,
        /// Indicator id (0-6)
        indicator: u8,
    },

    /// Set one parameter byte of an LED's indicator
    SetValue {
        /// LED id (0-7)
        led: u8,
        /// Indicator id (0-6)
        indicator: u8,
        /// Parameter item index
        item: u8,
        /// Value byte
        value: u8,
    },

    /// Apply a raw command line ("set_indicator,..." or "set_indicator_value,...")
    Apply {
        /// The command line, in the classic proc-file format
        line: String,
    },

    /// Show current configuration and file paths
    Config,
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, json: bool, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        Command::Status => status::cmd_status(json, config_path),
        Command::SetIndicator { led, indicator } => {
            if json {
                warn_json_unsupported("set-indicator");
            }
            set::cmd_set_indicator(led, indicator, config_path)
        }
        Command::SetValue { led, indicator, item, value } => {
            if json {
                warn_json_unsupported("set-value");
            }
            set::cmd_set_value(led, indicator, item, value, config_path)
        }
        Command::Apply { line } => set::cmd_apply(&line, json, config_path),
        Command::Config => config_cmd::cmd_config(json, config_path),
    }
}


#[cfg(test)]
mod json_struct_tests {
    use super::*;

    #[test]
    fn status_output_has_expected_fields() {
        let output = StatusOutput { version: "0.1.0".into(), leds: vec![] };
        let json = serde_json::to_value(&output).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2, "StatusOutput should have 2 fields");
        assert!(obj["leds"].as_array().unwrap().is_empty());
    }

    #[test]
    fn apply_output_round_trips() {
        let output = ApplyOutput {
            command: "set_indicator,0,6".into(),
            status: 0,
            status_name: "success",
        };
        let json = serde_json::to_string_pretty(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["command"], "set_indicator,0,6");
        assert_eq!(parsed["status"], 0);
        assert_eq!(parsed["status_name"], "success");
    }

    #[test]
    fn config_output_missing_path_is_null() {
        let output = ConfigOutput {
            config_file: None,
            config_file_exists: false,
            settings: Config::default(),
        };
        let json = serde_json::to_string_pretty(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["config_file"].is_null());
        assert_eq!(parsed["settings"]["acpi_call_path"], "/proc/acpi/call");
    }
}
