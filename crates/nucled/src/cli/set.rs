//! `set-indicator`, `set-value`, and `apply` subcommands.

use std::path::Path;

use nucled_lib::NucLedError;
use nucled_lib::command::Command;
use nucled_lib::protocol::{RETURN_SUCCESS, return_code_name};

use super::{ApplyOutput, Result, load_config, open_controller};

pub(super) fn cmd_set_indicator(led: u8, indicator: u8, config_path: Option<&Path>) -> Result<()> {
    dispatch(Command::SetIndicator { led_id: led, indicator_id: indicator }, false, config_path)
}

pub(super) fn cmd_set_value(
    led: u8,
    indicator: u8,
    item: u8,
    value: u8,
    config_path: Option<&Path>,
) -> Result<()> {
    let cmd = Command::SetIndicatorValue { led_id: led, indicator_id: indicator, item, value };
    dispatch(cmd, false, config_path)
}

/// Parse and dispatch a raw proc-style command line. Unlike the historical
/// proc write, a bad line or a rejected command is a hard error here.
pub(super) fn cmd_apply(line: &str, json: bool, config_path: Option<&Path>) -> Result<()> {
    let cmd = Command::parse(line)?;
    dispatch(cmd, json, config_path)
}

fn dispatch(cmd: Command, json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let controller = open_controller(&config)?;
    let status = controller.apply(cmd)?;

    if status != RETURN_SUCCESS {
        return Err(NucLedError::Firmware(status));
    }

    if json {
        let output = ApplyOutput {
            command: describe(cmd),
            status,
            status_name: return_code_name(status),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("OK");
    }
    Ok(())
}

fn describe(cmd: Command) -> String {
    match cmd {
        Command::SetIndicator { led_id, indicator_id } => {
            format!("set_indicator,{led_id},{indicator_id}")
        }
        Command::SetIndicatorValue { led_id, indicator_id, item, value } => {
            format!("set_indicator_value,{led_id},{indicator_id},{item},{value}")
        }
    }
}
