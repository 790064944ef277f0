//! Mutation command parsing and dispatch.
//!
//! Commands arrive as comma-separated lines, the format historically
//! written to the proc file:
//!
//! ```text
//! set_indicator,<led_id>,<indicator_id>
//! set_indicator_value,<led_id>,<indicator_id>,<item>,<value>
//! ```
//!
//! Numbers are decimal or `0x`-prefixed hex. Tokens are matched verbatim,
//! without trimming. Scanning stops at the first empty token, so a single
//! trailing comma is tolerated.

use std::fmt;

use crate::gateway::{self, MethodArgs, WmiGateway};
use crate::protocol::{METHOD_SET_INDICATOR, METHOD_SET_INDICATOR_VALUE};

// ── Errors ──

#[derive(Debug, PartialEq, Eq)]
pub enum CommandError {
    /// First token is not a known operation.
    InvalidAction(String),
    /// A numeric argument failed to parse as a byte.
    InvalidNumber { what: &'static str, token: String },
    /// More arguments than the operation takes.
    TooManyArguments,
    /// Fewer arguments than the operation takes.
    TooFewArguments { got: usize, needs: usize },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::InvalidAction(token) => write!(f, "Invalid action: {token}"),
            CommandError::InvalidNumber { what, token } => {
                write!(f, "Invalid {what}: {token}")
            }
            CommandError::TooManyArguments => write!(f, "Too many arguments"),
            CommandError::TooFewArguments { got, needs } => {
                write!(f, "Too few arguments ({got}), needs {needs}")
            }
        }
    }
}

impl std::error::Error for CommandError {}

// ── Commands ──

/// A parsed mutation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Assign an indicator to an LED.
    SetIndicator { led_id: u8, indicator_id: u8 },
    /// Set one parameter byte of an LED's indicator.
    SetIndicatorValue { led_id: u8, indicator_id: u8, item: u8, value: u8 },
}

impl Command {
    /// Parse one command line.
    ///
    /// A single trailing newline is stripped first. Arity is exact: 3
    /// tokens for `set_indicator`, 5 for `set_indicator_value`.
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let line = line.strip_suffix('\n').unwrap_or(line);

        let mut action = None;
        let mut fields = [0u8; 4];
        let mut count = 0usize;

        for token in line.split(',') {
            // Historical contract: an empty token ends the scan, so a
            // lone trailing comma is accepted.
            if token.is_empty() {
                break;
            }
            match count {
                0 => {
                    action = Some(match token {
                        "set_indicator" => Action::SetIndicator,
                        "set_indicator_value" => Action::SetIndicatorValue,
                        _ => return Err(CommandError::InvalidAction(token.to_string())),
                    });
                }
                1..=4 => {
                    if count >= 3 && action == Some(Action::SetIndicator) {
                        return Err(CommandError::TooManyArguments);
                    }
                    let what = FIELD_NAMES[count - 1];
                    fields[count - 1] = parse_u8(token).ok_or_else(|| {
                        CommandError::InvalidNumber { what, token: token.to_string() }
                    })?;
                }
                _ => return Err(CommandError::TooManyArguments),
            }
            count += 1;
        }

        match action {
            Some(Action::SetIndicator) if count == 3 => Ok(Command::SetIndicator {
                led_id: fields[0],
                indicator_id: fields[1],
            }),
            Some(Action::SetIndicatorValue) if count == 5 => Ok(Command::SetIndicatorValue {
                led_id: fields[0],
                indicator_id: fields[1],
                item: fields[2],
                value: fields[3],
            }),
            Some(Action::SetIndicator) => {
                Err(CommandError::TooFewArguments { got: count, needs: 3 })
            }
            Some(Action::SetIndicatorValue) => {
                Err(CommandError::TooFewArguments { got: count, needs: 5 })
            }
            None => Err(CommandError::TooFewArguments { got: 0, needs: 3 }),
        }
    }

    /// Dispatch the command to the firmware, returning its status byte.
    pub fn apply(&self, gw: &impl WmiGateway) -> gateway::Result<u8> {
        match *self {
            Command::SetIndicator { led_id, indicator_id } => {
                log::info!("Setting LED {led_id} indicator to {indicator_id}");
                gw.invoke_byte(
                    METHOD_SET_INDICATOR,
                    MethodArgs::new(led_id, indicator_id, 0, 0),
                )
            }
            Command::SetIndicatorValue { led_id, indicator_id, item, value } => {
                log::info!(
                    "Setting LED {led_id} indicator {indicator_id} option {item} to {value}"
                );
                gw.invoke_byte(
                    METHOD_SET_INDICATOR_VALUE,
                    MethodArgs::new(led_id, indicator_id, item, value),
                )
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    SetIndicator,
    SetIndicatorValue,
}

const FIELD_NAMES: [&str; 4] = ["LED ID", "indicator ID", "indicator setting", "setting value"];

/// Parse a byte as decimal or `0x`-prefixed hex. No sign, no whitespace.
fn parse_u8(token: &str) -> Option<u8> {
    if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16).ok()
    } else {
        token.parse().ok()
    }
}
