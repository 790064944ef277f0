//! Unified error type for the crate's public surface.

use std::fmt;

use crate::command::CommandError;
use crate::gateway::GatewayError;
use crate::protocol::return_code_name;

#[derive(Debug)]
pub enum NucLedError {
    /// Firmware gateway failure.
    Gateway(GatewayError),
    /// Malformed mutation command.
    Command(CommandError),
    /// The firmware executed the call but reported a non-success code.
    Firmware(u8),
    /// Filesystem error, from config handling.
    Io(std::io::Error),
    /// Config parse or serialize failure.
    Config(String),
}

impl fmt::Display for NucLedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NucLedError::Gateway(e) => write!(f, "{e}"),
            NucLedError::Command(e) => write!(f, "{e}"),
            NucLedError::Firmware(code) => {
                write!(f, "Firmware returned 0x{code:02X} ({})", return_code_name(*code))
            }
            NucLedError::Io(e) => write!(f, "I/O error: {e}"),
            NucLedError::Config(e) => write!(f, "Config error: {e}"),
        }
    }
}

impl std::error::Error for NucLedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NucLedError::Gateway(e) => Some(e),
            NucLedError::Command(e) => Some(e),
            NucLedError::Io(e) => Some(e),
            NucLedError::Firmware(_) | NucLedError::Config(_) => None,
        }
    }
}

impl From<GatewayError> for NucLedError {
    fn from(e: GatewayError) -> Self {
        NucLedError::Gateway(e)
    }
}

impl From<CommandError> for NucLedError {
    fn from(e: CommandError) -> Self {
        NucLedError::Command(e)
    }
}

impl From<std::io::Error> for NucLedError {
    fn from(e: std::io::Error) -> Self {
        NucLedError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, NucLedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_error_display_passes_through() {
        let e = NucLedError::from(GatewayError::Unavailable("timeout".into()));
        assert_eq!(e.to_string(), "Firmware call failed: timeout");
    }

    #[test]
    fn command_error_display_passes_through() {
        let e = NucLedError::from(CommandError::TooManyArguments);
        assert_eq!(e.to_string(), "Too many arguments");
    }

    #[test]
    fn firmware_error_names_the_code() {
        let e = NucLedError::Firmware(0xE4);
        assert_eq!(e.to_string(), "Firmware returned 0xE4 (invalid parameter)");
    }

    #[test]
    fn io_error_is_prefixed() {
        let e = NucLedError::from(std::io::Error::other("boom"));
        assert_eq!(e.to_string(), "I/O error: boom");
    }

    #[test]
    fn sources_chain() {
        use std::error::Error;
        let e = NucLedError::from(GatewayError::ShortResponse(1));
        assert!(e.source().is_some());
        assert!(NucLedError::Config("bad".into()).source().is_none());
    }
}
