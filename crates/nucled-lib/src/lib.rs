//! Protocol and state layer for Intel NUC (Hades Canyon) LED control.
//!
//! The NUC8i7HVK exposes its seven front-panel LEDs through a WMI method
//! block. This crate discovers the populated LED slots, decodes each
//! one's capabilities and active indicator parameters, renders the
//! classic text report, and parses and dispatches the two mutation
//! commands (`set_indicator`, `set_indicator_value`).
//!
//! Firmware access goes through the [`gateway::WmiGateway`] trait;
//! [`gateway::AcpiCallGateway`] drives real hardware via the `acpi_call`
//! kernel module, and a scripted mock backs the tests.

pub mod command;
pub mod config;
pub mod directory;
pub mod error;
pub mod gateway;
pub mod indicator;
pub mod procfile;
pub mod protocol;
pub mod render;

pub use error::{NucLedError, Result};
