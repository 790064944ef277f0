//! `status` subcommand — show every LED's capabilities and indicator.

use std::path::Path;

use super::{Result, StatusOutput, load_config, open_controller};

pub(super) fn cmd_status(json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let controller = open_controller(&config)?;

    if json {
        let slots = controller.query()?;
        let output = StatusOutput {
            version: env!("CARGO_PKG_VERSION").to_string(),
            leds: slots,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    // Human-readable output is the classic proc-file report, unchanged.
    print!("{}", controller.read()?);
    Ok(())
}
