//! `config` subcommand — show current configuration and file paths.

use std::path::Path;

use super::{Config, ConfigOutput, Result, kv, kv_indent, kv_width, load_config};

pub(super) fn cmd_config(json: bool, custom_path: Option<&Path>) -> Result<()> {
    let config = load_config(custom_path);
    let config_path = custom_path.map(|p| p.to_path_buf()).or_else(Config::path);
    let config_exists = config_path.as_ref().map(|p| p.exists()).unwrap_or(false);

    if json {
        let output = ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config,
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    // Human-readable output
    let w = kv_width(
        &["Config file:"],
        &["acpi_call_path:", "acpi_method:", "instance:"],
    );

    match &config_path {
        Some(p) => {
            if config_exists {
                kv("Config file:", format_args!("{} (loaded)", p.display()), w);
            } else {
                kv(
                    "Config file:",
                    format_args!("{} (not found, using defaults)", p.display()),
                    w,
                );
            }
        }
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    kv_indent("acpi_call_path:", &config.acpi_call_path, w);
    let method_display = if config.acpi_method.is_empty() {
        "(not configured; set to the WM?? method for the LED WMI GUID)".to_string()
    } else {
        config.acpi_method.clone()
    };
    kv_indent("acpi_method:", method_display, w);
    kv_indent("instance:", config.instance, w);
    Ok(())
}
