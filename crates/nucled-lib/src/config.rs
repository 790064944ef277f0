//! Application configuration — TOML-based, platform-aware paths.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::gateway::{self, AcpiCallGateway};

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str =
    "# nucled configuration — changes made outside the tool may be overwritten.\n\n";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the acpi_call interface file. Default: "/proc/acpi/call".
    #[serde(default = "default_acpi_call_path")]
    pub acpi_call_path: String,

    /// ACPI method that backs the LED WMI GUID, e.g. "\\_SB.WMTF".
    /// Board-specific; find it under /sys/bus/wmi. Empty = not configured.
    #[serde(default)]
    pub acpi_method: String,

    /// WMI instance index. The firmware only populates instance 0.
    #[serde(default)]
    pub instance: u8,
}

fn default_acpi_call_path() -> String {
    "/proc/acpi/call".into()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            acpi_call_path: default_acpi_call_path(),
            acpi_method: String::new(),
            instance: 0,
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nucled"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    ///
    /// A header comment is prepended to warn that manual edits may be overwritten.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Save config to the default platform path.
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config directory",
            ));
        };
        self.save_to(&path)
    }

    /// Build the firmware gateway described by this config.
    ///
    /// Fails with a pointer to `acpi_method` when it has not been set.
    pub fn open_gateway(&self) -> gateway::Result<AcpiCallGateway> {
        AcpiCallGateway::new(&*self.acpi_call_path, &self.acpi_method, self.instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ──

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.acpi_call_path, "/proc/acpi/call");
        assert!(c.acpi_method.is_empty());
        assert_eq!(c.instance, 0);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let c: Config = toml::from_str("").unwrap();
        assert_eq!(c.acpi_call_path, "/proc/acpi/call");
        assert!(c.acpi_method.is_empty());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: Config = toml::from_str(r#"acpi_method = "\\_SB.WMTF""#).unwrap();
        assert_eq!(c.acpi_method, "\\_SB.WMTF");
        assert_eq!(c.acpi_call_path, "/proc/acpi/call");
        assert_eq!(c.instance, 0);
    }

    #[test]
    fn serialize_roundtrip() {
        let c = Config {
            acpi_call_path: "/tmp/fake_call".into(),
            acpi_method: "\\_SB.WMTF".into(),
            instance: 0,
        };
        let toml_str = toml::to_string_pretty(&c).unwrap();
        let c2: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(c2.acpi_call_path, "/tmp/fake_call");
        assert_eq!(c2.acpi_method, "\\_SB.WMTF");
    }

    #[test]
    fn config_path_ends_with_toml() {
        let path = Config::path().unwrap();
        assert_eq!(path.file_name().unwrap(), "config.toml");
        assert_eq!(path.parent().unwrap(), Config::dir().unwrap());
    }

    // ── save_to / load_from ──

    #[test]
    fn save_to_load_from_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            acpi_call_path: "/tmp/fake_call".into(),
            acpi_method: "\\_SB.WMTF".into(),
            instance: 0,
        };
        config.save_to(&path).unwrap();

        let (loaded, warnings) = Config::load_from(&path);
        assert!(warnings.is_empty());
        assert_eq!(loaded.acpi_call_path, config.acpi_call_path);
        assert_eq!(loaded.acpi_method, config.acpi_method);
        assert_eq!(loaded.instance, config.instance);
    }

    #[test]
    fn save_to_includes_header_comment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        Config::default().save_to(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(
            contents.starts_with("# nucled configuration"),
            "saved file should start with header comment"
        );
    }

    #[test]
    fn save_to_cleans_up_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        Config::default().save_to(&path).unwrap();
        let tmp = dir.path().join("config.toml.tmp");
        assert!(!tmp.exists(), "temp file should not remain after save");
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = Config::load_from(&dir.path().join("nonexistent.toml"));
        assert!(warnings.is_empty());
        assert_eq!(config.acpi_call_path, "/proc/acpi/call");
    }

    #[test]
    fn load_from_invalid_toml_returns_defaults_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is { not valid toml").unwrap();

        let (config, warnings) = Config::load_from(&path);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("config parse error"));
        assert_eq!(config.acpi_call_path, "/proc/acpi/call");
    }

    // ── Gateway construction ──

    #[test]
    fn open_gateway_requires_method() {
        assert!(Config::default().open_gateway().is_err());
        let c = Config { acpi_method: "\\_SB.WMTF".into(), ..Config::default() };
        assert!(c.open_gateway().is_ok());
    }
}
