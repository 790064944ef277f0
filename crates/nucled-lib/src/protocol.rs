//! Protocol constants for the Intel NUC (Hades Canyon) LED WMI interface.
//!
//! All values come from the "WMI Interface for Intel NUC Products"
//! specification, August 2018 rev 0.64, as implemented by the NUC8i7HVK
//! firmware.
//!
//! Every method used here takes a fixed 4-byte argument record and returns
//! a buffer whose byte at offset 1 carries the semantic result; offset 0 is
//! a fixed firmware header byte.

/// LED control management GUID. The firmware exposes exactly one instance
/// of this block (instance index 0).
pub const NUCLED_WMI_GUID: &str = "8C5DA44C-CDC3-46B3-8619-4E26D34390B7";

/// WMI instance index. Per Intel docs, the first instance is always used.
pub const WMI_INSTANCE: u8 = 0;

/// Offset of the semantic status/data byte in every method response.
pub const RESPONSE_DATA_OFFSET: usize = 1;

// ── Method IDs ──

/// Query LED presence, color type, or indicator support (selected by arg1).
pub const METHOD_QUERY_LED: u8 = 0x03;

/// Get current indicator or a single indicator option byte (selected by arg1).
pub const METHOD_GET_STATUS: u8 = 0x04;

/// Assign an indicator to an LED: args `(led_id, indicator_id)`.
pub const METHOD_SET_INDICATOR: u8 = 0x05;

/// Set one indicator option byte: args `(led_id, indicator_id, item, value)`.
pub const METHOD_SET_INDICATOR_VALUE: u8 = 0x06;

// ── METHOD_QUERY_LED selectors (arg1) ──

/// Returns the 8-bit presence bitmask over LED slots 0–7.
pub const QUERY_PRESENT_LEDS: u8 = 0x00;

/// Returns the color-type capability bitmask for the LED in arg2.
pub const QUERY_COLOR_TYPE: u8 = 0x01;

/// Returns the supported-indicator bitmask for the LED in arg2.
pub const QUERY_INDICATOR_SUPPORT: u8 = 0x02;

// ── METHOD_GET_STATUS selectors (arg1) ──

/// Returns the active indicator code for the LED in arg2.
pub const STATUS_CURRENT_INDICATOR: u8 = 0x00;

/// Returns one parameter byte: LED in arg2, indicator in arg3, item in arg4.
pub const STATUS_INDICATOR_VALUE: u8 = 0x01;

// ── Firmware return codes ──

pub const RETURN_SUCCESS: u8 = 0x00;
pub const RETURN_NO_SUPPORT: u8 = 0xE1;
pub const RETURN_UNDEFINED: u8 = 0xE2;
pub const RETURN_NO_RESPONSE: u8 = 0xE3;
pub const RETURN_BAD_PARAM: u8 = 0xE4;
pub const RETURN_UNEXPECTED: u8 = 0xEF;

/// Human-readable description of a firmware return code.
pub fn return_code_name(code: u8) -> &'static str {
    match code {
        RETURN_SUCCESS => "success",
        RETURN_NO_SUPPORT => "function not supported",
        RETURN_UNDEFINED => "undefined device",
        RETURN_NO_RESPONSE => "EC no response",
        RETURN_BAD_PARAM => "invalid parameter",
        RETURN_UNEXPECTED => "unexpected error",
        _ => "unknown return code",
    }
}

// ── LED slots ──

/// The presence bitmask covers 8 slots; bit 7 is unused on known boards.
pub const MAX_LED_SLOTS: u8 = 8;

/// Fixed slot names, indexed by slot id.
pub const LED_NAMES: [&str; 7] = [
    "Power", "HDD", "Skull", "Eyes", "Front 1", "Front 2", "Front 3",
];

/// Display name for a slot id. Slots past the known table render as "Unknown".
pub fn led_name(slot_id: u8) -> &'static str {
    LED_NAMES.get(slot_id as usize).copied().unwrap_or("Unknown")
}

// ── Color types ──

/// Color-type capability bits, lowest to highest.
pub const COLOR_TYPE_NAMES: [&str; 3] = ["Blue/Amber", "Blue/White", "RGB"];

/// Name for a color-type capability bitmask.
///
/// When multiple bits are set only the lowest set bit's name is shown;
/// the firmware reports one primary color type per LED and the report
/// format has always displayed a single value.
pub fn color_type_name(flags: u8) -> &'static str {
    if flags == 0 {
        return "Unknown";
    }
    COLOR_TYPE_NAMES
        .get(flags.trailing_zeros() as usize)
        .copied()
        .unwrap_or("Unknown")
}

// ── Name tables for indicator parameters ──

/// HDD activity `behavior` byte values.
pub const FLASH_BEHAVIOR_NAMES: [&str; 2] = [
    "Normally off, ON when active",
    "Normally on, OFF when active",
];

/// Ethernet `port` byte values.
pub const ETHERNET_PORT_NAMES: [&str; 3] = ["LAN1", "LAN2", "LAN1 + LAN2"];

/// Power-limit `scheme` byte values.
pub const POWER_LIMIT_SCHEME_NAMES: [&str; 2] = ["Green to Red", "Single Color"];

pub fn flash_behavior_name(code: u8) -> &'static str {
    FLASH_BEHAVIOR_NAMES.get(code as usize).copied().unwrap_or("Unknown")
}

pub fn ethernet_port_name(code: u8) -> &'static str {
    ETHERNET_PORT_NAMES.get(code as usize).copied().unwrap_or("Unknown")
}

pub fn power_limit_scheme_name(code: u8) -> &'static str {
    POWER_LIMIT_SCHEME_NAMES.get(code as usize).copied().unwrap_or("Unknown")
}

// ── Rendering ──

/// Fixed capacity of the rendered report, matching the classic
/// 4096-byte proc buffer. Exceeding it truncates, never corrupts.
pub const RENDER_BUFFER_SIZE: usize = 4096;
