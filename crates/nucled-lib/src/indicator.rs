//! Indicator modes and their parameter payloads.
//!
//! Each indicator kind carries a fixed-size, byte-packed parameter block.
//! The firmware only hands the block out one byte at a time (one
//! `METHOD_GET_STATUS` call per item), so [`IndicatorParams::fetch`] issues
//! the per-item queries and then decodes the flat buffer field by field.

use serde::Serialize;

use crate::gateway::{MethodArgs, Result, WmiGateway};
use crate::protocol::{METHOD_GET_STATUS, STATUS_INDICATOR_VALUE};

// ── Kinds ──

/// Indicator option codes as reported by `STATUS_CURRENT_INDICATOR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IndicatorKind {
    PowerState,
    HddActivity,
    Ethernet,
    Wifi,
    Software,
    PowerLimit,
    Disable,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 7] = [
        IndicatorKind::PowerState,
        IndicatorKind::HddActivity,
        IndicatorKind::Ethernet,
        IndicatorKind::Wifi,
        IndicatorKind::Software,
        IndicatorKind::PowerLimit,
        IndicatorKind::Disable,
    ];

    /// Kind for a raw firmware code. `None` for codes newer firmware may
    /// report that this build does not know about.
    pub fn from_code(code: u8) -> Option<IndicatorKind> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u8 {
        match self {
            IndicatorKind::PowerState => 0,
            IndicatorKind::HddActivity => 1,
            IndicatorKind::Ethernet => 2,
            IndicatorKind::Wifi => 3,
            IndicatorKind::Software => 4,
            IndicatorKind::PowerLimit => 5,
            IndicatorKind::Disable => 6,
        }
    }

    /// Bit in the supported-indicator bitmask.
    pub fn bit(self) -> u8 {
        1 << self.code()
    }

    pub fn name(self) -> &'static str {
        match self {
            IndicatorKind::PowerState => "Power state",
            IndicatorKind::HddActivity => "HDD Activity",
            IndicatorKind::Ethernet => "Ethernet",
            IndicatorKind::Wifi => "Wifi",
            IndicatorKind::Software => "Software",
            IndicatorKind::PowerLimit => "Power Limit",
            IndicatorKind::Disable => "Disable",
        }
    }

    /// Fixed parameter payload length in bytes.
    pub fn payload_len(self) -> usize {
        match self {
            IndicatorKind::PowerState => 4 * BlinkSpec::LEN,
            IndicatorKind::HddActivity => FlashSpec::LEN + 1,
            IndicatorKind::Ethernet => 1 + FlashSpec::LEN,
            IndicatorKind::Wifi => FlashSpec::LEN,
            IndicatorKind::Software => BlinkSpec::LEN,
            IndicatorKind::PowerLimit => 1 + FlashSpec::LEN,
            IndicatorKind::Disable => 0,
        }
    }
}

// ── Parameter records ──

/// RGB triple, one byte per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Brightness + blink behavior + frequency + color.
///
/// `frequency` is in deci-Hz; `behavior` indexes Solid, Breathing,
/// Pulsing, Strobing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BlinkSpec {
    pub brightness: u8,
    pub behavior: u8,
    pub frequency: u8,
    pub color: Rgb,
}

impl BlinkSpec {
    pub const LEN: usize = 6;

    /// Blink behavior names, indexed by the `behavior` byte.
    pub const BEHAVIOR_NAMES: [&'static str; 4] =
        ["Solid", "Breathing", "Pulsing", "Strobing"];

    pub fn behavior_name(&self) -> &'static str {
        Self::BEHAVIOR_NAMES
            .get(self.behavior as usize)
            .copied()
            .unwrap_or("Unknown")
    }

    fn from_bytes(b: &[u8]) -> Option<BlinkSpec> {
        if b.len() < Self::LEN {
            return None;
        }
        Some(BlinkSpec {
            brightness: b[0],
            behavior: b[1],
            frequency: b[2],
            color: Rgb { red: b[3], green: b[4], blue: b[5] },
        })
    }

    fn write_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[
            self.brightness,
            self.behavior,
            self.frequency,
            self.color.red,
            self.color.green,
            self.color.blue,
        ]);
    }
}

/// Brightness + color, used by the activity-driven indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlashSpec {
    pub brightness: u8,
    pub color: Rgb,
}

impl FlashSpec {
    pub const LEN: usize = 4;

    fn from_bytes(b: &[u8]) -> Option<FlashSpec> {
        if b.len() < Self::LEN {
            return None;
        }
        Some(FlashSpec {
            brightness: b[0],
            color: Rgb { red: b[1], green: b[2], blue: b[3] },
        })
    }

    fn write_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[
            self.brightness,
            self.color.red,
            self.color.green,
            self.color.blue,
        ]);
    }
}

// ── Tagged parameter payload ──

/// Decoded parameter block for an active indicator.
///
/// `None` covers `Disable` and any indicator code this build does not
/// recognise; unknown modes degrade to "no details shown" rather than
/// failing the directory build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IndicatorParams {
    PowerState {
        s0: BlinkSpec,
        s3: BlinkSpec,
        ready: BlinkSpec,
        s5: BlinkSpec,
    },
    HddActivity {
        led: FlashSpec,
        behavior: u8,
    },
    Ethernet {
        port: u8,
        led: FlashSpec,
    },
    Wifi {
        led: FlashSpec,
    },
    Software {
        led: BlinkSpec,
    },
    PowerLimit {
        scheme: u8,
        led: FlashSpec,
    },
    None,
}

impl IndicatorParams {
    /// Decode a flat parameter buffer for the given kind.
    ///
    /// Returns `None` when the buffer is shorter than the kind's fixed
    /// layout. Field order and sizes are exactly the wire layout; the
    /// blocks are byte-packed with no padding.
    pub fn decode(kind: IndicatorKind, bytes: &[u8]) -> Option<IndicatorParams> {
        if bytes.len() < kind.payload_len() {
            return None;
        }
        let params = match kind {
            IndicatorKind::PowerState => IndicatorParams::PowerState {
                s0: BlinkSpec::from_bytes(&bytes[0..6])?,
                s3: BlinkSpec::from_bytes(&bytes[6..12])?,
                ready: BlinkSpec::from_bytes(&bytes[12..18])?,
                s5: BlinkSpec::from_bytes(&bytes[18..24])?,
            },
            IndicatorKind::HddActivity => IndicatorParams::HddActivity {
                led: FlashSpec::from_bytes(&bytes[0..4])?,
                behavior: bytes[4],
            },
            IndicatorKind::Ethernet => IndicatorParams::Ethernet {
                port: bytes[0],
                led: FlashSpec::from_bytes(&bytes[1..5])?,
            },
            IndicatorKind::Wifi => IndicatorParams::Wifi {
                led: FlashSpec::from_bytes(&bytes[0..4])?,
            },
            IndicatorKind::Software => IndicatorParams::Software {
                led: BlinkSpec::from_bytes(&bytes[0..6])?,
            },
            IndicatorKind::PowerLimit => IndicatorParams::PowerLimit {
                scheme: bytes[0],
                led: FlashSpec::from_bytes(&bytes[1..5])?,
            },
            IndicatorKind::Disable => IndicatorParams::None,
        };
        Some(params)
    }

    /// Re-encode the payload as field-order concatenated bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            IndicatorParams::PowerState { s0, s3, ready, s5 } => {
                s0.write_bytes(&mut out);
                s3.write_bytes(&mut out);
                ready.write_bytes(&mut out);
                s5.write_bytes(&mut out);
            }
            IndicatorParams::HddActivity { led, behavior } => {
                led.write_bytes(&mut out);
                out.push(*behavior);
            }
            IndicatorParams::Ethernet { port, led } => {
                out.push(*port);
                led.write_bytes(&mut out);
            }
            IndicatorParams::Wifi { led } => led.write_bytes(&mut out),
            IndicatorParams::Software { led } => led.write_bytes(&mut out),
            IndicatorParams::PowerLimit { scheme, led } => {
                out.push(*scheme);
                led.write_bytes(&mut out);
            }
            IndicatorParams::None => {}
        }
        out
    }

    /// Fetch and decode the parameter block for an LED's active indicator.
    ///
    /// Issues one `METHOD_GET_STATUS` call per payload byte with args
    /// `(STATUS_INDICATOR_VALUE, led_id, indicator_code, item_index)`.
    /// An unrecognised indicator code yields `IndicatorParams::None`;
    /// a failed firmware call aborts with the gateway error.
    pub fn fetch(gw: &impl WmiGateway, led_id: u8, indicator_code: u8) -> Result<IndicatorParams> {
        let Some(kind) = IndicatorKind::from_code(indicator_code) else {
            log::warn!("LED {led_id}: unexpected indicator option {indicator_code}");
            return Ok(IndicatorParams::None);
        };
        let len = kind.payload_len();
        let mut bytes = Vec::with_capacity(len);
        for item in 0..len {
            let byte = gw.invoke_byte(
                METHOD_GET_STATUS,
                MethodArgs::new(STATUS_INDICATOR_VALUE, led_id, indicator_code, item as u8),
            )?;
            bytes.push(byte);
        }
        // Length is exact by construction, so decode cannot come up short.
        Ok(IndicatorParams::decode(kind, &bytes).unwrap_or(IndicatorParams::None))
    }
}
