//! Text rendering of the LED directory.
//!
//! Output is the fixed human-readable report historically served from the
//! proc file: one block per populated slot, blank-line separated, with a
//! per-mode detail section. The layout is stable byte for byte so existing
//! scrapers keep working.

use std::fmt::{self, Write};

use crate::directory::LedSlot;
use crate::indicator::{BlinkSpec, FlashSpec, IndicatorKind, IndicatorParams};
use crate::protocol::{
    RENDER_BUFFER_SIZE, color_type_name, ethernet_port_name, flash_behavior_name,
    power_limit_scheme_name,
};

// ── Capped buffer ──

/// Append-only text buffer with a fixed byte capacity.
///
/// Writes past the capacity are dropped at a char boundary and the buffer
/// is flagged truncated; writing never fails or reallocates past the cap.
#[derive(Debug)]
pub struct RenderBuffer {
    buf: String,
    truncated: bool,
}

impl RenderBuffer {
    pub fn new() -> Self {
        RenderBuffer { buf: String::with_capacity(RENDER_BUFFER_SIZE), truncated: false }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// True once any write has been dropped for lack of space.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for RenderBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = RENDER_BUFFER_SIZE - self.buf.len();
        if s.len() <= room {
            self.buf.push_str(s);
            return Ok(());
        }
        self.truncated = true;
        let mut cut = room;
        while cut > 0 && !s.is_char_boundary(cut) {
            cut -= 1;
        }
        self.buf.push_str(&s[..cut]);
        Ok(())
    }
}

// ── Directory rendering ──

/// Render the full directory report into a fresh buffer.
pub fn render_directory(slots: &[LedSlot]) -> RenderBuffer {
    let mut out = RenderBuffer::new();
    for (i, slot) in slots.iter().enumerate() {
        render_slot(&mut out, slot);
        if i + 1 < slots.len() {
            let _ = out.write_str("\n\n");
        }
    }
    if out.is_truncated() {
        log::warn!("LED report exceeded {RENDER_BUFFER_SIZE} bytes, output truncated");
    }
    out
}

fn render_slot(out: &mut RenderBuffer, slot: &LedSlot) {
    // Writes into RenderBuffer never fail.
    let _ = write!(
        out,
        "LED {} ({}) - Color type: {}\n",
        slot.slot_id,
        slot.name,
        color_type_name(slot.color_types)
    );

    let _ = out.write_str("  Supported indicators: ");
    for kind in slot.supported_kinds() {
        let _ = write!(out, "{}  ", kind.name());
    }

    let current = IndicatorKind::from_code(slot.current_indicator)
        .map(IndicatorKind::name)
        .unwrap_or("Unknown");
    let _ = write!(out, "\n  Current indicator: {current}\n");

    match &slot.params {
        IndicatorParams::PowerState { s0, s3, ready, s5 } => {
            let _ = out.write_str("\n        S0 (On): ");
            render_blink(out, s0);
            let _ = out.write_str("\n     S3 (Sleep): ");
            render_blink(out, s3);
            let _ = out.write_str("\n     Ready mode: ");
            render_blink(out, ready);
            let _ = out.write_str("\n  S5 (Soft off): ");
            render_blink(out, s5);
            let _ = out.write_str("\n");
        }
        IndicatorParams::HddActivity { led, behavior } => {
            let _ = out.write_str("\n  HDD LED: ");
            render_flash(out, led);
            let _ = write!(out, " {}\n", flash_behavior_name(*behavior));
        }
        IndicatorParams::Ethernet { port, led } => {
            let _ = write!(out, "\n  Ethernet LED: {}  ", ethernet_port_name(*port));
            render_flash(out, led);
            let _ = out.write_str("\n");
        }
        IndicatorParams::Wifi { led } => {
            let _ = out.write_str("\n  Wifi LED: ");
            render_flash(out, led);
            let _ = out.write_str("\n");
        }
        IndicatorParams::Software { led } => {
            let _ = out.write_str("\n  Software LED: ");
            render_blink(out, led);
            let _ = out.write_str("\n");
        }
        IndicatorParams::PowerLimit { scheme, led } => {
            let _ = write!(out, "\n  Power Limit LED: {}  ", power_limit_scheme_name(*scheme));
            render_flash(out, led);
            let _ = out.write_str("\n");
        }
        IndicatorParams::None => {}
    }
}

fn render_blink(out: &mut RenderBuffer, led: &BlinkSpec) {
    let _ = write!(
        out,
        "{}% {} rgb({},{},{}) ({} dHz)",
        led.brightness,
        led.behavior_name(),
        led.color.red,
        led.color.green,
        led.color.blue,
        led.frequency
    );
}

fn render_flash(out: &mut RenderBuffer, led: &FlashSpec) {
    let _ = write!(
        out,
        "{}% rgb({},{},{})",
        led.brightness, led.color.red, led.color.green, led.color.blue
    );
}
