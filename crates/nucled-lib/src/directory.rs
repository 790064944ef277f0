//! LED discovery and per-slot state snapshots.
//!
//! The firmware reports which of the 8 LED slots are populated as a
//! presence bitmask; each present slot is then queried for its color-type
//! capability, its supported-indicator bitmask, its active indicator, and
//! that indicator's full parameter block.

use serde::Serialize;

use crate::gateway::{MethodArgs, Result, WmiGateway};
use crate::indicator::{IndicatorKind, IndicatorParams};
use crate::protocol::{
    MAX_LED_SLOTS, METHOD_GET_STATUS, METHOD_QUERY_LED, QUERY_COLOR_TYPE,
    QUERY_INDICATOR_SUPPORT, QUERY_PRESENT_LEDS, STATUS_CURRENT_INDICATOR, led_name,
};

/// Snapshot of one populated LED slot.
#[derive(Debug, Clone, Serialize)]
pub struct LedSlot {
    /// Slot id, 0-7.
    pub slot_id: u8,
    /// Fixed display name for the slot.
    pub name: &'static str,
    /// Color-type capability bitmask.
    pub color_types: u8,
    /// Supported-indicator bitmask (bit n = indicator code n).
    pub supported_indicators: u8,
    /// Active indicator code as reported by the firmware. May be a code
    /// this build does not know; rendering then shows "Unknown".
    pub current_indicator: u8,
    /// Decoded parameters of the active indicator.
    pub params: IndicatorParams,
}

impl LedSlot {
    /// Indicator kinds this slot supports, in code order.
    pub fn supported_kinds(&self) -> impl Iterator<Item = IndicatorKind> + '_ {
        IndicatorKind::ALL
            .into_iter()
            .filter(|kind| self.supported_indicators & kind.bit() != 0)
    }
}

/// Query the presence bitmask and build a snapshot of every populated slot.
///
/// Slots are visited in ascending id order. Any firmware failure mid-scan
/// aborts the whole query; a partial directory is never returned.
pub fn query_leds(gw: &impl WmiGateway) -> Result<Vec<LedSlot>> {
    let present = gw.invoke_byte(METHOD_QUERY_LED, MethodArgs::new(QUERY_PRESENT_LEDS, 0, 0, 0))?;
    log::debug!("LED presence bitmask: 0x{present:02X}");
    let mut slots = Vec::new();
    for slot_id in 0..MAX_LED_SLOTS {
        if present & (1 << slot_id) != 0 {
            slots.push(query_led(gw, slot_id)?);
        }
    }
    Ok(slots)
}

/// Build the snapshot for a single slot.
pub fn query_led(gw: &impl WmiGateway, slot_id: u8) -> Result<LedSlot> {
    let color_types =
        gw.invoke_byte(METHOD_QUERY_LED, MethodArgs::new(QUERY_COLOR_TYPE, slot_id, 0, 0))?;
    let supported_indicators = gw.invoke_byte(
        METHOD_QUERY_LED,
        MethodArgs::new(QUERY_INDICATOR_SUPPORT, slot_id, 0, 0),
    )?;
    let current_indicator = gw.invoke_byte(
        METHOD_GET_STATUS,
        MethodArgs::new(STATUS_CURRENT_INDICATOR, slot_id, 0, 0),
    )?;
    let params = IndicatorParams::fetch(gw, slot_id, current_indicator)?;
    Ok(LedSlot {
        slot_id,
        name: led_name(slot_id),
        color_types,
        supported_indicators,
        current_indicator,
        params,
    })
}
