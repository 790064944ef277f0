//! Proc-file style front end: windowed reads and swallow-and-ack writes.
//!
//! [`LedController`] serializes all firmware traffic behind one lock, so
//! a read's query burst and a write's parse-dispatch sequence each run
//! without interleaving. Every request builds its own state; nothing is
//! cached between requests.

use std::sync::{Mutex, PoisonError};

use crate::command::Command;
use crate::directory;
use crate::error::Result;
use crate::gateway::WmiGateway;
use crate::protocol::{RETURN_SUCCESS, return_code_name};
use crate::render;

pub struct LedController<G> {
    gateway: Mutex<G>,
}

impl<G: WmiGateway> LedController<G> {
    pub fn new(gateway: G) -> Self {
        LedController { gateway: Mutex::new(gateway) }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, G> {
        // A panic mid-request leaves no state behind worth rejecting.
        self.gateway.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Query every LED, returning the structured snapshots.
    pub fn query(&self) -> Result<Vec<directory::LedSlot>> {
        let gw = self.lock();
        Ok(directory::query_leds(&*gw)?)
    }

    /// Query every LED and render the full text report.
    pub fn read(&self) -> Result<String> {
        let slots = self.query()?;
        Ok(render::render_directory(&slots).into_string())
    }

    /// Windowed read: up to `count` bytes of the report starting at byte
    /// `offset`. An offset at or past the end yields an empty string. The
    /// report is rebuilt per call.
    pub fn read_window(&self, offset: usize, count: usize) -> Result<String> {
        let text = self.read()?;
        if offset >= text.len() {
            return Ok(String::new());
        }
        let mut end = (offset + count).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        Ok(text[offset..end].to_string())
    }

    /// Handle one written command line with proc-file semantics: the full
    /// input length is always acknowledged, and failures are only logged.
    /// Bad lines must not error the writer, or naive `echo` scripts would
    /// loop forever retrying.
    pub fn write(&self, input: &str) -> usize {
        match Command::parse(input) {
            Ok(cmd) => {
                let gw = self.lock();
                match cmd.apply(&*gw) {
                    Ok(status) if status != RETURN_SUCCESS => {
                        log::warn!(
                            "LED command returned 0x{status:02X} ({})",
                            return_code_name(status)
                        );
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("Unable to set LED state: {e}"),
                }
            }
            Err(e) => log::warn!("{e} while setting LED state"),
        }
        input.len()
    }

    /// Strict variant of [`write`](Self::write) for callers that want the
    /// firmware status instead of the acknowledge-everything contract.
    pub fn apply(&self, cmd: Command) -> Result<u8> {
        let gw = self.lock();
        Ok(cmd.apply(&*gw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MethodArgs;
    use crate::gateway::mock::MockGateway;
    use crate::protocol::{
        METHOD_GET_STATUS, METHOD_QUERY_LED, METHOD_SET_INDICATOR, QUERY_COLOR_TYPE,
        QUERY_INDICATOR_SUPPORT, QUERY_PRESENT_LEDS, STATUS_CURRENT_INDICATOR,
    };

    fn controller_with_one_disabled_led() -> LedController<MockGateway> {
        let gw = MockGateway::new();
        gw.respond(METHOD_QUERY_LED, MethodArgs::new(QUERY_PRESENT_LEDS, 0, 0, 0), 0b1);
        gw.respond(METHOD_QUERY_LED, MethodArgs::new(QUERY_COLOR_TYPE, 0, 0, 0), 0b001);
        gw.respond(METHOD_QUERY_LED, MethodArgs::new(QUERY_INDICATOR_SUPPORT, 0, 0, 0), 0x41);
        gw.respond(METHOD_GET_STATUS, MethodArgs::new(STATUS_CURRENT_INDICATOR, 0, 0, 0), 6);
        LedController::new(gw)
    }

    #[test]
    fn read_renders_report() {
        let ctl = controller_with_one_disabled_led();
        let text = ctl.read().unwrap();
        assert!(text.starts_with("LED 0 (Power) - Color type: Blue/Amber\n"));
        assert!(text.ends_with("  Current indicator: Disable\n"));
    }

    #[test]
    fn read_window_slices_and_clamps() {
        // The mock consumes its script per call, so each window gets a
        // fresh controller.
        assert_eq!(controller_with_one_disabled_led().read_window(0, 5).unwrap(), "LED 0");
        assert_eq!(controller_with_one_disabled_led().read_window(4, 9).unwrap(), "0 (Power)");
        assert_eq!(controller_with_one_disabled_led().read_window(100_000, 10).unwrap(), "");
        // Count past the end clamps to the report length.
        let full = controller_with_one_disabled_led().read().unwrap();
        assert_eq!(controller_with_one_disabled_led().read_window(0, 100_000).unwrap(), full);
    }

    #[test]
    fn read_failure_propagates() {
        let ctl = LedController::new(MockGateway::new());
        assert!(ctl.read().is_err());
    }

    #[test]
    fn write_acknowledges_valid_command() {
        let gw = MockGateway::new();
        gw.respond(METHOD_SET_INDICATOR, MethodArgs::new(0, 6, 0, 0), 0x00);
        let ctl = LedController::new(gw);
        let line = "set_indicator,0,6\n";
        assert_eq!(ctl.write(line), line.len());
        assert_eq!(ctl.lock().calls.borrow()[0], (METHOD_SET_INDICATOR, [0, 6, 0, 0]));
    }

    #[test]
    fn write_acknowledges_garbage_without_dispatching() {
        let ctl = LedController::new(MockGateway::new());
        let line = "make_coffee,0,1\n";
        assert_eq!(ctl.write(line), line.len());
        assert_eq!(ctl.lock().call_count(), 0);
    }

    #[test]
    fn write_acknowledges_firmware_failure() {
        // Unscripted mock: the dispatch fails, the write is still acked.
        let ctl = LedController::new(MockGateway::new());
        let line = "set_indicator,0,6";
        assert_eq!(ctl.write(line), line.len());
        assert_eq!(ctl.lock().call_count(), 1);
    }

    #[test]
    fn apply_reports_firmware_status() {
        let gw = MockGateway::new();
        gw.respond(METHOD_SET_INDICATOR, MethodArgs::new(0, 1, 0, 0), 0xE1);
        let ctl = LedController::new(gw);
        let status = ctl.apply(Command::SetIndicator { led_id: 0, indicator_id: 1 }).unwrap();
        assert_eq!(status, 0xE1);
    }

    #[test]
    fn apply_propagates_gateway_error() {
        let ctl = LedController::new(MockGateway::new());
        assert!(ctl.apply(Command::SetIndicator { led_id: 0, indicator_id: 1 }).is_err());
    }
}
