//! Firmware call gateway — trait + `acpi_call` backend.
//!
//! The firmware is driven through a single method-invocation primitive:
//! method id plus a fixed 4-byte argument record, returning a byte buffer
//! whose byte at offset 1 carries the result. [`WmiGateway`] is the seam;
//! [`AcpiCallGateway`] evaluates the board's WMI method through the
//! `acpi_call` debugfs interface, and `mock::MockGateway` backs the tests.

use std::fmt;
use std::path::PathBuf;

use crate::protocol::RESPONSE_DATA_OFFSET;

// ── Error type ──

/// Gateway errors.
///
/// Any transport failure is fatal to the enclosing read or write operation;
/// no retries are performed at this layer.
#[derive(Debug)]
pub enum GatewayError {
    /// The call transport reported failure or could not be reached.
    Unavailable(String),
    /// The call succeeded but returned fewer bytes than the fixed
    /// header + data byte the protocol guarantees.
    ShortResponse(usize),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Unavailable(e) => write!(f, "Firmware call failed: {e}"),
            GatewayError::ShortResponse(len) => {
                write!(f, "Firmware response too short: {len} bytes")
            }
        }
    }
}

impl std::error::Error for GatewayError {}

pub type Result<T> = std::result::Result<T, GatewayError>;

// ── Argument record ──

/// The fixed 4-byte argument block every LED method takes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MethodArgs {
    pub arg1: u8,
    pub arg2: u8,
    pub arg3: u8,
    pub arg4: u8,
}

impl MethodArgs {
    pub fn new(arg1: u8, arg2: u8, arg3: u8, arg4: u8) -> Self {
        MethodArgs { arg1, arg2, arg3, arg4 }
    }

    pub fn bytes(self) -> [u8; 4] {
        [self.arg1, self.arg2, self.arg3, self.arg4]
    }
}

// ── Trait ──

pub trait WmiGateway {
    /// Invoke a firmware method. The returned buffer is owned by the caller
    /// and carries the semantic byte at [`RESPONSE_DATA_OFFSET`].
    fn invoke(&self, method_id: u8, args: MethodArgs) -> Result<Vec<u8>>;

    /// Invoke a method and extract the single status/data byte.
    fn invoke_byte(&self, method_id: u8, args: MethodArgs) -> Result<u8> {
        let buf = self.invoke(method_id, args)?;
        buf.get(RESPONSE_DATA_OFFSET)
            .copied()
            .ok_or(GatewayError::ShortResponse(buf.len()))
    }
}

// ── acpi_call backend ──

/// Gateway over the `acpi_call` kernel module's debugfs interface.
///
/// A method invocation is written as `<method> <instance> <method_id>
/// b<hex args>` and the reply is read back from the same file. The ACPI
/// method path for the LED WMI block differs per board DSDT (it is the
/// `WMxx` method mapped to [`crate::protocol::NUCLED_WMI_GUID`]), so it
/// comes from configuration rather than a hardcoded default.
#[derive(Debug)]
pub struct AcpiCallGateway {
    call_path: PathBuf,
    method: String,
    instance: u8,
}

impl AcpiCallGateway {
    pub fn new(call_path: impl Into<PathBuf>, method: &str, instance: u8) -> Result<Self> {
        let method = method.trim();
        if method.is_empty() {
            return Err(GatewayError::Unavailable(
                "no ACPI method configured; set acpi_method in the config \
                 to the WM?? method for the LED WMI GUID (see /sys/bus/wmi)"
                    .into(),
            ));
        }
        Ok(AcpiCallGateway {
            call_path: call_path.into(),
            method: method.to_string(),
            instance,
        })
    }
}

impl WmiGateway for AcpiCallGateway {
    fn invoke(&self, method_id: u8, args: MethodArgs) -> Result<Vec<u8>> {
        let [a1, a2, a3, a4] = args.bytes();
        let request = format!(
            "{} {} {} b{a1:02x}{a2:02x}{a3:02x}{a4:02x}",
            self.method, self.instance, method_id
        );
        std::fs::write(&self.call_path, &request).map_err(|e| {
            GatewayError::Unavailable(format!("{}: {e}", self.call_path.display()))
        })?;
        let raw = std::fs::read_to_string(&self.call_path).map_err(|e| {
            GatewayError::Unavailable(format!("{}: {e}", self.call_path.display()))
        })?;
        parse_acpi_call_reply(&raw)
    }
}

/// Parse an `acpi_call` reply into the raw response buffer.
///
/// Replies look like `{0x00, 0x05, 0x00}` for buffers, `0x1f` for plain
/// integers, or `Error: AE_NOT_FOUND` on evaluation failure. Output is
/// NUL-terminated by the module.
pub fn parse_acpi_call_reply(raw: &str) -> Result<Vec<u8>> {
    let reply = raw.trim_matches(['\0', ' ', '\n']);
    if reply.is_empty() || reply == "not called" {
        return Err(GatewayError::Unavailable("no reply from acpi_call".into()));
    }
    if reply.starts_with("Error") {
        return Err(GatewayError::Unavailable(reply.to_string()));
    }
    if let Some(body) = reply.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
        let mut bytes = Vec::new();
        for item in body.split(',') {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            let value = item
                .strip_prefix("0x")
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| {
                    GatewayError::Unavailable(format!("unparseable reply byte: {item}"))
                })?;
            bytes.push(value);
        }
        if bytes.len() <= RESPONSE_DATA_OFFSET {
            return Err(GatewayError::ShortResponse(bytes.len()));
        }
        return Ok(bytes);
    }
    if let Some(hex) = reply.strip_prefix("0x") {
        let value = u64::from_str_radix(hex, 16)
            .map_err(|_| GatewayError::Unavailable(format!("unparseable reply: {reply}")))?;
        return Ok(value.to_le_bytes().to_vec());
    }
    Err(GatewayError::Unavailable(format!(
        "unrecognised acpi_call reply: {reply}"
    )))
}

// ── Mock gateway for testing ──

/// In-memory gateway for unit and integration tests.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    /// Scripted gateway: responses keyed by `(method_id, args)`, each call
    /// pops the next queued buffer. Unscripted calls fail as `Unavailable`,
    /// matching a firmware that rejects the method.
    pub struct MockGateway {
        /// Queued responses: (method, args) → response buffers.
        pub responses: RefCell<HashMap<(u8, [u8; 4]), Vec<Vec<u8>>>>,
        /// Recorded invocations in call order.
        pub calls: RefCell<Vec<(u8, [u8; 4])>>,
        /// If set, the call with this 0-based index (and all later ones) fails.
        pub fail_from_call: Cell<Option<usize>>,
    }

    impl Default for MockGateway {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockGateway {
        pub fn new() -> Self {
            MockGateway {
                responses: RefCell::new(HashMap::new()),
                calls: RefCell::new(Vec::new()),
                fail_from_call: Cell::new(None),
            }
        }

        /// Queue a single data byte reply (header byte 0x00 + data).
        pub fn respond(&self, method_id: u8, args: MethodArgs, data: u8) {
            self.respond_raw(method_id, args, vec![0x00, data]);
        }

        /// Queue a raw response buffer.
        pub fn respond_raw(&self, method_id: u8, args: MethodArgs, buf: Vec<u8>) {
            self.responses
                .borrow_mut()
                .entry((method_id, args.bytes()))
                .or_default()
                .push(buf);
        }

        pub fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl WmiGateway for MockGateway {
        fn invoke(&self, method_id: u8, args: MethodArgs) -> Result<Vec<u8>> {
            let index = {
                let mut calls = self.calls.borrow_mut();
                calls.push((method_id, args.bytes()));
                calls.len() - 1
            };
            if let Some(fail_from) = self.fail_from_call.get()
                && index >= fail_from
            {
                return Err(GatewayError::Unavailable("mock: failure injected".into()));
            }
            let mut responses = self.responses.borrow_mut();
            if let Some(queue) = responses.get_mut(&(method_id, args.bytes()))
                && !queue.is_empty()
            {
                return Ok(queue.remove(0));
            }
            Err(GatewayError::Unavailable(format!(
                "no mock response for method 0x{method_id:02X} args {:?}",
                args.bytes()
            )))
        }
    }
}
