//! Interface boundary to the cooperative protocol engine.
//!
//! The engine is consumed as an opaque unit: it is single-threaded and
//! cooperative, so every `&mut self` method here must only ever be called
//! from the one processing context that owns the binding. Producers never
//! call into the engine; they signal the bridge instead.

use core::fmt;

/// Upcall installed into the engine at bind time.
///
/// The engine invokes it whenever tasklets become ready so the bridge can
/// schedule another processing pass. Capture-free by construction, so it is
/// safe to call from the engine while it runs cooperatively.
pub type WakeSignal = fn();

/// Opaque engine-defined failure code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineFault(pub u8);

impl fmt::Display for EngineFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fault {}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EngineFault {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "fault {}", self.0);
    }
}

/// Link-layer extended address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtAddress(pub [u8; 8]);

impl fmt::Display for ExtAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ":")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ExtAddress {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=[u8; 8]:x}", self.0);
    }
}

/// Message-buffer accounting exposed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferInfo {
    /// Total buffers in the engine's pool
    pub total: u16,
    /// Currently free buffers
    pub free: u16,
    /// High-water mark of buffers in use
    pub max_used: u16,
}

/// The externally supplied, single-threaded cooperative protocol engine.
///
/// `bind` runs once during stack initialization. The `handle_*` and
/// `process_tasklets` entry points are dispatch targets for queued events
/// and run serialized on the processing context. The remaining methods are
/// pure state reads; the bridge snapshots them after each processing pass so
/// foreign threads never touch the engine directly.
pub trait Engine: Send {
    /// One-time setup. Installs `wake` as the engine's tasklets-pending
    /// upcall. A failure here aborts stack initialization.
    fn bind(&mut self, wake: WakeSignal) -> Result<(), EngineFault>;

    /// Run the engine's ready tasklets.
    fn process_tasklets(&mut self) -> Result<(), EngineFault>;

    /// Millisecond alarm expired.
    fn handle_alarm(&mut self) -> Result<(), EngineFault>;

    /// Microsecond alarm expired.
    fn handle_alarm_micro(&mut self) -> Result<(), EngineFault>;

    /// Radio event; `arg` identifies the frame or state change.
    fn handle_radio(&mut self, arg: usize) -> Result<(), EngineFault>;

    /// Auxiliary UART event.
    fn handle_uart(&mut self, arg: usize) -> Result<(), EngineFault>;

    /// Whether the node is attached to a mesh partition.
    fn is_attached(&self) -> bool;

    /// Whether the protocol is enabled.
    fn is_enabled(&self) -> bool;

    /// The link-layer extended address.
    fn ext_address(&self) -> ExtAddress;

    /// Message-buffer accounting.
    fn buffer_info(&self) -> BufferInfo;
}
