//! Process-wide stack manager singleton and interrupt-glue entry points.
//!
//! Exactly one bridge instance exists per process. Portable code reaches it
//! through [`stack_mgr`]; platform glue that needs the processing loop or
//! diagnostics uses [`stack_mgr_platform`]. Both accessors resolve to the
//! same underlying object.

use mesh_core::{Engine, EventKind, Result};

use crate::bridge::{EventBridge, StackControl};
use crate::{DEFAULT_EVENT_QUEUE_DEPTH, DEFAULT_RADIO_QUEUE_DEPTH};

/// The singleton's concrete type, at the default queue depths.
pub type StackManager = EventBridge<DEFAULT_EVENT_QUEUE_DEPTH, DEFAULT_RADIO_QUEUE_DEPTH>;

static INSTANCE: StackManager = StackManager::new();

/// The portable surface of the stack manager singleton.
pub fn stack_mgr() -> &'static dyn StackControl {
    &INSTANCE
}

/// The platform surface of the stack manager singleton.
pub fn stack_mgr_platform() -> &'static StackManager {
    &INSTANCE
}

/// Bind the singleton to an engine, wiring this crate's tasklet entry point
/// as the engine's wake upcall.
pub fn init_thread_stack(engine: &'static mut dyn Engine) -> Result<()> {
    INSTANCE.init_stack(engine, tasklets_signal_pending)
}

// Entry points below are invoked by the platform runtime on timer, radio,
// tasklet and UART events. Each resolves to a signal_event call and returns
// quickly; queue loss is recorded by the drop counters, which is all an ISR
// can do with it.

/// Millisecond alarm fired.
pub fn platform_alarm_signal() {
    let _ = INSTANCE.signal_event(EventKind::Alarm, 0);
}

/// Microsecond alarm fired.
pub fn platform_alarm_micro_signal() {
    let _ = INSTANCE.signal_event(EventKind::AlarmMicro, 0);
}

/// Radio event with an opaque payload word.
pub fn platform_radio_signal(arg: usize) {
    let _ = INSTANCE.signal_event(EventKind::Radio, arg);
}

/// Auxiliary UART event with an opaque payload word.
pub fn platform_uart_signal(arg: usize) {
    let _ = INSTANCE.signal_event(EventKind::Uart, arg);
}

/// The engine has tasklets ready to run. Also the `WakeSignal` installed
/// into the engine by [`init_thread_stack`].
pub fn tasklets_signal_pending() {
    let _ = INSTANCE.signal_event(EventKind::TaskletsPending, 0);
}
