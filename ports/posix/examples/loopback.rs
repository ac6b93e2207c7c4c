//! Drives the stack singleton with a counting engine on the host.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use mesh_bridge::{
    init_thread_stack, platform_alarm_signal, platform_radio_signal, platform_uart_signal,
    stack_mgr, stack_mgr_platform,
};
use mesh_core::{BufferInfo, Engine, EngineFault, ExtAddress, WakeSignal};
use mesh_posix::StackThread;

#[derive(Default)]
struct CountingEngine {
    dispatched: Arc<AtomicUsize>,
}

impl CountingEngine {
    fn bump(&self) -> Result<(), EngineFault> {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl Engine for CountingEngine {
    fn bind(&mut self, _wake: WakeSignal) -> Result<(), EngineFault> {
        Ok(())
    }

    fn process_tasklets(&mut self) -> Result<(), EngineFault> {
        self.bump()
    }

    fn handle_alarm(&mut self) -> Result<(), EngineFault> {
        self.bump()
    }

    fn handle_alarm_micro(&mut self) -> Result<(), EngineFault> {
        self.bump()
    }

    fn handle_radio(&mut self, _arg: usize) -> Result<(), EngineFault> {
        self.bump()
    }

    fn handle_uart(&mut self, _arg: usize) -> Result<(), EngineFault> {
        self.bump()
    }

    fn is_attached(&self) -> bool {
        true
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn ext_address(&self) -> ExtAddress {
        ExtAddress([0x1a, 0x2b, 0x3c, 0x4d, 0x5e, 0x6f, 0x70, 0x81])
    }

    fn buffer_info(&self) -> BufferInfo {
        BufferInfo {
            total: 16,
            free: 16,
            max_used: 0,
        }
    }
}

fn main() {
    let engine = CountingEngine::default();
    let dispatched = engine.dispatched.clone();

    init_thread_stack(Box::leak(Box::new(engine))).expect("stack init");
    let worker = StackThread::spawn_singleton().expect("spawn processing thread");

    // Pretend to be the platform runtime for a moment
    for arg in 0..10 {
        platform_radio_signal(arg);
        platform_alarm_signal();
        platform_uart_signal(arg);
    }

    thread::sleep(Duration::from_millis(50));

    println!(
        "dispatched {} events, ext address {}",
        dispatched.load(Ordering::Relaxed),
        stack_mgr().ext_address().expect("initialized")
    );
    println!(
        "buffers: {:?}, dropped: {}",
        stack_mgr_platform().buffer_info().expect("initialized"),
        stack_mgr_platform().dropped_events()
    );

    stack_mgr().shutdown().expect("shutdown");
    worker.join();
}
