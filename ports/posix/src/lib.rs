//! POSIX-specific hosting for the mesh stack processing thread.
//!
//! On an RTOS target the processing loop runs in a dedicated task; on a
//! POSIX host it runs in a named OS thread owned by [`StackThread`]. The
//! loop is the single consumer of the bridge queues: it drains pending
//! events, sleeps briefly when idle, and exits cooperatively at the first
//! loop boundary after the bridge shuts down.

use std::io;
use std::thread;
use std::time::Duration;

use mesh_bridge::{stack_mgr_platform, EventBridge, StackManager};
use mesh_core::Error;

/// Sleep between drain passes that dispatched nothing.
const IDLE_SLEEP: Duration = Duration::from_millis(1);

/// Handle to the dedicated processing thread.
///
/// Spawn after the bridge has been initialized; the thread stops on its own
/// once `shutdown` is called on the bridge.
pub struct StackThread {
    handle: thread::JoinHandle<()>,
}

impl StackThread {
    /// Spawn the processing thread for an explicit bridge instance.
    pub fn spawn<const NQ: usize, const RQ: usize>(
        bridge: &'static EventBridge<NQ, RQ>,
    ) -> io::Result<Self> {
        let handle = thread::Builder::new()
            .name("mesh-stack".into())
            .spawn(move || {
                log::info!("mesh stack processing thread started");
                loop {
                    match bridge.process_pending_events() {
                        Ok(0) => thread::sleep(IDLE_SLEEP),
                        Ok(_) => {}
                        // Shutdown releases the engine binding; observe it
                        // here, at the loop boundary.
                        Err(Error::NotInitialized) => break,
                        Err(err) => {
                            log::warn!("processing pass failed: {err}");
                            thread::sleep(IDLE_SLEEP);
                        }
                    }
                }
                log::info!("mesh stack processing thread stopped");
            })?;
        Ok(Self { handle })
    }

    /// Spawn the processing thread for the process-wide stack singleton.
    pub fn spawn_singleton() -> io::Result<Self> {
        let bridge: &'static StackManager = stack_mgr_platform();
        Self::spawn(bridge)
    }

    /// Whether the processing thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the processing thread to exit.
    ///
    /// Call after shutting down the bridge, otherwise this blocks for the
    /// lifetime of the stack.
    pub fn join(self) {
        let _ = self.handle.join();
    }
}
