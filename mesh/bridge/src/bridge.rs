//! The event bridge: ordered, single-consumer dispatch into the engine.

use core::cell::RefCell;

use critical_section::Mutex;
use mesh_core::{
    BufferInfo, Engine, Error, EventKind, EventMessage, ExtAddress, QueueClass, Result, WakeSignal,
};

use crate::config::BridgeConfig;
use crate::queue::SignalQueue;

/// Portable surface of the stack manager.
///
/// Application code that only needs to start, stop, signal and observe the
/// stack depends on this trait; platform glue reaches the wider concrete
/// surface through [`stack_mgr_platform`](crate::stack_mgr_platform). Both
/// views resolve to the same underlying instance.
pub trait StackControl: Sync {
    /// Bind the bridge to an already-constructed engine.
    fn init_stack(&self, engine: &'static mut dyn Engine, wake: WakeSignal) -> Result<()>;

    /// Request stop; honored at the next processing-loop boundary.
    fn shutdown(&self) -> Result<()>;

    /// Enqueue an event from any context, including interrupt context.
    fn signal_event(&self, kind: EventKind, arg: usize) -> Result<()>;

    /// Whether the node is attached to a mesh partition.
    fn is_thread_attached(&self) -> Result<bool>;

    /// Whether the protocol is enabled.
    fn is_thread_enabled(&self) -> Result<bool>;

    /// The link-layer extended address.
    fn ext_address(&self) -> Result<ExtAddress>;
}

struct Shared {
    /// Engine binding. Physically removed from this cell for the duration
    /// of a drain pass so no critical section is held across engine
    /// dispatch.
    engine: Option<&'static mut dyn Engine>,
    running: bool,
}

/// Engine state republished after every processing pass. Foreign-thread
/// accessors read this snapshot, never the engine itself.
#[derive(Clone, Copy)]
struct Published {
    valid: bool,
    attached: bool,
    enabled: bool,
    ext_address: ExtAddress,
    buffers: BufferInfo,
}

impl Published {
    const INVALID: Self = Self {
        valid: false,
        attached: false,
        enabled: false,
        ext_address: ExtAddress([0; 8]),
        buffers: BufferInfo {
            total: 0,
            free: 0,
            max_used: 0,
        },
    };

    fn snapshot(engine: &dyn Engine) -> Self {
        Self {
            valid: true,
            attached: engine.is_attached(),
            enabled: engine.is_enabled(),
            ext_address: engine.ext_address(),
            buffers: engine.buffer_info(),
        }
    }
}

/// Marshals events from many asynchronous producers into one ordered
/// consumer that drives the cooperative protocol engine.
///
/// `NQ` and `RQ` size the normal and radio queues. The process-wide
/// singleton uses the crate defaults; tests instantiate small bounds
/// directly.
pub struct EventBridge<const NQ: usize, const RQ: usize> {
    config: BridgeConfig,
    normal: SignalQueue<NQ>,
    radio: SignalQueue<RQ>,
    shared: Mutex<RefCell<Shared>>,
    published: Mutex<RefCell<Published>>,
    faults: Mutex<RefCell<u32>>,
}

impl<const NQ: usize, const RQ: usize> EventBridge<NQ, RQ> {
    /// Create a bridge with the default drain policy.
    pub const fn new() -> Self {
        Self::with_config(BridgeConfig::new())
    }

    /// Create a bridge with an explicit drain policy.
    pub const fn with_config(config: BridgeConfig) -> Self {
        Self {
            config,
            normal: SignalQueue::new(),
            radio: SignalQueue::new(),
            shared: Mutex::new(RefCell::new(Shared {
                engine: None,
                running: false,
            })),
            published: Mutex::new(RefCell::new(Published::INVALID)),
            faults: Mutex::new(RefCell::new(0)),
        }
    }

    /// The drain policy in effect.
    pub fn config(&self) -> BridgeConfig {
        self.config
    }

    /// Bind the bridge to one already-constructed engine.
    ///
    /// Installs `wake` as the engine's tasklets-pending upcall, publishes
    /// the initial state snapshot, and marks the bridge active. Fails with
    /// `AlreadyInitialized` on a second call (the first binding is left
    /// unchanged) and `EngineRejected` if the engine's own setup fails.
    pub fn init_stack(&self, engine: &'static mut dyn Engine, wake: WakeSignal) -> Result<()> {
        critical_section::with(|cs| {
            let shared = self.shared.borrow_ref(cs);
            if shared.running || shared.engine.is_some() {
                return Err(Error::AlreadyInitialized);
            }
            Ok(())
        })?;

        // The engine is still exclusively ours here; bind outside any
        // critical section.
        engine.bind(wake).map_err(Error::EngineRejected)?;
        let snapshot = Published::snapshot(&*engine);

        critical_section::with(|cs| {
            let mut shared = self.shared.borrow_ref_mut(cs);
            if shared.running || shared.engine.is_some() {
                return Err(Error::AlreadyInitialized);
            }
            shared.engine = Some(engine);
            shared.running = true;
            *self.published.borrow_ref_mut(cs) = snapshot;
            Ok(())
        })
    }

    /// Request stop and release the engine binding.
    ///
    /// Safe before `init_stack`, safe after a failed init, idempotent, and
    /// safe to call from the processing thread mid-drain: dispatch in
    /// flight completes and the binding is released at the loop boundary.
    /// Queued messages are discarded.
    pub fn shutdown(&self) -> Result<()> {
        critical_section::with(|cs| {
            let mut shared = self.shared.borrow_ref_mut(cs);
            shared.running = false;
            shared.engine = None;
            *self.published.borrow_ref_mut(cs) = Published::INVALID;
        });
        self.normal.clear();
        self.radio.clear();
        Ok(())
    }

    /// Enqueue an event from any context, including interrupt context.
    ///
    /// Never allocates and never blocks beyond a bounded critical section.
    /// Radio events take the priority queue; everything else the normal
    /// queue. Saturation returns `QueueFull` after counting the drop.
    /// Events may be signaled before `init_stack`; they are dispatched once
    /// the stack is running.
    pub fn signal_event(&self, kind: EventKind, arg: usize) -> Result<()> {
        let msg = EventMessage::new(kind, arg);
        match kind.queue_class() {
            QueueClass::Radio => self.radio.try_send(msg),
            QueueClass::Normal => self.normal.try_send(msg),
        }
    }

    /// Drain queued events into the engine. One pass; the caller loops.
    ///
    /// Runs only on the dedicated processing thread. The radio queue drains
    /// first, bounded by the configured `radio_burst` so the normal queue
    /// cannot starve; then the normal backlog present at the start of the
    /// pass drains in FIFO order. Engine faults during dispatch are counted
    /// and skipped, never fatal. Returns the number of dispatched events.
    pub fn process_pending_events(&self) -> Result<usize> {
        let engine = critical_section::with(|cs| {
            let mut shared = self.shared.borrow_ref_mut(cs);
            if !shared.running {
                return Err(Error::NotInitialized);
            }
            shared.engine.take().ok_or(Error::NotInitialized)
        })?;

        let mut dispatched = 0;

        for _ in 0..self.config.radio_burst {
            match self.radio.recv() {
                Some(msg) => {
                    self.dispatch(&mut *engine, msg);
                    dispatched += 1;
                }
                None => break,
            }
        }

        // Snapshot the backlog so producers enqueuing mid-drain cannot
        // extend this pass unboundedly.
        let backlog = self.normal.len();
        for _ in 0..backlog {
            match self.normal.recv() {
                Some(msg) => {
                    self.dispatch(&mut *engine, msg);
                    dispatched += 1;
                }
                None => break,
            }
        }

        let snapshot = Published::snapshot(&*engine);

        critical_section::with(|cs| {
            let mut shared = self.shared.borrow_ref_mut(cs);
            if shared.running {
                shared.engine = Some(engine);
                *self.published.borrow_ref_mut(cs) = snapshot;
            }
            // Shutdown arrived mid-drain: the binding is released here, at
            // the loop boundary.
        });

        Ok(dispatched)
    }

    fn dispatch(&self, engine: &mut dyn Engine, msg: EventMessage) {
        let result = match msg.kind() {
            EventKind::Alarm => engine.handle_alarm(),
            EventKind::AlarmMicro => engine.handle_alarm_micro(),
            EventKind::Radio => engine.handle_radio(msg.arg()),
            EventKind::TaskletsPending => engine.process_tasklets(),
            EventKind::Uart => engine.handle_uart(msg.arg()),
        };

        if result.is_err() {
            critical_section::with(|cs| {
                let mut faults = self.faults.borrow_ref_mut(cs);
                *faults = faults.saturating_add(1);
            });
            #[cfg(feature = "defmt")]
            defmt::warn!("engine fault dispatching {}", msg);
        }
    }

    /// Whether the bridge is bound to an engine and accepting dispatch.
    pub fn is_active(&self) -> bool {
        critical_section::with(|cs| self.shared.borrow_ref(cs).running)
    }

    fn published(&self) -> Result<Published> {
        let state = critical_section::with(|cs| *self.published.borrow_ref(cs));
        if state.valid {
            Ok(state)
        } else {
            Err(Error::NotInitialized)
        }
    }

    /// Whether the node is attached to a mesh partition.
    pub fn is_thread_attached(&self) -> Result<bool> {
        Ok(self.published()?.attached)
    }

    /// Whether the protocol is enabled.
    pub fn is_thread_enabled(&self) -> Result<bool> {
        Ok(self.published()?.enabled)
    }

    /// The link-layer extended address.
    pub fn ext_address(&self) -> Result<ExtAddress> {
        Ok(self.published()?.ext_address)
    }

    /// Engine message-buffer accounting.
    pub fn buffer_info(&self) -> Result<BufferInfo> {
        Ok(self.published()?.buffers)
    }

    /// Messages currently queued across both queues.
    pub fn pending_events(&self) -> usize {
        self.normal.len() + self.radio.len()
    }

    /// Messages dropped across both queues since the last shutdown.
    pub fn dropped_events(&self) -> u32 {
        self.normal.dropped().saturating_add(self.radio.dropped())
    }

    /// Engine faults observed during steady-state dispatch.
    pub fn dispatch_faults(&self) -> u32 {
        critical_section::with(|cs| *self.faults.borrow_ref(cs))
    }
}

impl<const NQ: usize, const RQ: usize> Default for EventBridge<NQ, RQ> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const NQ: usize, const RQ: usize> StackControl for EventBridge<NQ, RQ> {
    fn init_stack(&self, engine: &'static mut dyn Engine, wake: WakeSignal) -> Result<()> {
        EventBridge::init_stack(self, engine, wake)
    }

    fn shutdown(&self) -> Result<()> {
        EventBridge::shutdown(self)
    }

    fn signal_event(&self, kind: EventKind, arg: usize) -> Result<()> {
        EventBridge::signal_event(self, kind, arg)
    }

    fn is_thread_attached(&self) -> Result<bool> {
        EventBridge::is_thread_attached(self)
    }

    fn is_thread_enabled(&self) -> Result<bool> {
        EventBridge::is_thread_enabled(self)
    }

    fn ext_address(&self) -> Result<ExtAddress> {
        EventBridge::ext_address(self)
    }
}
