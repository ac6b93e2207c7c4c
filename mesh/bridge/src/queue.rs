//! Bounded multi-producer/single-consumer event queue.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;
use mesh_core::{Error, EventMessage, Result};

struct QueueState<const N: usize> {
    items: Deque<EventMessage, N>,
    dropped: u32,
}

/// A bounded FIFO channel of event messages.
///
/// Producers may run in interrupt context: `try_send` performs a fixed-size
/// push inside a bounded critical section and never allocates or blocks.
/// Saturation is a counted, reported failure rather than a silent drop so
/// the surrounding system can detect event loss.
pub struct SignalQueue<const N: usize> {
    state: Mutex<RefCell<QueueState<N>>>,
}

impl<const N: usize> SignalQueue<N> {
    /// Create a new empty queue.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(QueueState {
                items: Deque::new(),
                dropped: 0,
            })),
        }
    }

    /// Enqueue a message, failing with `QueueFull` when saturated.
    ///
    /// A failed send increments the drop counter before returning, so loss
    /// stays observable even when the caller cannot handle the error (ISR
    /// glue).
    pub fn try_send(&self, msg: EventMessage) -> Result<()> {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            match state.items.push_back(msg) {
                Ok(()) => Ok(()),
                Err(_) => {
                    state.dropped = state.dropped.saturating_add(1);
                    Err(Error::QueueFull)
                }
            }
        })
    }

    /// Dequeue the oldest message, if any.
    pub fn recv(&self) -> Option<EventMessage> {
        critical_section::with(|cs| self.state.borrow_ref_mut(cs).items.pop_front())
    }

    /// Number of queued messages.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.state.borrow_ref(cs).items.len())
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum capacity.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Messages dropped because the queue was saturated.
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.state.borrow_ref(cs).dropped)
    }

    /// Discard all queued messages and reset the drop counter.
    pub fn clear(&self) {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            state.items.clear();
            state.dropped = 0;
        });
    }
}

impl<const N: usize> Default for SignalQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
