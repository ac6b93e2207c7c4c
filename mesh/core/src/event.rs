//! Event message model for the bridge queues.

use core::fmt;

/// Kind of asynchronous event delivered to the protocol engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Millisecond-resolution alarm fired
    Alarm,
    /// Microsecond-resolution alarm fired
    AlarmMicro,
    /// Radio frame or radio state change
    Radio,
    /// The engine has tasklets ready to run
    TaskletsPending,
    /// Auxiliary UART I/O event
    Uart,
}

/// Queue a message is routed to, derived from its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueClass {
    /// General-purpose queue
    Normal,
    /// Higher-priority radio queue
    Radio,
}

impl EventKind {
    /// Routing policy: radio events take the priority queue, everything
    /// else the normal queue.
    pub const fn queue_class(self) -> QueueClass {
        match self {
            EventKind::Radio => QueueClass::Radio,
            EventKind::Alarm
            | EventKind::AlarmMicro
            | EventKind::TaskletsPending
            | EventKind::Uart => QueueClass::Normal,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Alarm => write!(f, "Alarm"),
            EventKind::AlarmMicro => write!(f, "AlarmMicro"),
            EventKind::Radio => write!(f, "Radio"),
            EventKind::TaskletsPending => write!(f, "TaskletsPending"),
            EventKind::Uart => write!(f, "Uart"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EventKind {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            EventKind::Alarm => defmt::write!(fmt, "Alarm"),
            EventKind::AlarmMicro => defmt::write!(fmt, "AlarmMicro"),
            EventKind::Radio => defmt::write!(fmt, "Radio"),
            EventKind::TaskletsPending => defmt::write!(fmt, "TaskletsPending"),
            EventKind::Uart => defmt::write!(fmt, "Uart"),
        }
    }
}

/// A queued event message.
///
/// Immutable once enqueued; ownership moves to the queue at enqueue time and
/// to the consumer at dequeue time. `arg` is an opaque word-sized payload
/// whose meaning depends on `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMessage {
    kind: EventKind,
    arg: usize,
}

impl EventMessage {
    /// Create a new event message.
    pub const fn new(kind: EventKind, arg: usize) -> Self {
        Self { kind, arg }
    }

    /// The event kind.
    pub const fn kind(self) -> EventKind {
        self.kind
    }

    /// The opaque payload word.
    pub const fn arg(self) -> usize {
        self.arg
    }
}

impl fmt::Display for EventMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:#x})", self.kind, self.arg)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EventMessage {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}({=usize:x})", self.kind, self.arg);
    }
}
