#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # Mesh Bridge
//!
//! Marshals asynchronous events from interrupt and foreign-thread context
//! into ordered, single-consumer dispatch that drives the cooperative
//! protocol engine.
//!
//! Producers call [`EventBridge::signal_event`] (or the free-function entry
//! points in [`manager`]) from any context; exactly one dedicated processing
//! thread drains the queues with [`EventBridge::process_pending_events`].
//! The process-wide singleton is reached through [`stack_mgr`] for portable
//! code and [`stack_mgr_platform`] for platform glue.

pub mod bridge;
pub mod config;
pub mod manager;
pub mod queue;

pub use bridge::{EventBridge, StackControl};
pub use config::BridgeConfig;
pub use manager::{
    init_thread_stack, platform_alarm_micro_signal, platform_alarm_signal,
    platform_radio_signal, platform_uart_signal, stack_mgr, stack_mgr_platform,
    tasklets_signal_pending, StackManager,
};
pub use queue::SignalQueue;

/// Default depth of the normal-priority event queue.
pub const DEFAULT_EVENT_QUEUE_DEPTH: usize = 16;

/// Default depth of the radio-priority event queue.
pub const DEFAULT_RADIO_QUEUE_DEPTH: usize = 8;
