#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # Mesh Core
//!
//! Shared vocabulary for the mesh stack event bridge: the event message
//! model, the opaque protocol-engine interface, and the error taxonomy used
//! by every crate in the workspace.

use core::fmt;

pub mod engine;
pub mod event;

pub use engine::*;
pub use event::*;

/// Workspace version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the workspace.
pub type Result<T> = core::result::Result<T, Error>;

/// Error taxonomy for bridge and commissioning operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Target event queue is saturated; the message was counted and dropped
    QueueFull,
    /// The stack was already bound to an engine
    AlreadyInitialized,
    /// Operation requires a bound engine
    NotInitialized,
    /// The engine's own setup callback failed
    EngineRejected(EngineFault),
    /// The endpoint already carries a registered commissioning cluster
    RegistrationConflict,
    /// The cluster registry has no free slots
    RegistryFull,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::QueueFull => write!(f, "Event queue is full"),
            Error::AlreadyInitialized => write!(f, "Stack is already initialized"),
            Error::NotInitialized => write!(f, "Stack is not initialized"),
            Error::EngineRejected(fault) => write!(f, "Engine rejected setup: {fault}"),
            Error::RegistrationConflict => write!(f, "Endpoint already has a registered cluster"),
            Error::RegistryFull => write!(f, "Cluster registry is full"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::QueueFull => defmt::write!(fmt, "QueueFull"),
            Error::AlreadyInitialized => defmt::write!(fmt, "AlreadyInitialized"),
            Error::NotInitialized => defmt::write!(fmt, "NotInitialized"),
            Error::EngineRejected(fault) => defmt::write!(fmt, "EngineRejected({})", fault),
            Error::RegistrationConflict => defmt::write!(fmt, "RegistrationConflict"),
            Error::RegistryFull => defmt::write!(fmt, "RegistryFull"),
        }
    }
}
