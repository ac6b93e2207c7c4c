#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # Mesh Network Commissioning
//!
//! Binds one commissioning cluster object to one transport driver with a
//! shared lifecycle. The driver variant (WiFi, Thread or Ethernet) is fixed
//! at construction and closed at the type level; the cluster registry sees
//! only the cluster record, never the driver.

use core::fmt;

pub mod cluster;
pub mod driver;
pub mod instance;
pub mod registry;

pub use cluster::NetworkCommissioningCluster;
pub use driver::{
    EthernetDriver, NetworkDriver, NetworkTechnology, ThreadDriver, TransportDriver, WifiDriver,
};
pub use instance::{Instance, InstanceAndDriver};
pub use registry::{with_registry, ClusterRegistry, MAX_COMMISSIONING_ENDPOINTS};

/// Identifier of an addressable logical unit within the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EndpointId(pub u16);

impl EndpointId {
    /// Create an endpoint id from its raw value.
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// The raw endpoint value.
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "endpoint {}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EndpointId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "endpoint {}", self.0);
    }
}
