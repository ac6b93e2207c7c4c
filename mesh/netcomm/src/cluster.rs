//! The commissioning cluster object.

use crate::driver::{NetworkDriver, NetworkTechnology};
use crate::EndpointId;

/// Feature bit advertised by a WiFi-backed cluster.
pub const FEATURE_WIFI: u32 = 1 << 0;
/// Feature bit advertised by a Thread-backed cluster.
pub const FEATURE_THREAD: u32 = 1 << 1;
/// Feature bit advertised by an Ethernet-backed cluster.
pub const FEATURE_ETHERNET: u32 = 1 << 2;

/// Protocol-facing cluster object bound to one endpoint and one driver.
///
/// The external dispatch machinery routes read/write/driver-event calls
/// here after registration; only the reads it needs are modeled. The
/// cluster is told its driver variant at construction and the binding is
/// fixed for its lifetime.
pub struct NetworkCommissioningCluster<'d> {
    endpoint: EndpointId,
    driver: NetworkDriver<'d>,
}

impl<'d> NetworkCommissioningCluster<'d> {
    /// Bind a cluster to its endpoint and driver.
    pub fn new(endpoint: EndpointId, driver: NetworkDriver<'d>) -> Self {
        Self { endpoint, driver }
    }

    /// The endpoint this cluster serves.
    pub fn endpoint(&self) -> EndpointId {
        self.endpoint
    }

    /// The technology of the bound driver.
    pub fn technology(&self) -> NetworkTechnology {
        self.driver.technology()
    }

    /// Feature map advertised to the data model.
    pub fn feature_map(&self) -> u32 {
        match self.driver.technology() {
            NetworkTechnology::Wifi => FEATURE_WIFI,
            NetworkTechnology::Thread => FEATURE_THREAD,
            NetworkTechnology::Ethernet => FEATURE_ETHERNET,
        }
    }

    /// Networks the bound driver can remember.
    pub fn max_networks(&self) -> u8 {
        self.driver.max_networks()
    }

    /// The bound driver.
    pub fn driver(&self) -> &NetworkDriver<'d> {
        &self.driver
    }

    /// The bound driver, mutably.
    pub fn driver_mut(&mut self) -> &mut NetworkDriver<'d> {
        &mut self.driver
    }
}
