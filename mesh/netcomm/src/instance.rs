//! Composition units tying a cluster and its driver to one lifecycle.

use mesh_core::Result;

use crate::cluster::NetworkCommissioningCluster;
use crate::driver::{
    EthernetDriver, NetworkDriver, NetworkTechnology, ThreadDriver, TransportDriver, WifiDriver,
};
use crate::registry::with_registry;
use crate::EndpointId;

/// One commissioning cluster and one referenced driver, constructed,
/// registered and torn down together.
///
/// There is no default construction: a unit always holds exactly one driver
/// variant, chosen by the constructor and fixed for the unit's lifetime.
pub struct Instance<'d> {
    cluster: NetworkCommissioningCluster<'d>,
    registered: bool,
}

impl<'d> Instance<'d> {
    /// Compose a WiFi-backed unit.
    pub fn wifi(endpoint: EndpointId, driver: &'d mut dyn WifiDriver) -> Self {
        Self::with_driver(endpoint, NetworkDriver::Wifi(driver))
    }

    /// Compose a Thread-backed unit.
    pub fn thread(endpoint: EndpointId, driver: &'d mut dyn ThreadDriver) -> Self {
        Self::with_driver(endpoint, NetworkDriver::Thread(driver))
    }

    /// Compose an Ethernet-backed unit.
    pub fn ethernet(endpoint: EndpointId, driver: &'d mut dyn EthernetDriver) -> Self {
        Self::with_driver(endpoint, NetworkDriver::Ethernet(driver))
    }

    fn with_driver(endpoint: EndpointId, driver: NetworkDriver<'d>) -> Self {
        Self {
            cluster: NetworkCommissioningCluster::new(endpoint, driver),
            registered: false,
        }
    }

    /// Register the cluster under its endpoint id.
    ///
    /// Fails with `RegistrationConflict` if the endpoint already carries a
    /// commissioning cluster; the unit is left unregistered.
    pub fn init(&mut self) -> Result<()> {
        with_registry(|registry| {
            registry.register(self.cluster.endpoint(), self.cluster.technology())
        })?;
        self.registered = true;
        Ok(())
    }

    /// Deregister the cluster. Safe if `init` never ran or failed;
    /// idempotent.
    pub fn shutdown(&mut self) {
        if self.registered {
            with_registry(|registry| registry.deregister(self.cluster.endpoint()));
            self.registered = false;
        }
    }

    /// The owned cluster object.
    pub fn cluster(&self) -> &NetworkCommissioningCluster<'d> {
        &self.cluster
    }

    /// The endpoint this unit serves.
    pub fn endpoint(&self) -> EndpointId {
        self.cluster.endpoint()
    }

    /// The driver technology fixed at construction.
    pub fn technology(&self) -> NetworkTechnology {
        self.cluster.technology()
    }
}

/// Composition unit that also owns the driver storage.
///
/// For callers that do not manage the driver separately. The driver variant
/// is fixed by `D::TECHNOLOGY`, the registration record is identical to
/// [`Instance`]'s, and the cluster view is materialized on demand from the
/// owned driver.
pub struct InstanceAndDriver<D: TransportDriver> {
    endpoint: EndpointId,
    driver: D,
    registered: bool,
}

impl<D: TransportDriver + Default> InstanceAndDriver<D> {
    /// Compose a unit with a default-constructed driver.
    pub fn new(endpoint: EndpointId) -> Self {
        Self::with_driver(endpoint, D::default())
    }
}

impl<D: TransportDriver> InstanceAndDriver<D> {
    /// Compose a unit around an existing driver value.
    pub fn with_driver(endpoint: EndpointId, driver: D) -> Self {
        Self {
            endpoint,
            driver,
            registered: false,
        }
    }

    /// Register the cluster under its endpoint id.
    pub fn init(&mut self) -> Result<()> {
        with_registry(|registry| registry.register(self.endpoint, D::TECHNOLOGY))?;
        self.registered = true;
        Ok(())
    }

    /// Deregister the cluster. Safe if `init` never ran or failed;
    /// idempotent.
    pub fn shutdown(&mut self) {
        if self.registered {
            with_registry(|registry| registry.deregister(self.endpoint));
            self.registered = false;
        }
    }

    /// Direct access to driver-specific controls not modeled generically.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the owned driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// The cluster view over the owned driver.
    pub fn cluster(&mut self) -> NetworkCommissioningCluster<'_> {
        NetworkCommissioningCluster::new(self.endpoint, self.driver.as_network_driver())
    }

    /// The endpoint this unit serves.
    pub fn endpoint(&self) -> EndpointId {
        self.endpoint
    }

    /// The driver technology fixed at the type level.
    pub fn technology(&self) -> NetworkTechnology {
        D::TECHNOLOGY
    }
}
