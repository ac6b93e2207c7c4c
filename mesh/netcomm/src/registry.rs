//! Cluster registry for endpoint-scoped registration.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Vec;
use mesh_core::{Error, Result};

use crate::driver::NetworkTechnology;
use crate::EndpointId;

/// Maximum commissioning clusters that can be registered at once.
pub const MAX_COMMISSIONING_ENDPOINTS: usize = 8;

#[derive(Debug, Clone, Copy)]
struct Record {
    endpoint: EndpointId,
    technology: NetworkTechnology,
}

/// Table of registered commissioning clusters, one per endpoint.
///
/// The process-wide instance is reached through [`with_registry`]; the type
/// is directly instantiable for tests.
pub struct ClusterRegistry {
    records: Vec<Record, MAX_COMMISSIONING_ENDPOINTS>,
}

impl ClusterRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Register a cluster under its endpoint id.
    ///
    /// Fails with `RegistrationConflict` if the endpoint already carries a
    /// commissioning cluster and `RegistryFull` when the table is
    /// exhausted.
    pub fn register(&mut self, endpoint: EndpointId, technology: NetworkTechnology) -> Result<()> {
        if self.records.iter().any(|r| r.endpoint == endpoint) {
            return Err(Error::RegistrationConflict);
        }
        self.records
            .push(Record {
                endpoint,
                technology,
            })
            .map_err(|_| Error::RegistryFull)
    }

    /// Remove an endpoint's registration. Idempotent.
    pub fn deregister(&mut self, endpoint: EndpointId) {
        if let Some(pos) = self.records.iter().position(|r| r.endpoint == endpoint) {
            self.records.swap_remove(pos);
        }
    }

    /// The technology registered at an endpoint, if any.
    pub fn technology_at(&self, endpoint: EndpointId) -> Option<NetworkTechnology> {
        self.records
            .iter()
            .find(|r| r.endpoint == endpoint)
            .map(|r| r.technology)
    }

    /// Whether an endpoint carries a registration.
    pub fn contains(&self, endpoint: EndpointId) -> bool {
        self.technology_at(endpoint).is_some()
    }

    /// Number of registered clusters.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for ClusterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global registry instance.
static REGISTRY: Mutex<RefCell<ClusterRegistry>> = Mutex::new(RefCell::new(ClusterRegistry::new()));

/// Run a closure against the process-wide cluster registry.
pub fn with_registry<F, R>(f: F) -> R
where
    F: FnOnce(&mut ClusterRegistry) -> R,
{
    critical_section::with(|cs| {
        let mut registry = REGISTRY.borrow_ref_mut(cs);
        f(&mut registry)
    })
}
