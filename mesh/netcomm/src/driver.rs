//! Transport driver capability traits and the closed variant selection.

use core::fmt;

/// The three supported transport technologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkTechnology {
    Wifi,
    Thread,
    Ethernet,
}

impl fmt::Display for NetworkTechnology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkTechnology::Wifi => write!(f, "WiFi"),
            NetworkTechnology::Thread => write!(f, "Thread"),
            NetworkTechnology::Ethernet => write!(f, "Ethernet"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for NetworkTechnology {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            NetworkTechnology::Wifi => defmt::write!(fmt, "WiFi"),
            NetworkTechnology::Thread => defmt::write!(fmt, "Thread"),
            NetworkTechnology::Ethernet => defmt::write!(fmt, "Ethernet"),
        }
    }
}

// The driver kinds have disjoint capability surfaces; the set is closed by
// the NetworkDriver sum type, not by a common supertrait.

/// Control surface of a WiFi station driver.
pub trait WifiDriver: Send {
    /// Networks the driver can remember.
    fn max_networks(&self) -> u8;

    /// Bitmask of supported frequency bands.
    fn supported_bands(&self) -> u8;
}

/// Control surface of a Thread interface driver.
pub trait ThreadDriver: Send {
    /// Networks the driver can remember.
    fn max_networks(&self) -> u8;

    /// Whether an operational dataset is provisioned.
    fn dataset_present(&self) -> bool;
}

/// Control surface of an Ethernet interface driver.
pub trait EthernetDriver: Send {
    /// Networks the driver can remember.
    fn max_networks(&self) -> u8;
}

/// Exactly one driver per composition unit, fixed for its lifetime.
///
/// Adding a technology means adding a variant here, and the compiler walks
/// every dispatch site.
pub enum NetworkDriver<'d> {
    Wifi(&'d mut dyn WifiDriver),
    Thread(&'d mut dyn ThreadDriver),
    Ethernet(&'d mut dyn EthernetDriver),
}

impl NetworkDriver<'_> {
    /// The technology tag of the held variant.
    pub fn technology(&self) -> NetworkTechnology {
        match self {
            NetworkDriver::Wifi(_) => NetworkTechnology::Wifi,
            NetworkDriver::Thread(_) => NetworkTechnology::Thread,
            NetworkDriver::Ethernet(_) => NetworkTechnology::Ethernet,
        }
    }

    /// Networks the underlying driver can remember.
    pub fn max_networks(&self) -> u8 {
        match self {
            NetworkDriver::Wifi(driver) => driver.max_networks(),
            NetworkDriver::Thread(driver) => driver.max_networks(),
            NetworkDriver::Ethernet(driver) => driver.max_networks(),
        }
    }
}

impl fmt::Debug for NetworkDriver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NetworkDriver::{}", self.technology())
    }
}

/// Implemented by concrete driver types that a composition unit owns by
/// value. Fixes the variant at the type level so the owning form cannot be
/// instantiated without choosing a technology.
pub trait TransportDriver: Send {
    /// The variant this driver binds as.
    const TECHNOLOGY: NetworkTechnology;

    /// Borrow this driver as its tagged variant.
    fn as_network_driver(&mut self) -> NetworkDriver<'_>;
}
