//! Simulated Bluetooth devices.
//!
//! There is no radio here: a scan returns a fixed list of nearby dolls.

use serde::{Deserialize, Serialize};

/// A doll found by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Hardware identifier.
    pub id: String,
    /// Advertised name, `<product> <character>`.
    pub name: String,
    /// Signal strength in dBm.
    pub rssi: i16,
}

impl Device {
    /// Create a device record.
    pub fn new(id: impl Into<String>, name: impl Into<String>, rssi: i16) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rssi,
        }
    }

    /// The character part of the advertised name.
    pub fn character_name(&self) -> &str {
        self.name
            .split_once(' ')
            .map_or(self.name.as_str(), |(_, character)| character)
    }
}

/// The dolls every scan finds, strongest signal first.
pub fn simulated_scan() -> Vec<Device> {
    vec![
        Device::new("CD-001-GOURAI", "CutieroidDoll Gourai", -45),
        Device::new("CD-002-STYLET", "CutieroidDoll Stylet", -67),
        Device::new("CD-003-BASELARD", "CutieroidDoll Baselard", -82),
    ]
}
