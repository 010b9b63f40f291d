//! Status of the connected doll.

use serde::{Deserialize, Serialize};

use crate::device::Device;

/// Highest affection level a doll can reach.
pub const MAX_AFFECTION: u8 = 100;

/// Everything the app shows about the doll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DollStatus {
    /// Whether a doll is connected.
    pub connected: bool,
    /// Battery charge, 0-100.
    pub battery_level: u8,
    /// Affection, 0-100.
    pub affection_level: u8,
    /// Current operating mode.
    pub current_mode: String,
    /// Last line the doll spoke.
    pub dialogue: String,
    /// Next scheduled event.
    pub next_schedule: String,
    /// Hardware identifier of the connected device.
    pub device_id: String,
    /// Firmware reported by the device.
    pub firmware_version: String,
    /// Character the doll plays.
    pub character_name: String,
}

impl Default for DollStatus {
    fn default() -> Self {
        Self {
            connected: false,
            battery_level: 0,
            affection_level: 0,
            current_mode: "Standby".to_string(),
            dialogue: String::new(),
            next_schedule: String::new(),
            device_id: String::new(),
            firmware_version: String::new(),
            character_name: cd_scenario::builtin::CHARACTER.to_string(),
        }
    }
}

impl DollStatus {
    /// The status a freshly connected doll reports.
    pub fn connected_to(device: &Device) -> Self {
        Self {
            connected: true,
            battery_level: 85,
            affection_level: 42,
            current_mode: "Standby".to_string(),
            dialogue: "Welcome back, Master!".to_string(),
            next_schedule: "Today 18:00 - Good night greeting".to_string(),
            device_id: device.id.clone(),
            firmware_version: "v1.2.3".to_string(),
            character_name: device.character_name().to_string(),
        }
    }

    /// Affection level shown as "Lv.", 0-10.
    pub fn affection_tier(&self) -> u8 {
        self.affection_level / 10
    }

    /// Whether the battery is above `min_battery`.
    pub fn is_powered(&self, min_battery: u8) -> bool {
        self.battery_level > min_battery
    }

    /// Add a signed delta to affection, clamped to 0-100. Returns the new level.
    pub fn apply_affection(&mut self, delta: i32) -> u8 {
        let level = (i32::from(self.affection_level) + delta).clamp(0, i32::from(MAX_AFFECTION));
        self.affection_level = u8::try_from(level).unwrap_or(MAX_AFFECTION);
        self.affection_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::simulated_scan;

    #[test]
    fn default_is_disconnected() {
        let status = DollStatus::default();
        assert!(!status.connected);
        assert_eq!(status.character_name, "Gourai");
        assert!(!status.is_powered(20));
    }

    #[test]
    fn connect_fabricates_status() {
        let device = &simulated_scan()[2];
        let status = DollStatus::connected_to(device);
        assert!(status.connected);
        assert_eq!(status.battery_level, 85);
        assert_eq!(status.affection_level, 42);
        assert_eq!(status.affection_tier(), 4);
        assert_eq!(status.device_id, "CD-003-BASELARD");
        assert_eq!(status.character_name, "Baselard");
    }

    #[test]
    fn power_threshold_is_exclusive() {
        let mut status = DollStatus {
            battery_level: 20,
            ..DollStatus::default()
        };
        assert!(!status.is_powered(20));
        status.battery_level = 21;
        assert!(status.is_powered(20));
    }

    #[test]
    fn affection_is_clamped() {
        let mut status = DollStatus {
            affection_level: 98,
            ..DollStatus::default()
        };
        assert_eq!(status.apply_affection(5), 100);
        assert_eq!(status.apply_affection(-30), 70);
        assert_eq!(status.apply_affection(-200), 0);
    }

    #[test]
    fn json_uses_camel_case() {
        let json = serde_json::to_value(DollStatus::default()).unwrap();
        assert_eq!(json["affectionLevel"], 0);
        assert_eq!(json["characterName"], "Gourai");
    }
}
