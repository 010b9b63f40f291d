//! Configuration for the companion app.

use std::time::Duration;

/// Tunables for a companion session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Battery level the doll must exceed before a scenario can run.
    pub min_battery_percent: u8,
    /// Pause between taking a choice and showing the next line.
    pub choice_pause: Duration,
    /// How long a simulated device scan takes.
    pub scan_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            min_battery_percent: 20,
            choice_pause: Duration::from_millis(1500),
            scan_delay: Duration::from_secs(2),
        }
    }
}

impl AppConfig {
    /// Set the minimum battery level (clamped to 0-100).
    pub fn with_min_battery(mut self, percent: u8) -> Self {
        self.min_battery_percent = percent.min(100);
        self
    }

    /// Set the pause after a choice.
    pub fn with_choice_pause(mut self, pause: Duration) -> Self {
        self.choice_pause = pause;
        self
    }

    /// Drop all cosmetic delays.
    pub fn without_delays(mut self) -> Self {
        self.choice_pause = Duration::ZERO;
        self.scan_delay = Duration::ZERO;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.min_battery_percent, 20);
        assert_eq!(cfg.choice_pause, Duration::from_millis(1500));
        assert_eq!(cfg.scan_delay, Duration::from_secs(2));
    }

    #[test]
    fn builder_methods() {
        let cfg = AppConfig::default()
            .with_min_battery(50)
            .with_choice_pause(Duration::from_millis(10));
        assert_eq!(cfg.min_battery_percent, 50);
        assert_eq!(cfg.choice_pause, Duration::from_millis(10));
    }

    #[test]
    fn battery_clamped() {
        let cfg = AppConfig::default().with_min_battery(250);
        assert_eq!(cfg.min_battery_percent, 100);
    }

    #[test]
    fn no_delays() {
        let cfg = AppConfig::default().without_delays();
        assert!(cfg.choice_pause.is_zero());
        assert!(cfg.scan_delay.is_zero());
    }
}
