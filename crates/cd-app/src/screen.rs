//! Screen routing.
//!
//! The app shows exactly one [`Screen`] at a time; [`route`] maps the current
//! screen and a [`Navigation`] event to the next one.

use serde::{Deserialize, Serialize};

/// Every screen the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    /// Device scan and connect.
    Connection,
    /// Doll status overview.
    Home,
    /// Pose adjustment.
    Pose,
    /// Performance playback.
    Performance,
    /// Scenario list.
    Scenario,
    /// A scenario being played.
    ScenarioExecution,
    /// Schedule editor.
    Scheduler,
    /// Item shop.
    Shop,
    /// Settings and device menu.
    Menu,
}

impl Screen {
    /// Screens reachable directly from Home.
    pub fn is_feature(self) -> bool {
        matches!(
            self,
            Self::Pose
                | Self::Performance
                | Self::Scenario
                | Self::Scheduler
                | Self::Shop
                | Self::Menu
        )
    }
}

/// A request to move between screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// A doll finished connecting.
    Connected,
    /// Open a feature screen from Home.
    Open(Screen),
    /// Leave the current screen.
    Back,
    /// A scenario was picked from the list.
    SelectScenario,
    /// The doll was disconnected from the menu.
    Disconnect,
}

/// The screen shown after `event` on `screen`.
///
/// Events that make no sense on the current screen leave it unchanged.
pub fn route(screen: Screen, event: Navigation) -> Screen {
    match (screen, event) {
        (Screen::Connection, Navigation::Connected) => Screen::Home,
        (Screen::Connection, _) => Screen::Connection,
        (Screen::Menu, Navigation::Disconnect) => Screen::Connection,
        (Screen::ScenarioExecution, Navigation::Back) => Screen::Scenario,
        (_, Navigation::Back) => Screen::Home,
        (Screen::Scenario, Navigation::SelectScenario) => Screen::ScenarioExecution,
        (Screen::Home, Navigation::Open(target)) if target.is_feature() => target,
        _ => screen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_only_accepts_connected() {
        assert_eq!(route(Screen::Connection, Navigation::Connected), Screen::Home);
        assert_eq!(route(Screen::Connection, Navigation::Back), Screen::Connection);
        assert_eq!(
            route(Screen::Connection, Navigation::Open(Screen::Shop)),
            Screen::Connection
        );
    }

    #[test]
    fn home_opens_features() {
        for target in [
            Screen::Pose,
            Screen::Performance,
            Screen::Scenario,
            Screen::Scheduler,
            Screen::Shop,
            Screen::Menu,
        ] {
            assert_eq!(route(Screen::Home, Navigation::Open(target)), target);
        }
        assert_eq!(
            route(Screen::Home, Navigation::Open(Screen::ScenarioExecution)),
            Screen::Home
        );
        assert_eq!(
            route(Screen::Home, Navigation::Open(Screen::Connection)),
            Screen::Home
        );
    }

    #[test]
    fn back_goes_home_except_from_execution() {
        assert_eq!(route(Screen::Shop, Navigation::Back), Screen::Home);
        assert_eq!(route(Screen::Scenario, Navigation::Back), Screen::Home);
        assert_eq!(route(Screen::Home, Navigation::Back), Screen::Home);
        assert_eq!(
            route(Screen::ScenarioExecution, Navigation::Back),
            Screen::Scenario
        );
    }

    #[test]
    fn select_only_from_scenario_list() {
        assert_eq!(
            route(Screen::Scenario, Navigation::SelectScenario),
            Screen::ScenarioExecution
        );
        assert_eq!(route(Screen::Home, Navigation::SelectScenario), Screen::Home);
    }

    #[test]
    fn disconnect_only_from_menu() {
        assert_eq!(route(Screen::Menu, Navigation::Disconnect), Screen::Connection);
        assert_eq!(route(Screen::Home, Navigation::Disconnect), Screen::Home);
    }

    #[test]
    fn features_do_not_open_each_other() {
        assert_eq!(route(Screen::Shop, Navigation::Open(Screen::Menu)), Screen::Shop);
    }

    #[test]
    fn screen_tags_are_kebab_case() {
        let json = serde_json::to_string(&Screen::ScenarioExecution).unwrap();
        assert_eq!(json, "\"scenario-execution\"");
    }
}
