//! Companion session management.
//!
//! `CompanionSession` owns the screen router, the doll status, the scenario
//! catalog, and at most one scenario run. Scenario selection is gated on the
//! doll being connected, powered and fond enough; a completed run feeds its
//! affection delta back into the doll status.

use cd_scenario::engine;
use cd_scenario::{
    Catalog, DialogueNode, RunOutcome, RunState, Scenario, ScenarioGraph, ScenarioResult,
};
use log::info;

use crate::config::AppConfig;
use crate::device::{Device, simulated_scan};
use crate::error::{AppError, AppResult};
use crate::screen::{Navigation, Screen, route};
use crate::status::DollStatus;

/// The scenario currently being played.
#[derive(Debug, Clone)]
pub struct ActiveRun {
    scenario_id: String,
    state: RunState,
}

impl ActiveRun {
    /// Id of the scenario being played.
    pub fn scenario_id(&self) -> &str {
        &self.scenario_id
    }

    /// Engine state of the run.
    pub fn state(&self) -> &RunState {
        &self.state
    }
}

/// Result of a move in the active scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// The scenario goes on.
    Continue,
    /// The scenario ended; its delta has been applied to the doll.
    Finished(RunOutcome),
}

/// An interactive companion app session.
pub struct CompanionSession {
    config: AppConfig,
    catalog: Catalog,
    screen: Screen,
    status: DollStatus,
    active: Option<ActiveRun>,
}

impl CompanionSession {
    /// Create a session on the connection screen.
    pub fn new(config: AppConfig, catalog: Catalog) -> Self {
        Self {
            config,
            catalog,
            screen: Screen::Connection,
            status: DollStatus::default(),
            active: None,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the scenario catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get the screen being shown.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Get the doll status.
    pub fn status(&self) -> &DollStatus {
        &self.status
    }

    /// Get a mutable reference to the doll status.
    pub fn status_mut(&mut self) -> &mut DollStatus {
        &mut self.status
    }

    /// Get the scenario being played, if any.
    pub fn active_run(&self) -> Option<&ActiveRun> {
        self.active.as_ref()
    }

    /// Look for nearby dolls.
    pub fn scan(&self) -> Vec<Device> {
        simulated_scan()
    }

    /// Connect to a doll from the connection screen and go home.
    pub fn connect(&mut self, device: &Device) -> AppResult<()> {
        self.ensure_idle()?;
        self.ensure_screen(Screen::Connection)?;
        self.status = DollStatus::connected_to(device);
        info!("connected to {} ({})", device.name, device.id);
        self.go(Navigation::Connected);
        Ok(())
    }

    /// Disconnect from the menu screen.
    pub fn disconnect(&mut self) -> AppResult<()> {
        self.ensure_idle()?;
        self.ensure_screen(Screen::Menu)?;
        info!("disconnected from {}", self.status.device_id);
        self.status = DollStatus::default();
        self.go(Navigation::Disconnect);
        Ok(())
    }

    /// Open a feature screen from home.
    pub fn open(&mut self, screen: Screen) -> AppResult<Screen> {
        self.ensure_idle()?;
        Ok(self.go(Navigation::Open(screen)))
    }

    /// Leave the current screen. A running scenario must be aborted instead.
    pub fn back(&mut self) -> AppResult<Screen> {
        self.ensure_idle()?;
        Ok(self.go(Navigation::Back))
    }

    /// Start a scenario from the scenario list.
    pub fn select_scenario(&mut self, id: &str) -> AppResult<Turn> {
        self.ensure_idle()?;
        self.ensure_screen(Screen::Scenario)?;
        if !self.status.connected {
            return Err(AppError::NotConnected);
        }

        let scenario = self.catalog.get(id)?;
        if !self.status.is_powered(self.config.min_battery_percent) {
            return Err(AppError::InsufficientPower {
                battery: self.status.battery_level,
                required: self.config.min_battery_percent,
            });
        }
        if !scenario.meta.is_unlocked(self.status.affection_level) {
            return Err(AppError::ScenarioLocked {
                id: id.to_string(),
                required: scenario.meta.required_affection,
                affection: self.status.affection_level,
            });
        }

        let state = engine::start(&scenario.graph, scenario.graph.entry())?;
        info!("starting scenario {id} ({})", scenario.meta.title);
        self.active = Some(ActiveRun {
            scenario_id: id.to_string(),
            state,
        });
        self.go(Navigation::SelectScenario);
        self.settle()
    }

    /// Take a choice on the current node.
    pub fn choose(&mut self, index: usize) -> AppResult<Turn> {
        self.step(|state, graph| engine::choose(state, graph, index))
    }

    /// Move past the current linear node.
    pub fn advance(&mut self) -> AppResult<Turn> {
        self.step(engine::advance)
    }

    /// Abandon the running scenario. Its delta is reported, not applied.
    pub fn abort(&mut self) -> AppResult<RunOutcome> {
        let run = self.active.take().ok_or(AppError::NoActiveRun)?;
        info!("scenario {} aborted", run.scenario_id);
        self.go(Navigation::Back);
        Ok(engine::abort(run.state))
    }

    /// The scenario being played, with its graph.
    pub fn active_scenario(&self) -> Option<&Scenario> {
        self.active
            .as_ref()
            .and_then(|run| self.catalog.get(&run.scenario_id).ok())
    }

    /// The node currently shown.
    pub fn current_node(&self) -> Option<&DialogueNode> {
        let run = self.active.as_ref()?;
        let scenario = self.catalog.get(&run.scenario_id).ok()?;
        engine::current_node(&run.state, &scenario.graph)
    }

    /// How far through the running scenario the doll is.
    pub fn progress(&self) -> Option<u8> {
        let run = self.active.as_ref()?;
        let scenario = self.catalog.get(&run.scenario_id).ok()?;
        Some(engine::progress(&run.state, &scenario.graph))
    }

    fn step(
        &mut self,
        f: impl FnOnce(&RunState, &ScenarioGraph) -> ScenarioResult<RunState>,
    ) -> AppResult<Turn> {
        let run = self.active.as_mut().ok_or(AppError::NoActiveRun)?;
        let scenario = self.catalog.get(&run.scenario_id)?;
        run.state = f(&run.state, &scenario.graph)?;
        self.settle()
    }

    /// Close the run if it has reached the end.
    fn settle(&mut self) -> AppResult<Turn> {
        let complete = self
            .active
            .as_ref()
            .is_some_and(|run| engine::is_complete(&run.state));
        if !complete {
            return Ok(Turn::Continue);
        }
        let run = self.active.take().ok_or(AppError::NoActiveRun)?;
        let outcome = engine::finish(run.state)?;

        let before = self.status.affection_level;
        let after = self.status.apply_affection(outcome.affection_delta);
        info!(
            "scenario {} complete: affection {before} -> {after} ({:+})",
            run.scenario_id, outcome.affection_delta
        );
        self.go(Navigation::Back);
        Ok(Turn::Finished(outcome))
    }

    fn go(&mut self, event: Navigation) -> Screen {
        let next = route(self.screen, event);
        if next != self.screen {
            info!("screen {:?} -> {next:?}", self.screen);
        }
        self.screen = next;
        next
    }

    fn ensure_idle(&self) -> AppResult<()> {
        match &self.active {
            Some(run) => Err(AppError::RunInProgress(run.scenario_id.clone())),
            None => Ok(()),
        }
    }

    fn ensure_screen(&self, expected: Screen) -> AppResult<()> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(AppError::WrongScreen {
                expected,
                actual: self.screen,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cd_scenario::{ScenarioError, ScenarioMeta};

    fn session() -> CompanionSession {
        let catalog = Catalog::builtin().unwrap();
        CompanionSession::new(AppConfig::default().without_delays(), catalog)
    }

    fn on_scenario_list() -> CompanionSession {
        let mut session = session();
        let device = session.scan().remove(0);
        session.connect(&device).unwrap();
        session.open(Screen::Scenario).unwrap();
        session
    }

    #[test]
    fn starts_disconnected() {
        let session = session();
        assert_eq!(session.screen(), Screen::Connection);
        assert!(!session.status().connected);
        assert!(session.active_run().is_none());
    }

    #[test]
    fn connect_routes_home() {
        let mut session = session();
        let device = session.scan().remove(0);
        session.connect(&device).unwrap();
        assert_eq!(session.screen(), Screen::Home);
        assert_eq!(session.status().character_name, "Gourai");
    }

    #[test]
    fn connect_only_from_connection_screen() {
        let mut session = session();
        let device = session.scan().remove(0);
        session.connect(&device).unwrap();
        session.status_mut().affection_level = 70;
        assert!(matches!(
            session.connect(&device),
            Err(AppError::WrongScreen {
                expected: Screen::Connection,
                actual: Screen::Home
            })
        ));
        assert_eq!(session.status().affection_level, 70);

        session.open(Screen::Scenario).unwrap();
        session.select_scenario("s1").unwrap();
        assert!(matches!(
            session.connect(&device),
            Err(AppError::RunInProgress(_))
        ));
        assert_eq!(session.status().affection_level, 70);
        assert_eq!(session.screen(), Screen::ScenarioExecution);
    }

    #[test]
    fn play_warm_path_applies_affection() {
        let mut session = on_scenario_list();
        assert_eq!(session.select_scenario("s1").unwrap(), Turn::Continue);
        assert_eq!(session.screen(), Screen::ScenarioExecution);
        assert_eq!(session.progress(), Some(0));
        assert_eq!(
            session.active_scenario().map(|s| s.meta.id.as_str()),
            Some("s1")
        );

        assert_eq!(session.choose(0).unwrap(), Turn::Continue);
        assert_eq!(session.current_node().map(|n| n.id), Some(1));
        assert_eq!(session.choose(0).unwrap(), Turn::Continue);

        let Turn::Finished(outcome) = session.advance().unwrap() else {
            panic!("scenario should be finished");
        };
        assert_eq!(outcome.affection_delta, 5);
        assert!(outcome.completed);
        assert_eq!(session.status().affection_level, 47);
        assert_eq!(session.screen(), Screen::Scenario);
        assert!(session.active_run().is_none());
    }

    #[test]
    fn abort_discards_delta() {
        let mut session = on_scenario_list();
        session.select_scenario("s1").unwrap();
        session.choose(0).unwrap();

        let outcome = session.abort().unwrap();
        assert_eq!(outcome.affection_delta, 2);
        assert!(!outcome.completed);
        assert_eq!(session.status().affection_level, 42);
        assert_eq!(session.screen(), Screen::Scenario);
    }

    #[test]
    fn locked_scenario_is_refused() {
        let mut session = on_scenario_list();
        let err = session.select_scenario("s4").unwrap_err();
        assert!(matches!(
            err,
            AppError::ScenarioLocked {
                required: 60,
                affection: 42,
                ..
            }
        ));
        assert_eq!(session.screen(), Screen::Scenario);
    }

    #[test]
    fn low_battery_is_refused() {
        let mut session = on_scenario_list();
        session.status_mut().battery_level = 20;
        assert!(matches!(
            session.select_scenario("s1"),
            Err(AppError::InsufficientPower {
                battery: 20,
                required: 20
            })
        ));
    }

    #[test]
    fn unknown_scenario() {
        let mut session = on_scenario_list();
        assert!(matches!(
            session.select_scenario("s9"),
            Err(AppError::Scenario(ScenarioError::ScenarioNotFound(_)))
        ));
    }

    #[test]
    fn selection_needs_scenario_screen() {
        let mut session = session();
        assert!(matches!(
            session.select_scenario("s1"),
            Err(AppError::WrongScreen {
                expected: Screen::Scenario,
                actual: Screen::Connection
            })
        ));
    }

    #[test]
    fn navigation_blocked_while_running() {
        let mut session = on_scenario_list();
        session.select_scenario("s1").unwrap();
        assert!(matches!(session.back(), Err(AppError::RunInProgress(_))));
        assert!(matches!(
            session.select_scenario("s2"),
            Err(AppError::RunInProgress(_))
        ));
    }

    #[test]
    fn engine_errors_pass_through() {
        let mut session = on_scenario_list();
        session.select_scenario("s1").unwrap();
        assert!(matches!(
            session.advance(),
            Err(AppError::Scenario(ScenarioError::AwaitingChoice(0)))
        ));
        assert!(matches!(
            session.choose(5),
            Err(AppError::Scenario(ScenarioError::InvalidChoice { .. }))
        ));
        assert_eq!(session.current_node().map(|n| n.id), Some(0));
    }

    #[test]
    fn moves_without_run() {
        let mut session = on_scenario_list();
        assert!(matches!(session.advance(), Err(AppError::NoActiveRun)));
        assert!(matches!(session.abort(), Err(AppError::NoActiveRun)));
    }

    #[test]
    fn one_line_scenario_finishes_on_select() {
        let mut catalog = Catalog::new();
        let graph =
            ScenarioGraph::new(0, vec![DialogueNode::new(0, "System", "Done already.")]).unwrap();
        catalog.insert(Scenario::new(ScenarioMeta::new("short", "Short"), graph));

        let mut session = CompanionSession::new(AppConfig::default(), catalog);
        let device = session.scan().remove(0);
        session.connect(&device).unwrap();
        session.open(Screen::Scenario).unwrap();

        let turn = session.select_scenario("short").unwrap();
        assert!(matches!(turn, Turn::Finished(RunOutcome { affection_delta: 0, completed: true, .. })));
        assert_eq!(session.screen(), Screen::Scenario);
    }

    #[test]
    fn disconnect_from_menu_only() {
        let mut session = session();
        let device = session.scan().remove(0);
        session.connect(&device).unwrap();
        assert!(matches!(
            session.disconnect(),
            Err(AppError::WrongScreen { .. })
        ));

        session.open(Screen::Menu).unwrap();
        session.disconnect().unwrap();
        assert_eq!(session.screen(), Screen::Connection);
        assert!(!session.status().connected);

        session.connect(&device).unwrap();
        assert_eq!(session.screen(), Screen::Home);
    }
}
