//! Error types for the companion app.

use cd_scenario::ScenarioError;
use thiserror::Error;

use crate::screen::Screen;

/// Result type for app operations.
pub type AppResult<T> = Result<T, AppError>;

/// Errors that can occur while driving a companion session.
#[derive(Debug, Error)]
pub enum AppError {
    /// No doll is connected.
    #[error("no doll connected")]
    NotConnected,

    /// The battery is too low to run a scenario.
    #[error("battery too low to run a scenario: {battery}% (needs more than {required}%)")]
    InsufficientPower {
        /// Current battery level.
        battery: u8,
        /// Level the battery must exceed.
        required: u8,
    },

    /// The doll's affection is below the scenario's requirement.
    #[error("scenario {id} is locked: needs affection {required}, have {affection}")]
    ScenarioLocked {
        /// Scenario id.
        id: String,
        /// Affection the scenario requires.
        required: u8,
        /// Current affection.
        affection: u8,
    },

    /// A scenario is being played; finish or abort it first.
    #[error("scenario {0} is still running")]
    RunInProgress(String),

    /// No scenario is being played.
    #[error("no scenario is running")]
    NoActiveRun,

    /// The action is not available on the current screen.
    #[error("not available here: expected {expected:?} screen, on {actual:?}")]
    WrongScreen {
        /// Screen the action belongs to.
        expected: Screen,
        /// Screen currently shown.
        actual: Screen,
    },

    /// Scenario engine error.
    #[error("{0}")]
    Scenario(#[from] ScenarioError),
}
