//! Companion app state for Cutieroid.
//!
//! Models the app around the dialogue engine: which screen is showing, the
//! status of the connected doll, the simulated device scan, and a
//! [`CompanionSession`] that gates scenario selection and applies the
//! affection a finished scenario earned.

pub mod config;
pub mod device;
pub mod error;
pub mod screen;
pub mod session;
pub mod status;

pub use config::AppConfig;
pub use device::{Device, simulated_scan};
pub use error::{AppError, AppResult};
pub use screen::{Navigation, Screen, route};
pub use session::{ActiveRun, CompanionSession, Turn};
pub use status::DollStatus;
