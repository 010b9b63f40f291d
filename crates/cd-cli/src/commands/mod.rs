pub mod check;
pub mod export;
pub mod list;
pub mod play;
pub mod scan;
pub mod show;

use std::path::Path;

use cd_scenario::{Catalog, Scenario};

/// Load the built-in catalog.
fn builtin_catalog() -> Result<Catalog, String> {
    Catalog::builtin().map_err(|e| format!("built-in scenarios are broken: {e}"))
}

/// Load a scenario from a file, or the built-in one with this id.
fn resolve_scenario(id: Option<&str>, file: Option<&Path>) -> Result<Scenario, String> {
    match (file, id) {
        (Some(path), _) => Scenario::load(path).map_err(|e| e.to_string()),
        (None, Some(id)) => builtin_catalog()?
            .get(id)
            .cloned()
            .map_err(|e| e.to_string()),
        (None, None) => Err("give a scenario id or --file".into()),
    }
}
