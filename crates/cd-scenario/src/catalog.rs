//! Scenario metadata and the catalog of playable scenarios.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ScenarioError, ScenarioResult};
use crate::graph::{GraphDef, ScenarioGraph};

/// Descriptive data shown when picking a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioMeta {
    /// Short identifier, e.g. `s1`.
    pub id: String,
    /// Display title.
    pub title: String,
    /// One-line summary.
    #[serde(default)]
    pub description: String,
    /// Human-readable unlock requirement.
    #[serde(default)]
    pub unlock_condition: String,
    /// Affection level (0-100) needed to play.
    #[serde(default)]
    pub required_affection: u8,
    /// Rough play time in minutes.
    #[serde(default)]
    pub estimated_minutes: u32,
}

impl ScenarioMeta {
    /// Create metadata that is unlocked from the start.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            unlock_condition: String::new(),
            required_affection: 0,
            estimated_minutes: 0,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Require an affection level, with the text shown while locked.
    pub fn with_unlock(mut self, required_affection: u8, condition: impl Into<String>) -> Self {
        self.required_affection = required_affection;
        self.unlock_condition = condition.into();
        self
    }

    /// Set the estimated play time.
    pub fn with_estimate(mut self, minutes: u32) -> Self {
        self.estimated_minutes = minutes;
        self
    }

    /// Whether a doll at this affection level may play the scenario.
    pub fn is_unlocked(&self, affection: u8) -> bool {
        affection >= self.required_affection
    }
}

/// A playable scenario: metadata plus its dialogue graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    /// Descriptive data.
    pub meta: ScenarioMeta,
    /// The dialogue to walk.
    pub graph: ScenarioGraph,
}

/// On-disk form; the graph is validated after parsing.
#[derive(Deserialize)]
struct ScenarioDocument {
    meta: ScenarioMeta,
    graph: GraphDef,
}

impl Scenario {
    /// Pair metadata with a graph.
    pub fn new(meta: ScenarioMeta, graph: ScenarioGraph) -> Self {
        Self { meta, graph }
    }

    /// Parse a scenario document.
    pub fn from_json(json: &str) -> ScenarioResult<Self> {
        let doc: ScenarioDocument = serde_json::from_str(json)?;
        let graph = ScenarioGraph::try_from(doc.graph)?;
        Ok(Self::new(doc.meta, graph))
    }

    /// Read a scenario document from disk.
    pub fn load(path: &Path) -> ScenarioResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Render as a pretty-printed document.
    pub fn to_json(&self) -> ScenarioResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The scenarios a companion offers, in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    scenarios: Vec<Scenario>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sample scenarios shipped with the app.
    pub fn builtin() -> ScenarioResult<Self> {
        let mut catalog = Self::new();
        for scenario in crate::builtin::scenarios()? {
            catalog.insert(scenario);
        }
        Ok(catalog)
    }

    /// Add a scenario, replacing any with the same id.
    pub fn insert(&mut self, scenario: Scenario) {
        match self.scenarios.iter_mut().find(|s| s.meta.id == scenario.meta.id) {
            Some(existing) => *existing = scenario,
            None => self.scenarios.push(scenario),
        }
    }

    /// Look up a scenario by id.
    pub fn get(&self, id: &str) -> ScenarioResult<&Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.meta.id == id)
            .ok_or_else(|| ScenarioError::ScenarioNotFound(id.to_string()))
    }

    /// All scenarios in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    /// Scenarios a doll at this affection level may play.
    pub fn unlocked(&self, affection: u8) -> impl Iterator<Item = &Scenario> {
        self.scenarios
            .iter()
            .filter(move |s| s.meta.is_unlocked(affection))
    }

    /// Number of scenarios.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
