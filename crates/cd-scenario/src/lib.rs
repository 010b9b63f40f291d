//! Scenario dialogue graphs and the engine that walks them.
//!
//! A scenario is a small directed graph of [`DialogueNode`]s. Linear nodes
//! point at a single successor, branching nodes offer [`Choice`]s that carry
//! an affection delta. The [`engine`] module walks a validated
//! [`ScenarioGraph`] with pure functions over [`RunState`] snapshots; pacing,
//! rendering and what the accumulated delta means are left to the caller.

/// Built-in sample scenarios.
pub mod builtin;
/// Scenario metadata and the catalog of playable scenarios.
pub mod catalog;
/// Pure traversal functions over a scenario graph.
pub mod engine;
/// Error types for scenario loading and traversal.
pub mod error;
/// Validated dialogue graphs.
pub mod graph;
/// Dialogue nodes and choices.
pub mod node;

pub use catalog::{Catalog, Scenario, ScenarioMeta};
pub use engine::{RunOutcome, RunState, RunStatus};
pub use error::{GraphError, ScenarioError, ScenarioResult};
pub use graph::ScenarioGraph;
pub use node::{Choice, DialogueNode, NodeId, NodeKind, SCENARIO_COMPLETE};
