//! Pure traversal functions over a [`ScenarioGraph`].
//!
//! Every operation takes the current [`RunState`] by reference and returns a
//! new one, so a rejected move leaves the caller's state exactly as it was.
//! The engine knows nothing about timing; any pause between a choice and the
//! next line belongs to the caller.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, ScenarioError, ScenarioResult};
use crate::graph::ScenarioGraph;
use crate::node::{Choice, DialogueNode, NodeId, NodeKind, SCENARIO_COMPLETE};

/// Whether a run can still move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// The run is waiting on an advance or a choice.
    Running,
    /// The run reached the end of the scenario.
    Complete,
}

/// Snapshot of one walk through a scenario graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    current_node_id: NodeId,
    cumulative_affection_delta: i32,
    status: RunStatus,
    path: Vec<NodeId>,
}

impl RunState {
    /// Node the run is positioned on, or [`SCENARIO_COMPLETE`] after a
    /// direct jump to the sentinel.
    pub fn current_node_id(&self) -> NodeId {
        self.current_node_id
    }

    /// Sum of the affection deltas of every choice taken so far.
    pub fn cumulative_affection_delta(&self) -> i32 {
        self.cumulative_affection_delta
    }

    /// Current status.
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Nodes visited so far, entry first.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Number of moves made.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// What a finished or abandoned run reports back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome {
    /// Final value of the affection accumulator.
    pub affection_delta: i32,
    /// Whether the run reached the end of the scenario.
    pub completed: bool,
    /// Nodes visited, entry first.
    pub path: Vec<NodeId>,
}

/// Begin a run at `entry`.
///
/// A run whose entry node is already terminal starts out complete.
pub fn start(graph: &ScenarioGraph, entry: NodeId) -> ScenarioResult<RunState> {
    if !graph.contains(entry) {
        return Err(GraphError::MissingEntry(entry).into());
    }
    let state = arrive(
        graph,
        RunState {
            current_node_id: entry,
            cumulative_affection_delta: 0,
            status: RunStatus::Running,
            path: Vec::new(),
        },
        entry,
    )?;
    debug!("run started at node {entry} ({:?})", state.status);
    Ok(state)
}

/// Follow the linear link of the current node.
pub fn advance(state: &RunState, graph: &ScenarioGraph) -> ScenarioResult<RunState> {
    let node = current_running_node(state, graph)?;
    match node.kind() {
        NodeKind::Linear(next) => {
            debug!("advance {} -> {next}", node.id);
            arrive(graph, state.clone(), next)
        }
        NodeKind::Branching(_) => Err(ScenarioError::AwaitingChoice(node.id)),
        NodeKind::Terminal => Err(ScenarioError::Finished),
    }
}

/// Take choice `index` on the current branching node.
pub fn choose(state: &RunState, graph: &ScenarioGraph, index: usize) -> ScenarioResult<RunState> {
    let node = current_running_node(state, graph)?;
    let choices: &[Choice] = match node.kind() {
        NodeKind::Branching(choices) => choices,
        NodeKind::Linear(_) | NodeKind::Terminal => &[],
    };
    let choice = choices.get(index).ok_or(ScenarioError::InvalidChoice {
        node: node.id,
        index,
        available: choices.len(),
    })?;

    debug!(
        "choice {index} at node {}: {:+} -> {}",
        node.id, choice.affection_delta, choice.next_node_id
    );
    let total = state
        .cumulative_affection_delta
        .checked_add(choice.affection_delta)
        .ok_or(ScenarioError::DeltaOverflow { node: node.id })?;
    let mut next = state.clone();
    next.cumulative_affection_delta = total;
    arrive(graph, next, choice.next_node_id)
}

/// Whether the run reached the end of the scenario.
pub fn is_complete(state: &RunState) -> bool {
    state.status == RunStatus::Complete
}

/// The node to render, if the run is positioned on one.
pub fn current_node<'g>(state: &RunState, graph: &'g ScenarioGraph) -> Option<&'g DialogueNode> {
    graph.node(state.current_node_id)
}

/// How far through the scenario the run is, 0 to 100.
///
/// Measured against the longest path still open from the current node, so
/// the figure never moves backwards along a run.
pub fn progress(state: &RunState, graph: &ScenarioGraph) -> u8 {
    if is_complete(state) {
        return 100;
    }
    let taken = state.steps();
    let total = taken + graph.remaining_steps(state.current_node_id);
    if total == 0 {
        return 100;
    }
    u8::try_from(taken * 100 / total).unwrap_or(100)
}

/// Abandon the run and report where it got to.
pub fn abort(state: RunState) -> RunOutcome {
    debug!(
        "run abandoned at node {} with delta {:+}",
        state.current_node_id, state.cumulative_affection_delta
    );
    into_outcome(state)
}

/// Close a completed run.
pub fn finish(state: RunState) -> ScenarioResult<RunOutcome> {
    if !is_complete(&state) {
        return Err(ScenarioError::StillRunning(state.current_node_id));
    }
    Ok(into_outcome(state))
}

fn into_outcome(state: RunState) -> RunOutcome {
    RunOutcome {
        affection_delta: state.cumulative_affection_delta,
        completed: is_complete(&state),
        path: state.path,
    }
}

fn current_running_node<'g>(
    state: &RunState,
    graph: &'g ScenarioGraph,
) -> ScenarioResult<&'g DialogueNode> {
    if is_complete(state) {
        return Err(ScenarioError::Finished);
    }
    graph
        .node(state.current_node_id)
        .ok_or_else(|| GraphError::MissingNode(state.current_node_id).into())
}

/// Move to `target`, resolving the sentinel and terminal nodes.
fn arrive(graph: &ScenarioGraph, mut state: RunState, target: NodeId) -> ScenarioResult<RunState> {
    state.current_node_id = target;
    if target == SCENARIO_COMPLETE {
        state.status = RunStatus::Complete;
        return Ok(state);
    }
    let node = graph.node(target).ok_or(GraphError::MissingNode(target))?;
    state.path.push(target);
    if node.is_terminal() {
        debug!("reached terminal node {target}");
        state.status = RunStatus::Complete;
    }
    Ok(state)
}
