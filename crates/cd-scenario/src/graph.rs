//! Validated dialogue graphs.
//!
//! A [`ScenarioGraph`] can only be built through [`ScenarioGraph::new`] (or
//! deserialized, which goes through the same checks), so every graph the
//! engine sees has an existing entry node, no dangling links and no cycles.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, ScenarioResult};
use crate::node::{DialogueNode, NodeId, NodeKind, SCENARIO_COMPLETE};

/// The plain, serializable table a graph is stored as.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDef {
    /// Node the run starts at.
    #[serde(default)]
    pub entry: NodeId,
    /// All nodes, in any order.
    pub nodes: Vec<DialogueNode>,
}

/// A fixed, acyclic dialogue graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GraphDef", into = "GraphDef")]
pub struct ScenarioGraph {
    entry: NodeId,
    nodes: BTreeMap<NodeId, DialogueNode>,
    /// Longest number of moves from each node to the end.
    remaining: BTreeMap<NodeId, usize>,
}

impl ScenarioGraph {
    /// Build a graph and validate it.
    pub fn new(
        entry: NodeId,
        nodes: impl IntoIterator<Item = DialogueNode>,
    ) -> Result<Self, GraphError> {
        let mut map = BTreeMap::new();
        for node in nodes {
            if node.id < 0 {
                return Err(GraphError::ReservedId(node.id));
            }
            if map.contains_key(&node.id) {
                return Err(GraphError::DuplicateNode(node.id));
            }
            map.insert(node.id, node);
        }
        if map.is_empty() {
            return Err(GraphError::Empty);
        }

        for node in map.values() {
            check_links(node, &map)?;
        }
        if !map.contains_key(&entry) {
            return Err(GraphError::MissingEntry(entry));
        }
        let order = post_order(&map).map_err(GraphError::Cycle)?;

        let unreachable = unreachable_from(entry, &map);
        if !unreachable.is_empty() {
            warn!("nodes {unreachable:?} cannot be reached from entry node {entry}");
        }

        let remaining = remaining_steps(&order, &map);

        Ok(Self {
            entry,
            nodes: map,
            remaining,
        })
    }

    /// Parse and validate a graph from its JSON table form.
    pub fn from_json(json: &str) -> ScenarioResult<Self> {
        let def: GraphDef = serde_json::from_str(json)?;
        Ok(Self::try_from(def)?)
    }

    /// The entry node id.
    pub fn entry(&self) -> NodeId {
        self.entry
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&DialogueNode> {
        self.nodes.get(&id)
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &DialogueNode> {
        self.nodes.values()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: construction rejects empty graphs.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of branching nodes.
    pub fn branch_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| matches!(n.kind(), NodeKind::Branching(_)))
            .count()
    }

    /// Most moves still possible from `id` before the scenario ends.
    pub fn remaining_steps(&self, id: NodeId) -> usize {
        self.remaining.get(&id).copied().unwrap_or(0)
    }

    /// Nodes no run starting at the entry node can visit, in id order.
    pub fn unreachable(&self) -> Vec<NodeId> {
        unreachable_from(self.entry, &self.nodes)
    }

    /// Moves on the longest path from the entry node to the end.
    pub fn longest_path(&self) -> usize {
        self.remaining_steps(self.entry)
    }
}

impl TryFrom<GraphDef> for ScenarioGraph {
    type Error = GraphError;

    fn try_from(def: GraphDef) -> Result<Self, Self::Error> {
        Self::new(def.entry, def.nodes)
    }
}

impl From<ScenarioGraph> for GraphDef {
    fn from(graph: ScenarioGraph) -> Self {
        Self {
            entry: graph.entry,
            nodes: graph.nodes.into_values().collect(),
        }
    }
}

fn check_links(
    node: &DialogueNode,
    nodes: &BTreeMap<NodeId, DialogueNode>,
) -> Result<(), GraphError> {
    match (&node.choices, node.next_node_id) {
        (Some(_), Some(_)) => return Err(GraphError::AmbiguousLinks(node.id)),
        (Some(choices), None) if choices.is_empty() => {
            return Err(GraphError::NoChoices(node.id));
        }
        _ => {}
    }
    for to in node.targets() {
        if to != SCENARIO_COMPLETE && !nodes.contains_key(&to) {
            return Err(GraphError::DanglingLink { from: node.id, to });
        }
    }
    Ok(())
}

/// Successors that are real nodes.
fn successors(id: NodeId, nodes: &BTreeMap<NodeId, DialogueNode>) -> Vec<NodeId> {
    nodes
        .get(&id)
        .map(|n| n.targets())
        .unwrap_or_default()
        .into_iter()
        .filter(|&to| to != SCENARIO_COMPLETE)
        .collect()
}

/// Iterative three-colour DFS over every node.
///
/// Returns the nodes in post-order, each after all of its successors, or a
/// node on the first cycle found.
fn post_order(nodes: &BTreeMap<NodeId, DialogueNode>) -> Result<Vec<NodeId>, NodeId> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Visiting,
        Done,
    }

    let mut marks: HashMap<NodeId, Mark> = HashMap::with_capacity(nodes.len());
    let mut order = Vec::with_capacity(nodes.len());
    for &root in nodes.keys() {
        if marks.contains_key(&root) {
            continue;
        }
        marks.insert(root, Mark::Visiting);
        let mut stack = vec![(root, successors(root, nodes).into_iter())];

        while let Some((id, edges)) = stack.last_mut() {
            let id = *id;
            match edges.next() {
                Some(to) => match marks.get(&to) {
                    Some(Mark::Visiting) => return Err(to),
                    Some(Mark::Done) => {}
                    None => {
                        marks.insert(to, Mark::Visiting);
                        stack.push((to, successors(to, nodes).into_iter()));
                    }
                },
                None => {
                    marks.insert(id, Mark::Done);
                    order.push(id);
                    stack.pop();
                }
            }
        }
    }
    Ok(order)
}

fn unreachable_from(entry: NodeId, nodes: &BTreeMap<NodeId, DialogueNode>) -> Vec<NodeId> {
    let mut seen = HashSet::from([entry]);
    let mut queue = VecDeque::from([entry]);
    while let Some(id) = queue.pop_front() {
        for to in successors(id, nodes) {
            if seen.insert(to) {
                queue.push_back(to);
            }
        }
    }
    nodes.keys().copied().filter(|id| !seen.contains(id)).collect()
}

/// Longest path to the end from each node. `order` must list every node
/// after its successors.
fn remaining_steps(
    order: &[NodeId],
    nodes: &BTreeMap<NodeId, DialogueNode>,
) -> BTreeMap<NodeId, usize> {
    let mut remaining = BTreeMap::new();
    for &id in order {
        let after = |to: NodeId| match to {
            SCENARIO_COMPLETE => 1,
            next => 1 + remaining.get(&next).copied().unwrap_or(0),
        };
        let steps = match nodes.get(&id).map(DialogueNode::kind) {
            None | Some(NodeKind::Terminal) => 0,
            Some(NodeKind::Linear(next)) => after(next),
            Some(NodeKind::Branching(choices)) => choices
                .iter()
                .map(|c| after(c.next_node_id))
                .max()
                .unwrap_or(0),
        };
        remaining.insert(id, steps);
    }
    remaining
}
