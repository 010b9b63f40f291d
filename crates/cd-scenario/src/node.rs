//! Dialogue nodes and choices.

use serde::{Deserialize, Serialize};

/// Identifier of a node within one scenario graph.
pub type NodeId = i32;

/// Link target meaning "the scenario is over".
pub const SCENARIO_COMPLETE: NodeId = -1;

/// A single line of dialogue in a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueNode {
    /// Unique identifier within the graph.
    pub id: NodeId,
    /// Display name of the speaking character.
    pub speaker: String,
    /// The line shown to the user.
    pub text: String,
    /// Options offered on a branching node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    /// Successor of a linear node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_node_id: Option<NodeId>,
}

/// How a node hands control to its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// The user picks one of these.
    Branching(&'a [Choice]),
    /// The run moves on to this node.
    Linear(NodeId),
    /// Reaching this node ends the scenario.
    Terminal,
}

impl DialogueNode {
    /// Create a node with no outgoing links.
    pub fn new(id: NodeId, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            speaker: speaker.into(),
            text: text.into(),
            choices: None,
            next_node_id: None,
        }
    }

    /// Add a choice, turning this into a branching node.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.get_or_insert_with(Vec::new).push(choice);
        self
    }

    /// Set the linear successor.
    pub fn with_next(mut self, next: NodeId) -> Self {
        self.next_node_id = Some(next);
        self
    }

    /// Mark this node as the last line of the scenario.
    pub fn ending(self) -> Self {
        self.with_next(SCENARIO_COMPLETE)
    }

    /// Classify the node by its outgoing links.
    ///
    /// Choices win over a linear link; graphs that carry both are rejected
    /// during construction, so this only matters for unvalidated nodes.
    pub fn kind(&self) -> NodeKind<'_> {
        match (&self.choices, self.next_node_id) {
            (Some(choices), _) => NodeKind::Branching(choices),
            (None, Some(next)) if next != SCENARIO_COMPLETE => NodeKind::Linear(next),
            (None, _) => NodeKind::Terminal,
        }
    }

    /// Whether arriving here completes the scenario.
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind(), NodeKind::Terminal)
    }

    /// Every link target of this node, sentinel included.
    pub fn targets(&self) -> Vec<NodeId> {
        match &self.choices {
            Some(choices) => choices.iter().map(|c| c.next_node_id).collect(),
            None => self.next_node_id.into_iter().collect(),
        }
    }
}

/// A selectable answer on a branching node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Text shown on the button.
    pub text: String,
    /// Signed change to the affection accumulator.
    pub affection_delta: i32,
    /// Node reached after choosing this.
    pub next_node_id: NodeId,
}

impl Choice {
    /// Create a choice.
    pub fn new(text: impl Into<String>, affection_delta: i32, next_node_id: NodeId) -> Self {
        Self {
            text: text.into(),
            affection_delta,
            next_node_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_builder() {
        let node = DialogueNode::new(0, "Gourai", "Do you have a moment?")
            .with_choice(Choice::new("Of course", 2, 1))
            .with_choice(Choice::new("I'm busy", -1, 2));

        assert_eq!(node.id, 0);
        assert_eq!(node.speaker, "Gourai");
        assert_eq!(node.choices.as_ref().map(Vec::len), Some(2));
        assert_eq!(node.next_node_id, None);
    }

    #[test]
    fn classify_nodes() {
        let branching = DialogueNode::new(0, "a", "b").with_choice(Choice::new("x", 1, 1));
        assert!(matches!(branching.kind(), NodeKind::Branching(c) if c.len() == 1));

        let linear = DialogueNode::new(1, "a", "b").with_next(4);
        assert_eq!(linear.kind(), NodeKind::Linear(4));

        let ending = DialogueNode::new(4, "a", "b").ending();
        assert_eq!(ending.kind(), NodeKind::Terminal);
        assert!(ending.is_terminal());

        let bare = DialogueNode::new(5, "a", "b");
        assert!(bare.is_terminal());
    }

    #[test]
    fn targets_follow_links() {
        let node = DialogueNode::new(0, "a", "b")
            .with_choice(Choice::new("x", 1, 1))
            .with_choice(Choice::new("y", 0, SCENARIO_COMPLETE));
        assert_eq!(node.targets(), vec![1, SCENARIO_COMPLETE]);
        assert_eq!(DialogueNode::new(2, "a", "b").targets(), Vec::<NodeId>::new());
    }

    #[test]
    fn json_uses_camel_case_and_omits_missing_links() {
        let node = DialogueNode::new(2, "Gourai", "See you later...").with_next(4);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["nextNodeId"], 4);
        assert!(json.get("choices").is_none());

        let parsed: DialogueNode = serde_json::from_str(
            r#"{"id":0,"speaker":"s","text":"t","choices":[{"text":"a","affectionDelta":-1,"nextNodeId":2}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.choices.unwrap()[0].affection_delta, -1);
    }
}
