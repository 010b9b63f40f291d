//! Built-in sample scenarios.
//!
//! Every catalog entry plays the same "first meeting" dialogue; only the
//! metadata differs.

use crate::catalog::{Scenario, ScenarioMeta};
use crate::error::ScenarioResult;
use crate::graph::ScenarioGraph;
use crate::node::{Choice, DialogueNode};

/// Name of the default companion character.
pub const CHARACTER: &str = "Gourai";

/// Speaker used for narration lines.
pub const SYSTEM_SPEAKER: &str = "System";

/// The sample dialogue: one opening question, two branches, a shared ending.
pub fn first_meeting() -> ScenarioResult<ScenarioGraph> {
    let nodes = vec![
        DialogueNode::new(
            0,
            CHARACTER,
            "Master, do you have a moment? There's something I'd like to talk about.",
        )
        .with_choice(Choice::new("Of course, what is it?", 2, 1))
        .with_choice(Choice::new("I'm busy right now.", -1, 2)),
        DialogueNode::new(
            1,
            CHARACTER,
            "Thank you! Actually, lately the time I spend with you has been so much fun...",
        )
        .with_choice(Choice::new("I'm having fun too.", 3, 3))
        .with_choice(Choice::new("I'm glad you feel that way.", 2, 3)),
        DialogueNode::new(2, CHARACTER, "I see... Understood. Later, then...").with_next(4),
        DialogueNode::new(
            3,
            CHARACTER,
            "Ehehe, I'm counting on you from now on too, Master!",
        )
        .with_next(4),
        DialogueNode::new(4, SYSTEM_SPEAKER, "The scenario has ended.").ending(),
    ];
    Ok(ScenarioGraph::new(0, nodes)?)
}

/// Metadata for the five sample scenarios, in display order.
pub fn metas() -> Vec<ScenarioMeta> {
    vec![
        ScenarioMeta::new("s1", "First Meeting")
            .with_description("Your first conversation with Gourai. Get to know each other.")
            .with_unlock(0, "Available from the start")
            .with_estimate(5),
        ScenarioMeta::new("s2", "Training Days")
            .with_description("An everyday story of training together.")
            .with_unlock(20, "Affection Lv.2")
            .with_estimate(8),
        ScenarioMeta::new("s3", "A Day Off")
            .with_description("A special day spent together off duty.")
            .with_unlock(40, "Affection Lv.4")
            .with_estimate(12),
        ScenarioMeta::new("s4", "Promise at Dusk")
            .with_description("A precious promise made in the setting sun.")
            .with_unlock(60, "Affection Lv.6")
            .with_estimate(10),
        ScenarioMeta::new("s5", "Hearts Aligned")
            .with_description("Learn each other's true feelings.")
            .with_unlock(90, "Affection Lv.9")
            .with_estimate(15),
    ]
}

/// All sample scenarios.
pub fn scenarios() -> ScenarioResult<Vec<Scenario>> {
    let graph = first_meeting()?;
    Ok(metas()
        .into_iter()
        .map(|meta| Scenario::new(meta, graph.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{advance, choose, is_complete, start};

    #[test]
    fn first_meeting_is_valid() {
        let graph = first_meeting().unwrap();
        assert_eq!(graph.len(), 5);
        assert_eq!(graph.branch_count(), 2);
        assert_eq!(graph.longest_path(), 3);
    }

    #[test]
    fn warm_path_collects_five() {
        let graph = first_meeting().unwrap();
        let state = start(&graph, 0).unwrap();
        let state = choose(&state, &graph, 0).unwrap();
        let state = choose(&state, &graph, 0).unwrap();
        let state = advance(&state, &graph).unwrap();
        assert!(is_complete(&state));
        assert_eq!(state.cumulative_affection_delta(), 5);
        assert_eq!(state.path(), &[0, 1, 3, 4]);
    }

    #[test]
    fn cold_path_loses_one() {
        let graph = first_meeting().unwrap();
        let state = start(&graph, 0).unwrap();
        let state = choose(&state, &graph, 1).unwrap();
        let state = advance(&state, &graph).unwrap();
        assert!(is_complete(&state));
        assert_eq!(state.cumulative_affection_delta(), -1);
    }

    #[test]
    fn metas_ordered_by_requirement() {
        let required: Vec<u8> = metas().iter().map(|m| m.required_affection).collect();
        assert_eq!(required, vec![0, 20, 40, 60, 90]);
    }
}
