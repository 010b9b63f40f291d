use std::path::Path;

use cd_scenario::{DialogueNode, NodeKind, SCENARIO_COMPLETE};

pub fn run(id: Option<&str>, file: Option<&Path>) -> Result<(), String> {
    let scenario = super::resolve_scenario(id, file)?;
    let meta = &scenario.meta;

    println!("  {} ({})", meta.title, meta.id);
    if !meta.description.is_empty() {
        println!("  {}", meta.description);
    }
    println!(
        "  Requires affection {}, about {} min",
        meta.required_affection, meta.estimated_minutes
    );
    println!();

    for node in scenario.graph.nodes() {
        print_node(node, node.id == scenario.graph.entry());
    }

    Ok(())
}

fn print_node(node: &DialogueNode, is_entry: bool) {
    let marker = if is_entry { " (entry)" } else { "" };
    println!("  [{}]{marker} {}: {}", node.id, node.speaker, node.text);
    match node.kind() {
        NodeKind::Branching(choices) => {
            for (i, choice) in choices.iter().enumerate() {
                println!(
                    "      {}. {} ({:+}) -> {}",
                    i + 1,
                    choice.text,
                    choice.affection_delta,
                    target(choice.next_node_id)
                );
            }
        }
        NodeKind::Linear(next) => println!("      -> {next}"),
        NodeKind::Terminal => println!("      (end)"),
    }
}

fn target(id: i32) -> String {
    if id == SCENARIO_COMPLETE {
        "end".to_string()
    } else {
        id.to_string()
    }
}
