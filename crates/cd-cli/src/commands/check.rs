use std::path::Path;

use cd_scenario::Scenario;

pub fn run(file: &Path) -> Result<(), String> {
    let scenario = Scenario::load(file).map_err(|e| e.to_string())?;
    let graph = &scenario.graph;

    println!("  All checks passed for '{}'.", scenario.meta.title);
    println!(
        "  {} nodes, {} branching, longest path {} steps",
        graph.len(),
        graph.branch_count(),
        graph.longest_path()
    );

    let unreachable = graph.unreachable();
    if !unreachable.is_empty() {
        println!("  warning: nodes {unreachable:?} cannot be reached from the entry node");
    }

    Ok(())
}
