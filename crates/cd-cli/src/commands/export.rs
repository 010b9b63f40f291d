use std::path::Path;

pub fn run(id: &str, output: Option<&Path>) -> Result<(), String> {
    let scenario = super::resolve_scenario(Some(id), None)?;
    let content = scenario
        .to_json()
        .map_err(|e| format!("JSON serialization error: {e}"))?;

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        println!("{content}");
    }

    Ok(())
}
