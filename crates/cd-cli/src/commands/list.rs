use comfy_table::{ContentArrangement, Table};

pub fn run(affection: u8) -> Result<(), String> {
    let catalog = super::builtin_catalog()?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Title", "Minutes", "Requires", "Status"]);

    for scenario in catalog.iter() {
        let meta = &scenario.meta;
        let status = if meta.is_unlocked(affection) {
            "unlocked".to_string()
        } else {
            format!("locked ({})", meta.unlock_condition)
        };
        table.add_row(vec![
            meta.id.clone(),
            meta.title.clone(),
            meta.estimated_minutes.to_string(),
            meta.required_affection.to_string(),
            status,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} of {} scenarios unlocked at affection {affection}",
        catalog.unlocked(affection).count(),
        catalog.len()
    );

    Ok(())
}
