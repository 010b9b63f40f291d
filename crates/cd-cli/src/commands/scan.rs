use cd_app::AppConfig;
use comfy_table::{ContentArrangement, Table};

pub fn run(no_pause: bool) -> Result<(), String> {
    let config = if no_pause {
        AppConfig::default().without_delays()
    } else {
        AppConfig::default()
    };

    println!("  Scanning for dolls...");
    std::thread::sleep(config.scan_delay);
    let devices = cd_app::simulated_scan();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Device", "Name", "Signal (dBm)"]);
    for device in &devices {
        table.add_row(vec![
            device.id.clone(),
            device.name.clone(),
            device.rssi.to_string(),
        ]);
    }

    println!("{table}");
    println!("  {} dolls found", devices.len());

    Ok(())
}
