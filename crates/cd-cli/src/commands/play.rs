//! Play a scenario from the terminal.
//!
//! Reads one line per move from stdin: a number picks a choice, anything
//! else moves past a linear line, `q` aborts. End of input aborts too.

use std::io::BufRead;
use std::path::PathBuf;

use cd_app::{AppConfig, AppError, CompanionSession, Screen, Turn};
use cd_scenario::{DialogueNode, NodeKind, RunOutcome, Scenario};
use colored::Colorize;

pub struct PlayOptions {
    pub id: Option<String>,
    pub file: Option<PathBuf>,
    pub affection: Option<u8>,
    pub battery: Option<u8>,
    pub no_pause: bool,
}

pub fn run(opts: PlayOptions) -> Result<(), String> {
    let mut catalog = super::builtin_catalog()?;
    let id = match &opts.file {
        Some(path) => {
            let scenario = Scenario::load(path).map_err(|e| e.to_string())?;
            let id = scenario.meta.id.clone();
            catalog.insert(scenario);
            id
        }
        None => opts.id.clone().unwrap_or_else(|| "s1".to_string()),
    };

    let config = if opts.no_pause {
        AppConfig::default().without_delays()
    } else {
        AppConfig::default()
    };
    let mut session = CompanionSession::new(config, catalog);
    let device = session
        .scan()
        .into_iter()
        .next()
        .ok_or("no dolls found")?;
    session.connect(&device).map_err(describe)?;
    if let Some(affection) = opts.affection {
        session.status_mut().affection_level = affection.min(100);
    }
    if let Some(battery) = opts.battery {
        session.status_mut().battery_level = battery.min(100);
    }
    session.open(Screen::Scenario).map_err(describe)?;

    let scenario = session
        .catalog()
        .get(&id)
        .cloned()
        .map_err(|e| e.to_string())?;
    let affection_before = session.status().affection_level;
    let mut turn = session.select_scenario(&id).map_err(describe)?;

    println!(
        "  {} with {}",
        scenario.meta.title.bold(),
        session.status().character_name
    );
    println!();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if let Turn::Finished(outcome) = &turn {
            print_ending(&scenario, outcome);
            print_summary(outcome, affection_before, &session);
            return Ok(());
        }

        let node = session
            .current_node()
            .cloned()
            .ok_or("scenario lost track of its current node")?;
        let progress = session.progress().unwrap_or(0);
        print_node(&node, progress);

        let input = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => return Err(format!("cannot read input: {e}")),
            None => "q".to_string(),
        };
        let input = input.trim();

        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            let outcome = session.abort().map_err(describe)?;
            println!(
                "  Scenario aborted. {} not applied.",
                format!("Affection {:+}", outcome.affection_delta).dimmed()
            );
            return Ok(());
        }

        turn = match node.kind() {
            NodeKind::Branching(choices) => {
                let picked = input
                    .parse::<usize>()
                    .ok()
                    .filter(|n| (1..=choices.len()).contains(n));
                let Some(n) = picked else {
                    println!(
                        "  Pick a number from 1 to {}, or q to quit.",
                        choices.len()
                    );
                    continue;
                };
                let delta = choices[n - 1].affection_delta;
                let next = session.choose(n - 1).map_err(describe)?;
                print_delta(delta);
                std::thread::sleep(session.config().choice_pause);
                next
            }
            NodeKind::Linear(_) | NodeKind::Terminal => session.advance().map_err(describe)?,
        };
    }
}

fn describe(e: AppError) -> String {
    e.to_string()
}

fn print_node(node: &DialogueNode, progress: u8) {
    println!("  [{progress:>3}%] {}: {}", node.speaker.bold(), node.text);
    match node.kind() {
        NodeKind::Branching(choices) => {
            for (i, choice) in choices.iter().enumerate() {
                println!("      {}. {}", i + 1, choice.text);
            }
        }
        NodeKind::Linear(_) | NodeKind::Terminal => println!("      [Enter] next, q to quit"),
    }
}

fn print_delta(delta: i32) {
    let text = format!("Affection {delta:+}");
    if delta > 0 {
        println!("  {}", text.cyan().bold());
    } else {
        println!("  {}", text.dimmed());
    }
}

/// Show the closing line if the run stopped on a terminal node.
fn print_ending(scenario: &Scenario, outcome: &RunOutcome) {
    let last = outcome
        .path
        .last()
        .and_then(|&id| scenario.graph.node(id))
        .filter(|node| node.is_terminal());
    if let Some(node) = last {
        println!("  [100%] {}: {}", node.speaker.bold(), node.text);
    }
}

fn print_summary(outcome: &RunOutcome, before: u8, session: &CompanionSession) {
    let after = session.status().affection_level;
    println!();
    println!(
        "  Scenario complete. {} ({before} -> {after}, Lv.{})",
        format!("Affection {:+}", outcome.affection_delta).cyan().bold(),
        session.status().affection_tier()
    );
}
