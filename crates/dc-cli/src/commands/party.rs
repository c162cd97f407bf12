use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dc_simulation::{RunEventKind, Scenario, SimConfig, run_scripted};

use super::format_rate;

pub fn run(
    world: Option<&Path>,
    party: Option<&str>,
    encounters: Option<&str>,
    scenario: Option<&Path>,
    runs: u64,
    seed: u64,
    trace: bool,
) -> Result<(), String> {
    let world = super::load_world(world)?;

    let scenario = match (scenario, party, encounters) {
        (Some(path), _, _) => Scenario::load(path)
            .map_err(|e| format!("cannot load scenario {}: {e}", path.display()))?,
        (None, Some(party), Some(encounters)) => {
            Scenario::parse(party, encounters).map_err(|e| e.to_string())?
        }
        _ => return Err("either --scenario or both --party and --encounters are required".into()),
    };

    let config = SimConfig::default().with_seed(seed).with_trace(trace);
    let summary = run_scripted(&world, &scenario, &config, runs).map_err(|e| e.to_string())?;

    let roster: Vec<String> = scenario
        .party
        .iter()
        .map(|(class, level)| format!("{class} {level}"))
        .collect();
    println!(
        "  {} {}",
        "Party".bold(),
        format!("({runs} runs, seed={seed})").dimmed()
    );
    println!("  {}", roster.join(", "));
    println!("  {}", scenario.encounters.join(" -> ").dimmed());
    println!();

    if trace {
        println!("  {}", "First Run".bold().underline());
        for event in summary.trace.events() {
            let step = format!("[{:>2}]", event.step + 1).dimmed();
            let desc = match &event.kind {
                RunEventKind::Defeated { .. } | RunEventKind::Completed { victory: false } => {
                    event.description.red().to_string()
                }
                RunEventKind::Completed { victory: true } => event.description.green().to_string(),
                _ => event.description.clone(),
            };
            println!("  {step} {desc}");
        }
        println!();
    }

    println!(
        "  Won {}/{} ({})",
        summary.wins,
        summary.runs,
        format_rate(summary.win_rate)
    );

    if !summary.defeated_by.is_empty() {
        println!();
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Defeated By", "Runs"]);
        for (encounter, count) in &summary.defeated_by {
            table.add_row(vec![encounter.clone(), count.to_string()]);
        }
        println!("{table}");
    }

    Ok(())
}
