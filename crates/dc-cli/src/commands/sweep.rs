use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dc_simulation::batch::parse_list;
use dc_simulation::{SimConfig, sweep};

use super::format_rate;

pub fn run(
    world: Option<&Path>,
    encounters: &str,
    level: u32,
    runs: u64,
    seed: u64,
) -> Result<(), String> {
    let world = super::load_world(world)?;
    let encounters = parse_list(encounters);
    if encounters.is_empty() {
        return Err("no encounters given".into());
    }

    let config = SimConfig::default().with_seed(seed);
    let result = sweep(&world, &encounters, level, runs, &config).map_err(|e| e.to_string())?;

    println!(
        "  {} {}",
        "Sweep".bold(),
        format!("(level {level}, {runs} runs per party, seed={seed})").dimmed()
    );
    println!("  {}", encounters.join(" -> ").dimmed());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Party", "Won", "Win Rate"]);
    for entry in &result.entries {
        table.add_row(vec![
            entry.party.join(", "),
            format!("{}/{}", entry.wins, entry.runs),
            format_rate(entry.win_rate),
        ]);
    }
    println!("{table}");
    println!();
    println!(
        "  {} parties, mean win rate {}",
        result.entries.len(),
        format_rate(result.mean_win_rate)
    );

    Ok(())
}
