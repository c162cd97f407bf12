use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dc_simulation::{RecordWriter, Report, SimConfig, run_batch};

use super::format_rate;

pub fn run(
    world: Option<&Path>,
    runs: u64,
    seed: u64,
    out: Option<&Path>,
    append: bool,
    json: bool,
) -> Result<(), String> {
    let world = super::load_world(world)?;
    let config = SimConfig::default().with_seed(seed);
    let records = run_batch(&world, &config, runs).map_err(|e| e.to_string())?;

    if let Some(dir) = out {
        let mut writer = if append {
            RecordWriter::append_to(dir, &world)
        } else {
            RecordWriter::create(dir, &world)
        }
        .map_err(|e| format!("cannot open record tables in {}: {e}", dir.display()))?;
        for record in &records {
            writer.append(record).map_err(|e| e.to_string())?;
        }
        writer.flush().map_err(|e| e.to_string())?;
        tracing::debug!(dir = %dir.display(), rows = writer.rows(), append, "record tables written");
        if !json {
            println!(
                "  Wrote {} records to {} and {}",
                writer.rows(),
                writer.basic_path().display(),
                writer.extended_path().display()
            );
            println!();
        }
    }

    let report = Report::from_records(&world, &records);
    if json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{text}");
        return Ok(());
    }

    print_report(&report, seed);
    Ok(())
}

fn print_report(report: &Report, seed: u64) {
    println!(
        "  {} {}",
        "Batch".bold(),
        format!("({} runs, seed={seed})", report.runs).dimmed()
    );
    println!(
        "  {}/{} runs won in total ({})",
        report.wins,
        report.runs,
        format_rate(report.win_rate())
    );
    println!();

    println!("  {}", "Classes".bold().underline());
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Class", "Appearances", "Won", "Win Rate", "Average Level"]);
    for stats in &report.classes {
        table.add_row(vec![
            stats.class.clone(),
            stats.appearances.to_string(),
            stats.wins.to_string(),
            format_rate(stats.win_rate()),
            format!("{:.2}", stats.average_level()),
        ]);
    }
    println!("{table}");
    println!();

    println!("  {}", "Encounters".bold().underline());
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Encounter", "Appearances", "Won", "Win Rate"]);
    for stats in &report.encounters {
        table.add_row(vec![
            stats.encounter.clone(),
            stats.appearances.to_string(),
            stats.wins.to_string(),
            format_rate(stats.win_rate()),
        ]);
    }
    println!("{table}");
    println!();

    println!("  {}", "Threat Levels".bold().underline());
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Threat", "Appearances", "Won", "Win Rate", "Average Party Level"]);
    for (threat, bucket) in &report.threat_buckets {
        table.add_row(vec![
            threat.to_string(),
            bucket.appearances.to_string(),
            bucket.wins.to_string(),
            format_rate(bucket.win_rate()),
            format!("{:.2}", report.average_party_level(bucket)),
        ]);
    }
    println!("{table}");
    println!();

    if report.defeats.is_empty() {
        println!("  {}", "(no defeats)".dimmed());
    } else {
        println!("  {}", "Defeated By".bold().underline());
        for (encounter, count) in &report.defeats {
            println!("  {count:>5}  {encounter}");
        }
    }
}
