use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dc_simulation::{SimConfig, generate_dungeons};

pub fn run(world: Option<&Path>, count: u64, seed: u64) -> Result<(), String> {
    let world = super::load_world(world)?;
    let config = SimConfig::default().with_seed(seed);
    let dungeons = generate_dungeons(&world, &config, count).map_err(|e| e.to_string())?;

    for dungeon in &dungeons {
        println!(
            "  {} {}",
            dungeon.name.bold(),
            format!(
                "({}, threat {:.2}, {} encounters)",
                dungeon.archetype,
                dungeon.threat_level(),
                dungeon.len()
            )
            .dimmed()
        );

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["#", "Encounter", "Species", "Threat"]);
        for (i, encounter) in dungeon.encounters().iter().enumerate() {
            let ty = &encounter.encounter_type;
            table.add_row(vec![
                (i + 1).to_string(),
                ty.name.clone(),
                ty.species.to_string(),
                ty.threat.to_string(),
            ]);
        }
        println!("{table}");
        println!();
    }

    println!("  {} dungeons generated (seed={seed})", dungeons.len());
    Ok(())
}
