pub mod generate;
pub mod party;
pub mod run;
pub mod sweep;

use std::path::Path;

use colored::Colorize;
use dc_core::World;

/// Load a world file, or the standard world when none is given.
fn load_world(path: Option<&Path>) -> Result<World, String> {
    match path {
        Some(path) => World::load(path).map_err(|e| e.to_string()),
        None => World::standard().map_err(|e| e.to_string()),
    }
}

/// Format a rate in [0, 1] as a percentage, colored by how balanced it is.
fn format_rate(rate: f64) -> String {
    let text = format!("{:.2}%", rate * 100.0);
    if rate >= 0.75 {
        text.green().to_string()
    } else if rate >= 0.25 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}
