use kalkyl_core::error::KalkylError;
use kalkyl_core::model::FloorPlanInput;
use kalkyl_core::pricing::PricingConfig;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), KalkylError> {
    let payload = std::fs::read_to_string(&input_file)?;
    let input: FloorPlanInput = serde_json::from_str(&payload)?;

    let cfg = PricingConfig::default();
    let analysis = kalkyl_core::analyze(&input, &cfg);

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&analysis)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Analyzed {} room(s), {} cost item(s), written to {}",
                analysis.rooms.len(),
                analysis.items.len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&analysis)?,
            _ => output::table::print_analysis(&analysis),
        },
    }

    Ok(())
}
