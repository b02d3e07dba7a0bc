use kalkyl_core::error::KalkylError;
use kalkyl_core::model::FloorPlanInput;
use kalkyl_core::{area, matching, summary};
use std::path::PathBuf;

use crate::output;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), KalkylError> {
    let payload = std::fs::read_to_string(&input_file)?;
    let input: FloorPlanInput = serde_json::from_str(&payload)?;

    let rooms = matching::match_rooms(&input);
    let breakdown = area::aggregate(&rooms);
    let equipment = summary::detect_equipment(&input.text);

    match output_format {
        "json" => {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "rooms": rooms,
                "areaBreakdown": breakdown,
                "equipment": equipment,
            }))?;
            println!("{json}");
        }
        _ => output::table::print_rooms(&rooms, &breakdown, equipment),
    }

    Ok(())
}
