use kalkyl_core::error::KalkylError;
use kalkyl_core::model::FloorPlanAnalysis;

pub fn print(analysis: &FloorPlanAnalysis) -> Result<(), KalkylError> {
    let json = serde_json::to_string_pretty(analysis)?;
    println!("{json}");
    Ok(())
}
