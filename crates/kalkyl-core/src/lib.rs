pub mod area;
pub mod classify;
pub mod error;
pub mod matching;
pub mod model;
pub mod pricing;
pub mod summary;

use model::{FloorPlanAnalysis, FloorPlanInput, RoomCategory, RoomCounts};
use pricing::PricingConfig;
use tracing::{info, warn};

/// Length of the OCR text excerpt kept on the result for debugging.
const EXCERPT_CHARS: usize = 500;

/// Main API entry point: analyze one floor plan payload into rooms,
/// area figures and an itemized cost estimate.
///
/// The pipeline is a pure single-pass transformation. Empty OCR input
/// yields an all-zero result, never an error.
pub fn analyze(input: &FloorPlanInput, cfg: &PricingConfig) -> FloorPlanAnalysis {
    if input.text.trim().is_empty() && input.blocks.is_empty() {
        warn!("empty OCR payload, returning empty analysis");
        return FloorPlanAnalysis::empty();
    }

    let equipment = summary::detect_equipment(&input.text);
    let summary_areas = summary::parse_summary_areas(&input.text);

    let rooms = matching::match_rooms(input);
    let breakdown = area::aggregate(&rooms);

    let items = pricing::estimate(cfg, &rooms, &breakdown, &summary_areas, equipment);

    let counts = RoomCounts {
        rooms: rooms.iter().filter(|r| r.is_indoor()).count(),
        bedrooms: count_of(&rooms, RoomCategory::Bedroom),
        bathrooms: count_of(&rooms, RoomCategory::Bathroom),
    };

    // Explicit summary figures printed on the plan override the computed
    // gross figures for reporting; the room-level derivations keep the
    // computed values.
    let boa = summary_areas.boa.unwrap_or(breakdown.boa_gross);
    let biarea = summary_areas.biarea.unwrap_or(breakdown.biarea_gross);
    let total_area = summary_areas.total.unwrap_or(breakdown.total_gross);

    info!(
        rooms = rooms.len(),
        items = items.len(),
        boa,
        total_area,
        "floor plan analyzed"
    );

    FloorPlanAnalysis {
        items,
        total_area,
        boa,
        biarea,
        rooms,
        equipment,
        area_breakdown: breakdown,
        summary: counts,
        extracted_text_excerpt: input.text.chars().take(EXCERPT_CHARS).collect(),
    }
}

fn count_of(rooms: &[model::Room], category: RoomCategory) -> usize {
    rooms.iter().filter(|r| r.category == category).count()
}
