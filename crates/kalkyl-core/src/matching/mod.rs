//! Room–area matching: spatial primary path with a character-offset
//! fallback.

pub mod candidates;
pub mod fallback;
pub mod spatial;

use crate::classify::is_biarea;
use crate::model::{FloorPlanInput, Room};
use std::collections::HashSet;
use tracing::debug;

/// The spatial path must produce at least this many rooms to be trusted;
/// below it the character-offset fallback usually knows better.
const MIN_SPATIAL_ROOMS: usize = 3;

/// Resolve rooms and their areas from the OCR payload.
///
/// Primary path: candidate extraction from positioned blocks plus greedy
/// spatial assignment. Fallback: character-offset matching on the
/// flattened text, used when no blocks were supplied or the spatial path
/// under-produces.
pub fn match_rooms(input: &FloorPlanInput) -> Vec<Room> {
    let spatial_rooms = if input.blocks.is_empty() {
        Vec::new()
    } else {
        match_spatial(input)
    };

    if spatial_rooms.len() >= MIN_SPATIAL_ROOMS {
        return spatial_rooms;
    }

    let fallback_rooms = fallback::match_by_offset(&input.text);
    debug!(
        spatial = spatial_rooms.len(),
        fallback = fallback_rooms.len(),
        "spatial match under-produced, comparing with offset fallback"
    );

    if fallback_rooms.len() > spatial_rooms.len() {
        fallback_rooms
    } else {
        spatial_rooms
    }
}

fn match_spatial(input: &FloorPlanInput) -> Vec<Room> {
    let set = candidates::extract_candidates(&input.blocks);

    let mut rooms: Vec<Room> = set
        .pairs
        .iter()
        .map(|p| Room {
            name: p.room.name.clone(),
            category: p.room.category,
            area: p.area,
            is_biarea: is_biarea(p.room.category),
        })
        .collect();

    for (ri, ai) in spatial::assign_areas(&set.rooms, &set.areas) {
        let room = &set.rooms[ri];
        rooms.push(Room {
            name: room.name.clone(),
            category: room.category,
            area: set.areas[ai].value,
            is_biarea: is_biarea(room.category),
        });
    }

    // A room read both as a combined block and as a matched pair keeps
    // its first occurrence.
    let mut seen = HashSet::new();
    rooms.retain(|r| seen.insert((r.name.clone(), (r.area * 10.0).round() as i64)));
    rooms
}
