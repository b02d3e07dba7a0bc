//! Global greedy minimum-distance assignment of area values to room
//! labels in 2D page space.
//!
//! OCR extraction order scrambles adjacent annotations, so pairing by
//! document order swaps areas between neighbouring rooms. Pairing by
//! weighted spatial distance instead resolves each area to the label it
//! actually sits next to on the plan.

use crate::classify::area_plausible;
use crate::model::{AreaCandidate, RoomCandidate};

/// Vertical offset under which a label and a value read as the same
/// visual line.
const SAME_LINE_DY: f64 = 0.02;
/// Horizontal offset beyond which a pairing is suspect.
const FAR_DX: f64 = 0.15;

const SAME_LINE_DISCOUNT: f64 = 0.5;
const RIGHT_OF_LABEL_DISCOUNT: f64 = 0.8;
const FAR_DX_PENALTY: f64 = 1.3;

/// Weighted centroid distance between a room label and an area value.
///
/// Base Euclidean distance, discounted when the pair sits on one visual
/// line, discounted again when the area is to the right of the label
/// (the dominant annotation layout), penalized for large horizontal
/// offsets.
fn weighted_distance(room: &RoomCandidate, area: &AreaCandidate) -> f64 {
    let dx = area.x - room.x;
    let dy = area.y - room.y;
    let mut d = (dx * dx + dy * dy).sqrt();

    if dy.abs() <= SAME_LINE_DY {
        d *= SAME_LINE_DISCOUNT;
    }
    if dx > 0.0 {
        d *= RIGHT_OF_LABEL_DISCOUNT;
    }
    if dx.abs() > FAR_DX {
        d *= FAR_DX_PENALTY;
    }
    d
}

/// Greedily assign areas to rooms by ascending weighted distance.
///
/// Only category-plausible pairs participate. Each accepted pair removes
/// both endpoints; rooms left without an area are dropped by the caller.
/// Returns (room index, area index) pairs.
pub fn assign_areas(rooms: &[RoomCandidate], areas: &[AreaCandidate]) -> Vec<(usize, usize)> {
    let mut scored: Vec<(f64, usize, usize)> = Vec::new();
    for (ri, room) in rooms.iter().enumerate() {
        for (ai, area) in areas.iter().enumerate() {
            if area_plausible(room.category, area.value) {
                scored.push((weighted_distance(room, area), ri, ai));
            }
        }
    }

    // Ties break on (room, area) index for deterministic output.
    scored.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.cmp(&b.1))
            .then(a.2.cmp(&b.2))
    });

    let mut room_taken = vec![false; rooms.len()];
    let mut area_taken = vec![false; areas.len()];
    let mut matches = Vec::new();

    for (_, ri, ai) in scored {
        if room_taken[ri] || area_taken[ai] {
            continue;
        }
        room_taken[ri] = true;
        area_taken[ai] = true;
        matches.push((ri, ai));
    }

    matches.sort();
    matches
}
