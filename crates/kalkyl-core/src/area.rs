//! Area aggregation: living (BOA) vs. secondary (biarea) partition and
//! the wall-thickness correction.

use crate::model::{AreaBreakdown, Room};
use tracing::warn;

/// Net label areas are measured inside room walls; the gross figures
/// builders quote include the wall thickness. 3.5% approximates a
/// standard villa wall share.
pub const WALL_CORRECTION: f64 = 1.035;

/// A single room above this suggests a decimal-parse OCR defect.
const ROOM_SANITY_M2: f64 = 50.0;
/// Living area above this is outside villa territory altogether.
const BOA_SANITY_M2: f64 = 400.0;

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Partition room areas into living and secondary totals and derive the
/// gross figures.
///
/// Terraces are outdoor surfaces and contribute to neither sum. Sanity
/// anomalies are logged, never corrected: the figures must stay
/// auditable against the plan.
pub fn aggregate(rooms: &[Room]) -> AreaBreakdown {
    let mut boa_net = 0.0;
    let mut biarea_net = 0.0;

    for room in rooms.iter().filter(|r| r.is_indoor()) {
        if room.area > ROOM_SANITY_M2 {
            warn!(
                room = %room.name,
                area = room.area,
                "room area exceeds {ROOM_SANITY_M2} m², possible OCR decimal defect; keeping value"
            );
        }
        if room.is_biarea {
            biarea_net += room.area;
        } else {
            boa_net += room.area;
        }
    }

    let boa_net = round1(boa_net);
    let biarea_net = round1(biarea_net);
    let total_net = round1(boa_net + biarea_net);

    if boa_net > BOA_SANITY_M2 {
        warn!(
            boa_net,
            "living area exceeds {BOA_SANITY_M2} m², possible OCR decimal defect; keeping value"
        );
    }

    AreaBreakdown {
        boa_net,
        biarea_net,
        total_net,
        boa_gross: round1(boa_net * WALL_CORRECTION),
        biarea_gross: round1(biarea_net * WALL_CORRECTION),
        total_gross: round1(total_net * WALL_CORRECTION),
    }
}
