//! Character-offset fallback matcher, used when spatial data is missing
//! or the spatial pass under-produces.
//!
//! Locates room keywords and area values by byte offset in the flattened
//! OCR text and pairs them in three passes of decreasing strictness.

use crate::classify::{area_plausible, classify_room, is_biarea};
use crate::matching::candidates::{AREA_MAX_M2, AREA_MIN_M2, ROOM_WORDS};
use crate::model::{Room, RoomCategory};
use crate::summary::SUMMARY_LABEL_RE;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Area immediately after the room name, pass (a).
const STRICT_WINDOW: usize = 40;
/// Nearest-area search radius, pass (b).
const PROXIMITY_WINDOW: usize = 200;
/// Area values this close after a summary label belong to the summary
/// line, not a room.
const SUMMARY_EXCLUSION_WINDOW: usize = 30;

static ROOM_OCCURRENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b(?:{ROOM_WORDS})(?:\s*\d{{1,2}})?\b")).unwrap());

static AREA_OCCURRENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,3})[.,/](\d)(?:\s*(?:M²|M2|KVM))?").unwrap());

struct RoomHit {
    name: String,
    category: RoomCategory,
    end: usize,
    area: Option<f64>,
}

struct AreaHit {
    value: f64,
    start: usize,
    used: bool,
}

/// Match rooms to areas by character offset in the flattened text.
pub fn match_by_offset(text: &str) -> Vec<Room> {
    let upper = text.to_uppercase();

    let mut areas: Vec<AreaHit> = AREA_OCCURRENCE_RE
        .captures_iter(&upper)
        .filter_map(|c| {
            let m = c.get(0)?;
            let whole: f64 = c[1].parse().ok()?;
            let value = whole + c[2].parse::<f64>().ok()? / 10.0;
            if !(AREA_MIN_M2..=AREA_MAX_M2).contains(&value) {
                return None;
            }
            Some(AreaHit {
                value,
                start: m.start(),
                used: false,
            })
        })
        .collect();

    // The number directly after a summary label (BOYTA: 87.3) is a
    // summary figure, not a room area: consume the first area hit in a
    // short window after each label.
    for label in SUMMARY_LABEL_RE.find_iter(&upper) {
        if let Some(area) = areas.iter_mut().find(|a| {
            !a.used && a.start >= label.end() && a.start - label.end() <= SUMMARY_EXCLUSION_WINDOW
        }) {
            area.used = true;
        }
    }

    let mut rooms: Vec<RoomHit> = ROOM_OCCURRENCE_RE
        .find_iter(&upper)
        .map(|m| {
            let name = m.as_str().trim().to_string();
            RoomHit {
                category: classify_room(&name),
                name,
                end: m.end(),
                area: None,
            }
        })
        .collect();

    // Pass (a): strict adjacency — the area directly follows the label.
    for room in rooms.iter_mut() {
        let found = areas.iter_mut().find(|a| {
            !a.used
                && a.start >= room.end
                && a.start - room.end <= STRICT_WINDOW
                && area_plausible(room.category, a.value)
        });
        if let Some(area) = found {
            area.used = true;
            room.area = Some(area.value);
        }
    }

    // Pass (b): nearest unused plausible area in a wider window,
    // preferring areas after the label.
    for room in rooms.iter_mut().filter(|r| r.area.is_none()) {
        let best = areas
            .iter_mut()
            .filter(|a| {
                !a.used
                    && a.start.abs_diff(room.end) <= PROXIMITY_WINDOW
                    && area_plausible(room.category, a.value)
            })
            .min_by_key(|a| {
                let before = a.start < room.end;
                (before, a.start.abs_diff(room.end))
            });
        if let Some(area) = best {
            area.used = true;
            room.area = Some(area.value);
        }
    }

    // Pass (c): any remaining plausible area, in document order.
    for room in rooms.iter_mut().filter(|r| r.area.is_none()) {
        let found = areas
            .iter_mut()
            .find(|a| !a.used && area_plausible(room.category, a.value));
        if let Some(area) = found {
            area.used = true;
            room.area = Some(area.value);
        }
    }

    // Dedup repeated occurrences of the same label with the same area.
    let mut seen = HashSet::new();
    rooms
        .into_iter()
        .filter_map(|r| {
            let area = r.area?;
            let key = (r.name.clone(), (area * 10.0).round() as i64);
            if !seen.insert(key) {
                return None;
            }
            Some(Room {
                name: r.name,
                category: r.category,
                area,
                is_biarea: is_biarea(r.category),
            })
        })
        .collect()
}
