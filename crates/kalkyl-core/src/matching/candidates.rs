//! Candidate extraction from positioned OCR blocks: combined name+area
//! detection, room-name and area-value recognition, and line/token
//! deduplication.

use crate::classify::classify_room;
use crate::model::{AreaCandidate, Granularity, RoomCandidate, TextBlock};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Canonical room labels, including OCR-variant spellings. Longer
/// alternatives come first so the regex engine prefers them.
pub(crate) const ROOM_WORDS: &str = "SOVRUM|SOVRUN|S0VRUM|MASTER(?:\\s+BEDROOM)?|SOV|\
VARDAGSRUM|ALLRUM|MATPLATS|RUM|KÖK|KOK|PENTRY|WC/D|WC|BADRUM|BAD|DUSCH|TOALETT|\
TVÄTTSTUGA|TVÄTT|TVATT|ENTRÉ|ENTRE|HALL|FARSTU|KLK|KLÄDKAMMARE|GARDEROB|\
FÖRRÅD|FORRAD|FRD|GARAGE|CARPORT|TEKNIK|PANNRUM|UTEPLATS|ALTAN|TERRASS|BALKONG";

static ROOM_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^(?:{ROOM_WORDS})(?:\s*\d{{1,2}})?$")).unwrap());

/// Room label and area in a single block, e.g. "KÖK 18.1 m²".
static COMBINED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^((?:{ROOM_WORDS})(?:\s*\d{{1,2}})?)\s+(\d{{1,3}})[.,/](\d)\s*(?:M²|M2|KVM)?$"
    ))
    .unwrap()
});

// Area value variants: decimal with dot/comma/slash (an OCR misread of
// the decimal separator), with or without a unit suffix.
static AREA_UNIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3})[.,/](\d)\s*(?:M²|M2|KVM)$").unwrap());
static AREA_BARE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3})[.,/](\d)$").unwrap());
static AREA_INT_UNIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})\s*(?:M²|M2|KVM)$").unwrap());

/// Linear dimension annotations like "11x15" or "3,5 X 4,2" are wall
/// measurements, never floor areas.
static DIMENSION_ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d\s*[X×]\s*\d").unwrap());

/// Areas outside this range are label noise or OCR corruption.
pub const AREA_MIN_M2: f64 = 1.0;
pub const AREA_MAX_M2: f64 = 100.0;

/// A room whose area was read from the same block as its label.
#[derive(Debug, Clone)]
pub struct CombinedPair {
    pub room: RoomCandidate,
    pub area: f64,
}

/// All candidates extracted from the block list.
#[derive(Debug, Default)]
pub struct CandidateSet {
    pub pairs: Vec<CombinedPair>,
    pub rooms: Vec<RoomCandidate>,
    pub areas: Vec<AreaCandidate>,
}

/// Scan blocks for combined pairs, room-name candidates and area-value
/// candidates. Blocks yielding a combined pair are consumed and excluded
/// from independent room/area extraction.
pub fn extract_candidates(blocks: &[TextBlock]) -> CandidateSet {
    let mut set = CandidateSet::default();

    for block in ordered_by_granularity(blocks) {
        let text = block.text.trim().to_uppercase();
        if text.is_empty() {
            continue;
        }

        if let Some(caps) = COMBINED_RE.captures(&text) {
            let name = caps[1].trim().to_string();
            if let Some(area) = decimal_area(&caps[2], &caps[3]) {
                set.pairs.push(CombinedPair {
                    room: RoomCandidate {
                        category: classify_room(&name),
                        name,
                        x: block.x,
                        y: block.y,
                    },
                    area,
                });
                continue;
            }
        }

        // Room labels are only trusted at line granularity; tokens split
        // "SOVRUM 2" into fragments that misclassify.
        if block.granularity == Granularity::Line && ROOM_NAME_RE.is_match(&text) {
            set.rooms.push(RoomCandidate {
                category: classify_room(&text),
                name: text,
                x: block.x,
                y: block.y,
            });
            continue;
        }

        if let Some(value) = parse_area_text(&text) {
            set.areas.push(AreaCandidate {
                value,
                x: block.x,
                y: block.y,
            });
        }
    }

    dedup_rooms(&mut set.rooms);
    dedup_areas(&mut set.areas);
    set
}

/// Parse a block as a standalone area value, or None.
///
/// Rejects dimension annotations and values outside [1,100] m².
pub fn parse_area_text(text: &str) -> Option<f64> {
    if DIMENSION_ANNOTATION_RE.is_match(text) {
        return None;
    }

    let value = if let Some(c) = AREA_UNIT_RE.captures(text) {
        decimal_area(&c[1], &c[2])?
    } else if let Some(c) = AREA_BARE_RE.captures(text) {
        decimal_area(&c[1], &c[2])?
    } else if let Some(c) = AREA_INT_UNIT_RE.captures(text) {
        c[1].parse::<f64>().ok()?
    } else {
        return None;
    };

    if (AREA_MIN_M2..=AREA_MAX_M2).contains(&value) {
        Some(value)
    } else {
        None
    }
}

fn decimal_area(whole: &str, frac: &str) -> Option<f64> {
    let whole: f64 = whole.parse().ok()?;
    let frac: f64 = frac.parse().ok()?;
    Some(whole + frac / 10.0)
}

/// Line-level blocks first, preserving input order within each
/// granularity, so dedup keeps the line-level reading.
fn ordered_by_granularity(blocks: &[TextBlock]) -> impl Iterator<Item = &TextBlock> {
    let lines = blocks
        .iter()
        .filter(|b| b.granularity == Granularity::Line);
    let tokens = blocks
        .iter()
        .filter(|b| b.granularity == Granularity::Token);
    lines.chain(tokens)
}

fn coord_key(x: f64, y: f64) -> (i64, i64) {
    // 0.02-wide buckets: OCR jitter for the same glyphs stays inside one
    ((x * 50.0).round() as i64, (y * 50.0).round() as i64)
}

fn dedup_rooms(rooms: &mut Vec<RoomCandidate>) {
    let mut seen = HashSet::new();
    rooms.retain(|r| seen.insert((r.category, coord_key(r.x, r.y))));
}

fn dedup_areas(areas: &mut Vec<AreaCandidate>) {
    let mut seen = HashSet::new();
    areas.retain(|a| seen.insert(((a.value * 10.0).round() as i64, coord_key(a.x, a.y))));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoomCategory;

    fn line(text: &str, x: f64, y: f64) -> TextBlock {
        TextBlock {
            text: text.into(),
            x,
            y,
            width: 0.05,
            height: 0.01,
            granularity: Granularity::Line,
        }
    }

    fn token(text: &str, x: f64, y: f64) -> TextBlock {
        TextBlock {
            granularity: Granularity::Token,
            ..line(text, x, y)
        }
    }

    #[test]
    fn test_combined_pair_detected() {
        let set = extract_candidates(&[line("KÖK 18.1 m²", 0.4, 0.2)]);
        assert_eq!(set.pairs.len(), 1);
        assert_eq!(set.pairs[0].room.category, RoomCategory::Kitchen);
        assert_eq!(set.pairs[0].area, 18.1);
        assert!(set.rooms.is_empty());
        assert!(set.areas.is_empty());
    }

    #[test]
    fn test_room_and_area_extracted_separately() {
        let set = extract_candidates(&[
            line("SOVRUM 2", 0.2, 0.3),
            line("11,9 m²", 0.22, 0.31),
        ]);
        assert_eq!(set.rooms.len(), 1);
        assert_eq!(set.rooms[0].category, RoomCategory::Bedroom);
        assert_eq!(set.areas.len(), 1);
        assert_eq!(set.areas[0].value, 11.9);
    }

    #[test]
    fn test_slash_decimal_variant() {
        assert_eq!(parse_area_text("12/5 M²"), Some(12.5));
    }

    #[test]
    fn test_bare_decimal_variant() {
        assert_eq!(parse_area_text("9.0"), Some(9.0));
    }

    #[test]
    fn test_integer_with_unit() {
        assert_eq!(parse_area_text("14 M2"), Some(14.0));
    }

    #[test]
    fn test_dimension_annotation_rejected() {
        assert_eq!(parse_area_text("11X15"), None);
        let set = extract_candidates(&[line("3,5 x 4,2", 0.5, 0.5)]);
        assert!(set.areas.is_empty());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(parse_area_text("0.5"), None);
        assert_eq!(parse_area_text("250.0"), None);
    }

    #[test]
    fn test_line_token_dedup_prefers_line() {
        let set = extract_candidates(&[
            token("11.9", 0.221, 0.312),
            line("SOVRUM 2", 0.2, 0.3),
            line("11.9 m²", 0.22, 0.31),
        ]);
        // token duplicate of the same value at the same centroid collapses
        assert_eq!(set.areas.len(), 1);
        assert_eq!(set.rooms.len(), 1);
    }

    #[test]
    fn test_unrelated_label_ignored() {
        let set = extract_candidates(&[line("SKALA 1:100", 0.9, 0.95)]);
        assert!(set.pairs.is_empty() && set.rooms.is_empty() && set.areas.is_empty());
    }
}
