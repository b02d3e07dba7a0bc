//! Room classification: maps raw Swedish room labels to canonical
//! categories via an ordered keyword taxonomy, and defines the
//! per-category plausible floor-area bands used by the matcher.

use crate::model::RoomCategory;

/// How a keyword is matched against the uppercased room name.
enum Match {
    /// Keyword appears anywhere in the name.
    Contains(&'static str),
    /// Name starts with the keyword (for short generic words like "RUM"
    /// that would otherwise match inside SOVRUM/PANNRUM).
    Prefix(&'static str),
}

/// Ordered taxonomy: first matching category wins. Keywords include
/// common OCR-variant spellings (missing diacritics, O/0 confusion).
const TAXONOMY: &[(RoomCategory, &[Match])] = &[
    (
        RoomCategory::Bedroom,
        &[
            Match::Contains("SOVRUM"),
            Match::Contains("SOVRUN"),
            Match::Contains("S0VRUM"),
            Match::Contains("MASTER"),
            Match::Contains("SOV"),
        ],
    ),
    (
        RoomCategory::Living,
        &[
            Match::Contains("VARDAGSRUM"),
            Match::Contains("ALLRUM"),
            Match::Contains("MATPLATS"),
            Match::Prefix("RUM"),
        ],
    ),
    (
        RoomCategory::Kitchen,
        &[
            Match::Contains("KÖK"),
            Match::Contains("KOK"),
            Match::Contains("PENTRY"),
        ],
    ),
    (
        RoomCategory::Bathroom,
        &[
            Match::Contains("WC"),
            Match::Contains("BAD"),
            Match::Contains("DUSCH"),
            Match::Contains("TOALETT"),
        ],
    ),
    (
        RoomCategory::Laundry,
        &[Match::Contains("TVÄTT"), Match::Contains("TVATT")],
    ),
    (
        RoomCategory::Entry,
        &[
            Match::Contains("ENTRÉ"),
            Match::Contains("ENTRE"),
            Match::Contains("HALL"),
            Match::Contains("FARSTU"),
        ],
    ),
    (
        RoomCategory::Closet,
        &[
            Match::Contains("KLK"),
            Match::Contains("KLÄDKAMMARE"),
            Match::Contains("GARDEROB"),
            Match::Contains("WALK-IN"),
        ],
    ),
    (
        RoomCategory::Storage,
        &[
            Match::Contains("FÖRRÅD"),
            Match::Contains("FORRAD"),
            Match::Contains("FRD"),
        ],
    ),
    (
        RoomCategory::Garage,
        &[Match::Contains("GARAGE"), Match::Contains("CARPORT")],
    ),
    (
        RoomCategory::Utility,
        &[
            Match::Contains("TEKNIK"),
            Match::Contains("PANNRUM"),
            Match::Contains("APPARATRUM"),
        ],
    ),
    (
        RoomCategory::Terrace,
        &[
            Match::Contains("UTEPLATS"),
            Match::Contains("ALTAN"),
            Match::Contains("TERRASS"),
            Match::Contains("BALKONG"),
        ],
    ),
];

/// Classify a raw room label into a canonical category.
///
/// Uppercase-normalizes, then walks the taxonomy in order; first match
/// wins. Unrecognized labels default to storage (the cheapest finish
/// level), never to an error: plans carry many non-room labels.
pub fn classify_room(name: &str) -> RoomCategory {
    let upper = name.trim().to_uppercase();
    for (category, keywords) in TAXONOMY {
        for keyword in *keywords {
            let hit = match keyword {
                Match::Contains(k) => upper.contains(k),
                Match::Prefix(k) => upper.starts_with(k),
            };
            if hit {
                return *category;
            }
        }
    }
    RoomCategory::Storage
}

/// Secondary (biarea) categories under the Swedish area-measurement
/// convention: unheated spaces. Walk-in closets count as living area.
pub fn is_biarea(category: RoomCategory) -> bool {
    matches!(
        category,
        RoomCategory::Garage | RoomCategory::Storage | RoomCategory::Utility
    )
}

/// Plausible floor-area band [min, max] in m² for a category.
///
/// Used to reject spatially-near but physically absurd room/area
/// pairings (a 45 m² value next to a WC label is an OCR artifact).
pub fn area_band(category: RoomCategory) -> (f64, f64) {
    match category {
        RoomCategory::Bedroom => (5.0, 35.0),
        RoomCategory::Living => (8.0, 60.0),
        RoomCategory::Kitchen => (4.0, 40.0),
        RoomCategory::Bathroom => (2.0, 15.0),
        RoomCategory::Laundry => (2.0, 15.0),
        RoomCategory::Entry => (1.5, 20.0),
        RoomCategory::Closet => (1.0, 10.0),
        RoomCategory::Storage => (1.0, 30.0),
        RoomCategory::Garage => (10.0, 60.0),
        RoomCategory::Utility => (2.0, 20.0),
        RoomCategory::Terrace => (3.0, 60.0),
    }
}

/// True if the area value falls inside the category's plausible band.
pub fn area_plausible(category: RoomCategory, area: f64) -> bool {
    let (min, max) = area_band(category);
    area >= min && area <= max
}

/// Wet rooms require waterproofing-compliant wall and floor treatment.
pub fn is_wet_room(category: RoomCategory) -> bool {
    matches!(category, RoomCategory::Bathroom | RoomCategory::Laundry)
}
