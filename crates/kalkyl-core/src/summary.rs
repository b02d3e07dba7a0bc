//! Equipment & summary extractor: regex scan of the flattened OCR text
//! for fixed equipment labels, explicit summary-area figures (BOA/BTA/
//! BIA/BYA) and building dimensions.

use crate::model::{Equipment, SummaryAreas};
use regex::Regex;
use std::sync::LazyLock;

static HEAT_PUMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(VÄRMEPUMP|BERGVÄRME|FRÅNLUFTSVÄRMEPUMP|FRÅNLUFT|FTX)\b").unwrap()
});

static LAUNDRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(TVÄTTMASKIN|TVÄTTPELARE|TORKTUMLARE|TM/TT)\b").unwrap()
});

static FIREPLACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(ELDSTAD|BRASKAMIN|KAMIN|ÖPPEN\s+SPIS|SKORSTEN)\b").unwrap()
});

/// Summary-area labels. Also used by the fallback matcher to exclude
/// area values that belong to a summary line rather than a room.
pub static SUMMARY_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(BOA|BOYTA|BTA|BIA|BIYTA|BIAREA|BYA|BYGGYTA)\b").unwrap());

static BOA_RE: LazyLock<Regex> = LazyLock::new(|| labeled_area_re("BOA|BOYTA"));
static BTA_RE: LazyLock<Regex> = LazyLock::new(|| labeled_area_re("BTA"));
static BIA_RE: LazyLock<Regex> = LazyLock::new(|| labeled_area_re("BIA|BIYTA|BIAREA"));
static BYA_RE: LazyLock<Regex> = LazyLock::new(|| labeled_area_re("BYA|BYGGYTA"));

/// Dimension tokens like "12.4" or "9,65" (building side lengths in m).
static DIMENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}[.,]\d{1,2})\b").unwrap());

fn labeled_area_re(labels: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)\b(?:{labels})\b[:\s]*(\d{{1,3}}(?:[.,]\d{{1,2}})?)\s*m"
    ))
    .unwrap()
}

/// Detect fixed equipment annotations via word-boundary label matching.
pub fn detect_equipment(text: &str) -> Equipment {
    Equipment {
        has_heat_pump: HEAT_PUMP_RE.is_match(text),
        has_laundry: LAUNDRY_RE.is_match(text),
        has_fireplace: FIREPLACE_RE.is_match(text),
    }
}

/// Extract explicit summary figures from the flattened text.
///
/// When no explicit footprint (BYA/BYGGYTA) label exists, infer the
/// footprint from the two largest plausible (3–30 m) dimension tokens.
pub fn parse_summary_areas(text: &str) -> SummaryAreas {
    let mut summary = SummaryAreas {
        boa: capture_area(&BOA_RE, text),
        total: capture_area(&BTA_RE, text),
        biarea: capture_area(&BIA_RE, text),
        footprint: capture_area(&BYA_RE, text),
        footprint_inferred: false,
    };

    if summary.footprint.is_none() {
        if let Some(footprint) = infer_footprint(text) {
            summary.footprint = Some(footprint);
            summary.footprint_inferred = true;
        }
    }

    summary
}

fn capture_area(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| parse_decimal(m.as_str()))
}

fn parse_decimal(s: &str) -> Option<f64> {
    s.replace(',', ".").parse::<f64>().ok()
}

/// Infer the building footprint as the product of the two largest
/// plausible side-length tokens found anywhere in the text.
fn infer_footprint(text: &str) -> Option<f64> {
    let mut dims: Vec<f64> = DIMENSION_RE
        .captures_iter(text)
        .filter_map(|c| parse_decimal(c.get(1)?.as_str()))
        .filter(|&v| (3.0..=30.0).contains(&v))
        .collect();

    if dims.len() < 2 {
        return None;
    }
    dims.sort_by(|a, b| b.partial_cmp(a).unwrap());
    let footprint = dims[0] * dims[1];
    Some((footprint * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_equipment_all_present() {
        let text = "TEKNIK med VÄRMEPUMP, TVÄTTMASKIN och BRASKAMIN i vardagsrum";
        let eq = detect_equipment(text);
        assert!(eq.has_heat_pump);
        assert!(eq.has_laundry);
        assert!(eq.has_fireplace);
    }

    #[test]
    fn test_detect_equipment_word_boundary() {
        // "KAMINEN" should not match the KAMIN label
        let eq = detect_equipment("KAMINEN");
        assert!(!eq.has_fireplace);
    }

    #[test]
    fn test_detect_laundry_plan_abbreviation() {
        // TM/TT is the plan shorthand for tvättmaskin + torktumlare
        assert!(detect_equipment("TM/TT").has_laundry);
        assert!(detect_equipment("TORKTUMLARE").has_laundry);
    }

    #[test]
    fn test_detect_equipment_none() {
        let eq = detect_equipment("SOVRUM 11.9 m² KÖK 18.1 m²");
        assert_eq!(eq, Equipment::default());
    }

    #[test]
    fn test_parse_explicit_summary_labels() {
        let text = "BOYTA: 130.7 m² BTA: 184,9 m² BYGGYTA: 187.3 m²";
        let s = parse_summary_areas(text);
        assert_eq!(s.boa, Some(130.7));
        assert_eq!(s.total, Some(184.9));
        assert_eq!(s.footprint, Some(187.3));
        assert!(!s.footprint_inferred);
    }

    #[test]
    fn test_inferred_footprint_from_dimensions() {
        // No BYA label; 12.4 and 9.6 are the two largest plausible dims
        let text = "FASAD 12.4 m GAVEL 9.6 m SOVRUM 3.2";
        let s = parse_summary_areas(text);
        assert!(s.footprint_inferred);
        assert_eq!(s.footprint, Some(119.0)); // 12.4 × 9.6 = 119.04 → 119.0
    }

    #[test]
    fn test_no_dimensions_no_footprint() {
        let s = parse_summary_areas("SOVRUM KÖK HALL");
        assert_eq!(s.footprint, None);
    }

    #[test]
    fn test_effective_footprint_prefers_explicit() {
        let s = parse_summary_areas("BTA: 150.0 m² BYGGYTA: 120.0 m²");
        assert_eq!(s.effective_footprint(), Some(120.0));
    }
}
