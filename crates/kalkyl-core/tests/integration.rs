//! Integration tests for analyze() end-to-end pipeline.
//!
//! Exercises the full chain: OCR payload → matching → classification →
//! area aggregation → cost estimate, against both spatial block input
//! and flattened-text fallback input.

use kalkyl_core::analyze;
use kalkyl_core::model::{
    Equipment, FloorPlanInput, Granularity, RoomCategory, TextBlock,
};
use kalkyl_core::pricing::PricingConfig;

fn line(text: &str, x: f64, y: f64) -> TextBlock {
    TextBlock {
        text: text.to_string(),
        x,
        y,
        width: 0.05,
        height: 0.01,
        granularity: Granularity::Line,
    }
}

fn villa_input() -> FloorPlanInput {
    FloorPlanInput {
        text: "BYA: 100.0 m²\nKÖK 18.1 m²\nSOVRUM 1 11.9 m²\nWC 4.0 m²".to_string(),
        blocks: vec![
            line("KÖK", 0.30, 0.20),
            line("18.1 m²", 0.33, 0.21),
            line("SOVRUM 1", 0.60, 0.20),
            line("11.9 m²", 0.63, 0.21),
            line("WC", 0.30, 0.60),
            line("4.0 m²", 0.33, 0.61),
        ],
    }
}

// ---------------------------------------------------------------------------
// Test 1: end-to-end villa scenario
// ---------------------------------------------------------------------------
#[test]
fn villa_scenario_rooms_areas_and_items() {
    let cfg = PricingConfig::default();
    let analysis = analyze(&villa_input(), &cfg);

    assert_eq!(analysis.rooms.len(), 3);
    let kok = analysis.rooms.iter().find(|r| r.name == "KÖK").unwrap();
    assert_eq!(kok.category, RoomCategory::Kitchen);
    assert_eq!(kok.area, 18.1);
    let sov = analysis.rooms.iter().find(|r| r.name == "SOVRUM 1").unwrap();
    assert_eq!(sov.category, RoomCategory::Bedroom);
    assert_eq!(sov.area, 11.9);
    let wc = analysis.rooms.iter().find(|r| r.name == "WC").unwrap();
    assert_eq!(wc.category, RoomCategory::Bathroom);
    assert_eq!(wc.area, 4.0);

    // Bathrooms are living area under the Swedish convention.
    assert_eq!(analysis.area_breakdown.boa_net, 34.0);
    assert_eq!(analysis.area_breakdown.biarea_net, 0.0);

    let wc_items: Vec<_> = analysis
        .items
        .iter()
        .filter(|i| i.id == "plumbing-wc")
        .collect();
    assert_eq!(wc_items.len(), 1);
    assert_eq!(wc_items[0].quantity, 1.0);

    let kitchen_items: Vec<_> = analysis
        .items
        .iter()
        .filter(|i| i.id == "interior-kitchen")
        .collect();
    assert_eq!(kitchen_items.len(), 1);
    assert_eq!(kitchen_items[0].quantity, 1.0);

    assert_eq!(analysis.summary.rooms, 3);
    assert_eq!(analysis.summary.bedrooms, 1);
    assert_eq!(analysis.summary.bathrooms, 1);
}

// ---------------------------------------------------------------------------
// Test 2: determinism — identical input, byte-identical output
// ---------------------------------------------------------------------------
#[test]
fn determinism_byte_identical_output() {
    let cfg = PricingConfig::default();
    let input = villa_input();
    let a = serde_json::to_string(&analyze(&input, &cfg)).unwrap();
    let b = serde_json::to_string(&analyze(&input, &cfg)).unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Test 3: area and cost invariants across the whole result
// ---------------------------------------------------------------------------
#[test]
fn area_and_cost_invariants() {
    let cfg = PricingConfig::default();
    let analysis = analyze(&villa_input(), &cfg);

    let bd = &analysis.area_breakdown;
    assert_eq!(bd.total_net, round1(bd.boa_net + bd.biarea_net));
    assert_eq!(bd.boa_gross, round1(bd.boa_net * 1.035));
    assert_eq!(bd.biarea_gross, round1(bd.biarea_net * 1.035));
    assert_eq!(bd.total_gross, round1(bd.total_net * 1.035));

    for item in &analysis.items {
        assert_eq!(
            item.total_cost,
            (item.quantity * item.effective_unit_price()).round(),
            "item {}",
            item.id
        );
    }
}

// ---------------------------------------------------------------------------
// Test 4: overhead and contingency computed from prior subtotal only
// ---------------------------------------------------------------------------
#[test]
fn overhead_and_contingency_ordering() {
    let cfg = PricingConfig::default();
    let analysis = analyze(&villa_input(), &cfg);
    let items = &analysis.items;
    let n = items.len();
    assert!(n > 2);

    assert_eq!(items[n - 2].id, "admin-site-overhead");
    assert_eq!(items[n - 1].id, "admin-contingency");

    let subtotal: f64 = items[..n - 2].iter().map(|i| i.total_cost).sum();
    for rate_item in &items[n - 2..] {
        assert_eq!(rate_item.quantity, subtotal);
        assert_eq!(
            rate_item.total_cost,
            (subtotal * rate_item.effective_unit_price()).round()
        );
    }
}

// ---------------------------------------------------------------------------
// Test 5: spatial correctness — nearest pair wins over document order
// ---------------------------------------------------------------------------
#[test]
fn spatial_matching_nearest_pair_not_document_order() {
    let cfg = PricingConfig::default();
    let input = FloorPlanInput {
        text: String::new(),
        blocks: vec![
            // document order deliberately interleaved
            line("SOV 2", 0.20, 0.30),
            line("SOV 3", 0.20, 0.50),
            line("9.0 m²", 0.22, 0.51),
            line("11.0 m²", 0.22, 0.31),
            line("KÖK", 0.60, 0.20),
            line("18.1 m²", 0.63, 0.21),
        ],
    };
    let analysis = analyze(&input, &cfg);
    let sov2 = analysis.rooms.iter().find(|r| r.name == "SOV 2").unwrap();
    let sov3 = analysis.rooms.iter().find(|r| r.name == "SOV 3").unwrap();
    assert_eq!(sov2.area, 11.0);
    assert_eq!(sov3.area, 9.0);
}

// ---------------------------------------------------------------------------
// Test 6: plausibility filter — 45 m² never attaches to a bathroom
// ---------------------------------------------------------------------------
#[test]
fn implausible_area_never_attaches_to_bathroom() {
    let cfg = PricingConfig::default();
    let input = FloorPlanInput {
        text: String::new(),
        blocks: vec![
            line("WC", 0.30, 0.30),
            line("45.0 m²", 0.32, 0.31),
            line("VARDAGSRUM", 0.60, 0.60),
            line("4.9 m²", 0.62, 0.61),
        ],
    };
    let analysis = analyze(&input, &cfg);
    for room in &analysis.rooms {
        if room.category == RoomCategory::Bathroom {
            assert_ne!(room.area, 45.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Test 7: terrace toggling changes decking items but not living area
// ---------------------------------------------------------------------------
#[test]
fn terrace_adds_decking_without_touching_living_area() {
    let cfg = PricingConfig::default();
    let without = analyze(&villa_input(), &cfg);

    let mut input = villa_input();
    input.blocks.push(line("ALTAN", 0.80, 0.80));
    input.blocks.push(line("15.0 m²", 0.82, 0.81));
    input.text.push_str("\nALTAN 15.0 m²");
    let with = analyze(&input, &cfg);

    assert_eq!(with.area_breakdown, without.area_breakdown);
    assert_eq!(with.summary.rooms, without.summary.rooms);
    assert!(without.items.iter().all(|i| i.id != "completion-terrace"));
    let terrace = with
        .items
        .iter()
        .find(|i| i.id == "completion-terrace")
        .unwrap();
    assert_eq!(terrace.quantity, 15.0);
    assert!(with.items.iter().any(|i| i.id == "completion-patio-door"));
}

// ---------------------------------------------------------------------------
// Test 8: equipment detection feeds the estimate
// ---------------------------------------------------------------------------
#[test]
fn equipment_annotations_gate_items() {
    let cfg = PricingConfig::default();
    let mut input = villa_input();
    input
        .text
        .push_str("\nBERGVÄRME\nTVÄTTMASKIN\nBRASKAMIN");
    let analysis = analyze(&input, &cfg);

    assert_eq!(
        analysis.equipment,
        Equipment {
            has_heat_pump: true,
            has_laundry: true,
            has_fireplace: true,
        }
    );
    assert!(analysis.items.iter().any(|i| i.id == "plumbing-heat-pump"));
    assert!(analysis.items.iter().any(|i| i.id == "plumbing-laundry"));
    assert!(analysis
        .items
        .iter()
        .any(|i| i.id == "completion-fireplace"));
}

// ---------------------------------------------------------------------------
// Test 9: fallback path — text only, no blocks
// ---------------------------------------------------------------------------
#[test]
fn text_only_payload_uses_offset_fallback() {
    let cfg = PricingConfig::default();
    let input = FloorPlanInput {
        text: "BOYTA: 87.3 m²\nKÖK 18.1 m²\nSOVRUM 1 11.9 m²\nWC 4.0 m²".to_string(),
        blocks: vec![],
    };
    let analysis = analyze(&input, &cfg);
    assert_eq!(analysis.rooms.len(), 3);
    // the figure after BOYTA is a summary value, not a room area
    assert!(analysis.rooms.iter().all(|r| r.area != 87.3));
    assert_eq!(analysis.boa, 87.3);
}

// ---------------------------------------------------------------------------
// Test 10: garage drives biarea, not living area
// ---------------------------------------------------------------------------
#[test]
fn garage_counts_as_biarea() {
    let cfg = PricingConfig::default();
    let input = FloorPlanInput {
        text: "KÖK 18.1 m² SOVRUM 1 11.9 m² WC 4.0 m² GARAGE 22.5 m²".to_string(),
        blocks: vec![],
    };
    let analysis = analyze(&input, &cfg);
    let garage = analysis.rooms.iter().find(|r| r.name == "GARAGE").unwrap();
    assert!(garage.is_biarea);
    assert_eq!(analysis.area_breakdown.biarea_net, 22.5);
    assert_eq!(analysis.area_breakdown.boa_net, 34.0);
}

// ---------------------------------------------------------------------------
// Test 11: empty payload degrades to empty result, not an error
// ---------------------------------------------------------------------------
#[test]
fn empty_payload_yields_empty_analysis() {
    let cfg = PricingConfig::default();
    let input = FloorPlanInput {
        text: String::new(),
        blocks: vec![],
    };
    let analysis = analyze(&input, &cfg);
    assert!(analysis.rooms.is_empty());
    assert!(analysis.items.is_empty());
    assert_eq!(analysis.boa, 0.0);
    assert_eq!(analysis.total_cost(), 0.0);
}

// ---------------------------------------------------------------------------
// Test 12: every priced item is auditable
// ---------------------------------------------------------------------------
#[test]
fn items_carry_provenance_and_confidence() {
    let cfg = PricingConfig::default();
    let analysis = analyze(&villa_input(), &cfg);
    for item in &analysis.items {
        assert!(item.price_source.is_some(), "item {}", item.id);
        assert!(
            item.confidence_score > 0.0 && item.confidence_score <= 1.0,
            "item {}",
            item.id
        );
        if let Some(bd) = &item.quantity_breakdown {
            assert_eq!(bd.total, item.quantity);
            assert!(!bd.formula.is_empty());
        }
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
