//! Phase section generators. Each section inspects the estimate context,
//! decides its gates, and emits fully-derived cost items: quantity
//! breakdown, price provenance, dual pricing where the factory program
//! applies, and a code reference where compliance is involved.

use super::registry::PriceRef;
use super::EstimateContext;
use crate::model::{
    CostItem, EfficiencyType, Phase, QuantityBreakdown, QuantityEntry, Room, RoomCategory, Unit,
};

// Confidence tiers: quantities read off the plan score higher than
// heuristic derivations.
const CONF_OBSERVED: f64 = 0.9;
const CONF_DERIVED: f64 = 0.7;
const CONF_COUNT: f64 = 0.85;
const CONF_FIXED: f64 = 0.9;
const CONF_RATE: f64 = 0.8;

/// Build a cost item priced from a registry entry. When the entry
/// carries a factory program, the item gets the dual-price discount and
/// its total is computed from the optimized price.
fn item(
    id: &str,
    phase: Phase,
    element_name: &str,
    description: &str,
    quantity: f64,
    price: &PriceRef,
    confidence: f64,
) -> CostItem {
    let discount = price.factory.as_ref().map(|program| {
        let savings = price.value - program.optimized_price;
        crate::model::PrefabDiscount {
            efficiency_type: program.efficiency_type,
            conventional_price: price.value,
            optimized_price: program.optimized_price,
            savings_amount: (quantity * savings).round(),
            savings_percent: (savings / price.value * 1000.0).round() / 10.0,
            rationale: program.rationale.clone(),
        }
    });
    let effective = discount
        .as_ref()
        .map(|d| d.optimized_price)
        .unwrap_or(price.value);

    CostItem {
        id: id.to_string(),
        phase,
        element_name: element_name.to_string(),
        description: description.to_string(),
        quantity,
        unit: price.unit,
        unit_price: price.value,
        total_cost: (quantity * effective).round(),
        confidence_score: confidence,
        quantity_breakdown: None,
        prefab_discount: discount,
        price_source: Some(price.source.clone()),
        guideline_reference: None,
    }
}

fn with_breakdown(mut item: CostItem, entries: Vec<QuantityEntry>, formula: &str) -> CostItem {
    item.quantity_breakdown = Some(QuantityBreakdown {
        entries,
        total: item.quantity,
        unit: item.unit,
        formula: formula.to_string(),
    });
    item
}

fn with_guideline(mut item: CostItem, reference: &str) -> CostItem {
    item.guideline_reference = Some(reference.to_string());
    item
}

fn entry(label: &str, value: f64, unit: Unit) -> QuantityEntry {
    QuantityEntry {
        label: label.to_string(),
        value,
        unit,
        category: None,
    }
}

fn room_entry(room: &Room, value: f64, unit: Unit) -> QuantityEntry {
    QuantityEntry {
        label: room.name.clone(),
        value,
        unit,
        category: Some(room.category),
    }
}

fn room_conf(observed: bool) -> f64 {
    if observed {
        CONF_OBSERVED
    } else {
        CONF_DERIVED
    }
}

/// Estimated wall length of a near-square room.
fn room_wall_area(room: &Room, height: f64) -> f64 {
    4.0 * room.area.sqrt() * height
}

fn id_slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}

pub(crate) fn ground_section(ctx: &EstimateContext<'_>, items: &mut Vec<CostItem>) {
    let Some((footprint, observed)) = ctx.footprint() else {
        return;
    };
    let book = &ctx.cfg.book;
    let conf = room_conf(observed);

    items.push(with_breakdown(
        item(
            "ground-excavation",
            Phase::Ground,
            "Markarbeten",
            "Excavation and site preparation",
            footprint,
            &book.excavation_per_m2,
            conf,
        ),
        vec![entry("building footprint", footprint, Unit::M2)],
        "footprint",
    ));

    items.push(with_guideline(
        with_breakdown(
            item(
                "ground-foundation",
                Phase::Ground,
                "Platta på mark",
                "Insulated concrete slab foundation",
                footprint,
                &book.foundation_per_m2,
                conf,
            ),
            vec![entry("building footprint", footprint, Unit::M2)],
            "footprint",
        ),
        "BBR 6:53 (fuktsäkerhet)",
    ));

    let perimeter = 4.0 * footprint.sqrt();
    items.push(with_breakdown(
        item(
            "ground-drainage",
            Phase::Ground,
            "Dränering",
            "Perimeter drainage",
            round1(perimeter),
            &book.drainage_per_m,
            CONF_DERIVED,
        ),
        vec![entry("perimeter estimate", round1(perimeter), Unit::M)],
        "4 × √footprint",
    ));
}

pub(crate) fn structure_section(ctx: &EstimateContext<'_>, items: &mut Vec<CostItem>) {
    let Some((footprint, _)) = ctx.footprint() else {
        return;
    };
    let book = &ctx.cfg.book;
    let perimeter = 4.0 * footprint.sqrt();
    let eave_perimeter = perimeter * ctx.cfg.eave_factor;

    let wall_area = round1(eave_perimeter * ctx.cfg.wall_height_m);
    items.push(with_breakdown(
        item(
            "structure-ext-walls",
            Phase::Structure,
            "Yttervägg",
            "Exterior walls, insulated timber frame",
            wall_area,
            &book.exterior_wall_per_m2,
            CONF_DERIVED,
        ),
        vec![
            entry("perimeter estimate", round1(perimeter), Unit::M),
            entry("eave/corner allowance", ctx.cfg.eave_factor, Unit::St),
            entry("wall height", ctx.cfg.wall_height_m, Unit::M),
        ],
        "4 × √footprint × 1.2 × wall height",
    ));

    let roof_area = round1(footprint * ctx.cfg.roof_pitch_factor);
    items.push(with_breakdown(
        item(
            "structure-roof",
            Phase::Structure,
            "Tak",
            "Pitched roof with concrete tiles",
            roof_area,
            &book.roof_per_m2,
            CONF_DERIVED,
        ),
        vec![
            entry("building footprint", footprint, Unit::M2),
            entry("22° pitch factor", ctx.cfg.roof_pitch_factor, Unit::St),
        ],
        "footprint × 1.08",
    ));

    let living = ctx.living_area();
    if living > 0.0 {
        let glazing = round1(living * ctx.cfg.glazing_ratio);
        items.push(with_guideline(
            with_breakdown(
                item(
                    "structure-windows",
                    Phase::Structure,
                    "Fönster",
                    "Triple-glazed windows",
                    glazing,
                    &book.window_per_m2,
                    CONF_DERIVED,
                ),
                vec![
                    entry("gross living area", living, Unit::M2),
                    entry("glazing ratio", ctx.cfg.glazing_ratio, Unit::St),
                ],
                "living area × 0.15",
            ),
            "BBR 9 (energihushållning)",
        ));

        items.push(item(
            "structure-ext-door",
            Phase::Structure,
            "Ytterdörr",
            "Insulated entry door",
            1.0,
            &book.exterior_door,
            CONF_FIXED,
        ));
    }

    items.push(with_breakdown(
        item(
            "structure-gutters",
            Phase::Structure,
            "Hängrännor",
            "Gutters and downpipes",
            round1(eave_perimeter),
            &book.gutters_per_m,
            CONF_DERIVED,
        ),
        vec![entry("eave perimeter", round1(eave_perimeter), Unit::M)],
        "4 × √footprint × 1.2",
    ));
}

pub(crate) fn interior_section(ctx: &EstimateContext<'_>, items: &mut Vec<CostItem>) {
    let book = &ctx.cfg.book;

    // Flooring is priced per room so the material follows the room type.
    for room in ctx.indoor_rooms() {
        let price = book.flooring(room.category);
        items.push(with_breakdown(
            item(
                &format!("interior-floor-{}", id_slug(&room.name)),
                Phase::Interior,
                "Golv",
                &format!("Flooring, {}", room.name),
                room.area,
                price,
                CONF_OBSERVED,
            ),
            vec![room_entry(room, room.area, Unit::M2)],
            "room floor area",
        ));
    }

    // Interior walls aggregate into a standard and a wet-room item; the
    // per-room derivation stays visible in the breakdown entries.
    let mut standard_entries = Vec::new();
    let mut wet_entries = Vec::new();
    let mut standard_area = 0.0;
    let mut wet_area = 0.0;
    for room in ctx.indoor_rooms() {
        let area = round1(room_wall_area(room, ctx.cfg.wall_height_m));
        if crate::classify::is_wet_room(room.category) {
            wet_area += area;
            wet_entries.push(room_entry(room, area, Unit::M2));
        } else {
            standard_area += area;
            standard_entries.push(room_entry(room, area, Unit::M2));
        }
    }
    if standard_area > 0.0 {
        items.push(with_breakdown(
            item(
                "interior-walls-standard",
                Phase::Interior,
                "Innervägg",
                "Interior walls, gypsum with paint finish",
                round1(standard_area),
                &book.interior_wall_per_m2,
                CONF_DERIVED,
            ),
            standard_entries,
            "Σ 4 × √(room area) × wall height",
        ));
    }
    if wet_area > 0.0 {
        items.push(with_guideline(
            with_breakdown(
                item(
                    "interior-walls-wet",
                    Phase::Interior,
                    "Våtrumsvägg",
                    "Wet room walls with waterproofing membrane",
                    round1(wet_area),
                    &book.wet_room_wall_per_m2,
                    CONF_DERIVED,
                ),
                wet_entries,
                "Σ 4 × √(room area) × wall height",
            ),
            "Säker Vatten 2021:2",
        ));
    }

    let indoor = ctx.indoor_count();
    if indoor > 0 {
        let doors = (indoor + 2) as f64;
        items.push(with_breakdown(
            item(
                "interior-doors",
                Phase::Interior,
                "Innerdörrar",
                "Interior doors with frames",
                doors,
                &book.interior_door,
                CONF_COUNT,
            ),
            vec![
                entry("indoor rooms", indoor as f64, Unit::St),
                entry("closet/passage allowance", 2.0, Unit::St),
            ],
            "room count + 2",
        ));
    }

    let bedrooms = ctx.count_of(RoomCategory::Bedroom);
    if bedrooms > 0 {
        items.push(with_breakdown(
            item(
                "interior-wardrobes",
                Phase::Interior,
                "Garderober",
                "Fitted wardrobes",
                bedrooms as f64,
                &book.wardrobe_unit,
                CONF_COUNT,
            ),
            vec![entry("bedrooms", bedrooms as f64, Unit::St)],
            "1 per bedroom",
        ));
    }

    if ctx.count_of(RoomCategory::Kitchen) > 0 {
        items.push(item(
            "interior-kitchen",
            Phase::Interior,
            "Kök",
            "Kitchen with countertop, installed",
            1.0,
            &book.kitchen_base,
            CONF_FIXED,
        ));
        items.push(item(
            "interior-appliances",
            Phase::Interior,
            "Vitvaror",
            "Stove, fridge and dishwasher package",
            1.0,
            &book.appliance_package,
            CONF_FIXED,
        ));
    }
}

pub(crate) fn plumbing_section(ctx: &EstimateContext<'_>, items: &mut Vec<CostItem>) {
    let book = &ctx.cfg.book;
    let bathrooms = ctx.count_of(RoomCategory::Bathroom);

    if bathrooms > 0 {
        let qty = bathrooms as f64;
        let breakdown = vec![entry("bathrooms", qty, Unit::St)];
        items.push(with_breakdown(
            item(
                "plumbing-wc",
                Phase::Plumbing,
                "WC-stol",
                "Wall-hung WC with concealed cistern",
                qty,
                &book.wc_unit,
                CONF_COUNT,
            ),
            breakdown.clone(),
            "1 per bathroom",
        ));
        items.push(with_breakdown(
            item(
                "plumbing-basin",
                Phase::Plumbing,
                "Tvättställ",
                "Washbasin with mixer tap",
                qty,
                &book.washbasin_unit,
                CONF_COUNT,
            ),
            breakdown.clone(),
            "1 per bathroom",
        ));
        items.push(with_breakdown(
            item(
                "plumbing-shower",
                Phase::Plumbing,
                "Dusch",
                "Shower with mixer and rain head",
                qty,
                &book.shower_unit,
                CONF_COUNT,
            ),
            breakdown,
            "1 per bathroom",
        ));
    }

    let wet: Vec<&Room> = ctx.wet_rooms().collect();
    if !wet.is_empty() {
        let drains = wet.len() as f64;
        items.push(with_guideline(
            with_breakdown(
                item(
                    "plumbing-drains",
                    Phase::Plumbing,
                    "Golvbrunn",
                    "Wet room floor drains",
                    drains,
                    &book.floor_drain,
                    CONF_COUNT,
                ),
                wet.iter().map(|r| room_entry(r, 1.0, Unit::St)).collect(),
                "1 per wet room",
            ),
            "Säker Vatten 2021:2",
        ));

        let wet_floor: f64 = wet.iter().map(|r| r.area).sum();
        items.push(with_breakdown(
            item(
                "plumbing-underfloor-heat",
                Phase::Plumbing,
                "Golvvärme",
                "Underfloor heating in wet rooms",
                round1(wet_floor),
                &book.underfloor_heating_per_m2,
                CONF_OBSERVED,
            ),
            wet.iter()
                .map(|r| room_entry(r, r.area, Unit::M2))
                .collect(),
            "Σ wet room floor area",
        ));
    }

    if ctx.equipment.has_heat_pump {
        items.push(item(
            "plumbing-heat-pump",
            Phase::Plumbing,
            "Värmepump",
            "Air-to-water heat pump with installation",
            1.0,
            &book.heat_pump,
            CONF_COUNT,
        ));
    }

    if ctx.equipment.has_laundry {
        items.push(item(
            "plumbing-laundry",
            Phase::Plumbing,
            "Tvättutrustning",
            "Washer and dryer column with connections",
            1.0,
            &book.laundry_package,
            CONF_COUNT,
        ));
    }
}

pub(crate) fn electrical_section(ctx: &EstimateContext<'_>, items: &mut Vec<CostItem>) {
    let indoor = ctx.indoor_count();
    if indoor == 0 {
        return;
    }
    let book = &ctx.cfg.book;

    let points = (indoor * 6) as f64;
    items.push(with_guideline(
        with_breakdown(
            item(
                "electrical-points",
                Phase::Electrical,
                "Elpunkter",
                "Outlets, switches and spotlights",
                points,
                &book.electrical_point,
                CONF_DERIVED,
            ),
            vec![
                entry("indoor rooms", indoor as f64, Unit::St),
                entry("points per room", 6.0, Unit::St),
            ],
            "room count × 6",
        ),
        "SS 436 40 00",
    ));

    items.push(with_guideline(
        item(
            "electrical-distribution-board",
            Phase::Electrical,
            "Elcentral",
            "Main distribution board",
            1.0,
            &book.distribution_board,
            CONF_FIXED,
        ),
        "SS 436 40 00",
    ));
}

pub(crate) fn completion_section(ctx: &EstimateContext<'_>, items: &mut Vec<CostItem>) {
    let book = &ctx.cfg.book;
    let terrace = ctx.terrace_area();

    if terrace > 0.0 {
        let terrace_rooms: Vec<QuantityEntry> = ctx
            .rooms
            .iter()
            .filter(|r| r.category == RoomCategory::Terrace)
            .map(|r| room_entry(r, r.area, Unit::M2))
            .collect();
        items.push(with_breakdown(
            item(
                "completion-terrace",
                Phase::Completion,
                "Altan",
                "Wooden deck",
                round1(terrace),
                &book.terrace_per_m2,
                CONF_OBSERVED,
            ),
            terrace_rooms,
            "Σ terrace area",
        ));
        items.push(item(
            "completion-patio-door",
            Phase::Completion,
            "Altandörr",
            "Sliding patio door",
            1.0,
            &book.patio_door,
            CONF_COUNT,
        ));
    }

    if ctx.equipment.has_fireplace {
        items.push(with_guideline(
            item(
                "completion-fireplace",
                Phase::Completion,
                "Eldstad",
                "Fireplace with insulated flue, inspected",
                1.0,
                &book.fireplace_flue,
                CONF_COUNT,
            ),
            "BBR 5:4 (brandskydd)",
        ));
    }
}

pub(crate) fn admin_section(ctx: &EstimateContext<'_>, items: &mut Vec<CostItem>) {
    // Fixed project fees apply once any construction work exists.
    if items.is_empty() {
        return;
    }
    let book = &ctx.cfg.book;

    items.push(with_guideline(
        item(
            "admin-permit",
            Phase::Admin,
            "Bygglov",
            "Building permit fee",
            1.0,
            &book.building_permit,
            CONF_FIXED,
        ),
        "PBL 2010:900",
    ));
    items.push(with_guideline(
        item(
            "admin-ka",
            Phase::Admin,
            "Kontrollansvarig",
            "Certified control officer",
            1.0,
            &book.ka_fee,
            CONF_FIXED,
        ),
        "PBL 2010:900",
    ));
    items.push(with_guideline(
        item(
            "admin-climate-declaration",
            Phase::Admin,
            "Klimatdeklaration",
            "Climate declaration",
            1.0,
            &book.climate_declaration,
            CONF_FIXED,
        ),
        "Klimatdeklarationslagen 2021:787",
    ));
    items.push(item(
        "admin-insurance",
        Phase::Admin,
        "Byggförsäkring",
        "Construction insurance",
        1.0,
        &book.construction_insurance,
        CONF_FIXED,
    ));
    items.push(item(
        "admin-project-management",
        Phase::Admin,
        "Projektledning",
        "Project management and BAS-P/U coordination",
        1.0,
        &book.project_management,
        CONF_FIXED,
    ));
}

/// Percentage items, computed from the subtotal of everything already
/// generated and appended last.
pub(crate) fn overhead_and_contingency(
    ctx: &EstimateContext<'_>,
    subtotal: f64,
    items: &mut Vec<CostItem>,
) {
    let book = &ctx.cfg.book;

    items.push(with_breakdown(
        item(
            "admin-site-overhead",
            Phase::Admin,
            "Byggplatsomkostnader",
            "Scaffolding, site facilities and waste handling",
            subtotal,
            &book.site_overhead_rate,
            CONF_RATE,
        ),
        vec![entry("item subtotal", subtotal, Unit::Kr)],
        "subtotal × overhead rate",
    ));

    items.push(with_breakdown(
        item(
            "admin-contingency",
            Phase::Admin,
            "Oförutsett",
            "Contingency margin",
            subtotal,
            &book.contingency_rate,
            CONF_RATE,
        ),
        vec![entry("item subtotal", subtotal, Unit::Kr)],
        "subtotal × contingency rate",
    ));
}

fn round1(v: f64) -> f64 {
    crate::area::round1(v)
}
