//! Quantity and pricing engine: turns resolved rooms and area figures
//! into an itemized, auditable cost estimate.
//!
//! The engine runs a fixed pipeline of phase sections. Each section is
//! gated on its driving quantity: no kitchen room, no kitchen items; no
//! terrace, no decking. Percentage items (site overhead, contingency)
//! are computed from the subtotal of everything before them and appended
//! last, so they are never part of their own base.

pub mod phases;
pub mod registry;

use crate::model::{
    AreaBreakdown, CostItem, Equipment, Room, RoomCategory, SummaryAreas,
};
use registry::PriceBook;
use tracing::debug;

/// Immutable pricing parameters. Passed into the engine by reference so
/// tests can run alternate price sets against the same plan.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub book: PriceBook,
    /// Interior wall height used for wall-area estimates.
    pub wall_height_m: f64,
    /// Roof-eave / exterior-wall allowance on the perimeter estimate.
    pub eave_factor: f64,
    /// Roof surface per m² footprint, from a fixed 22° pitch (1/cos 22°).
    pub roof_pitch_factor: f64,
    /// Window glazing area as a share of living area.
    pub glazing_ratio: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            book: PriceBook::swedish_2025(),
            wall_height_m: 2.5,
            eave_factor: 1.2,
            roof_pitch_factor: 1.08,
            glazing_ratio: 0.15,
        }
    }
}

/// Everything a phase section needs to decide its gates and quantities.
pub(crate) struct EstimateContext<'a> {
    pub cfg: &'a PricingConfig,
    pub rooms: &'a [Room],
    pub areas: &'a AreaBreakdown,
    pub summary: &'a SummaryAreas,
    pub equipment: Equipment,
}

impl EstimateContext<'_> {
    /// Gross living area driving windows and glazing.
    pub fn living_area(&self) -> f64 {
        self.areas.boa_gross
    }

    /// Footprint for ground and structure quantities, with whether it
    /// was read from the plan or derived. Falls back to the gross total
    /// when the plan carries no usable summary figure.
    pub fn footprint(&self) -> Option<(f64, bool)> {
        let observed = (!self.summary.footprint_inferred && self.summary.footprint.is_some())
            || self.summary.total.is_some();
        if let Some(fp) = self.summary.effective_footprint() {
            return Some((fp, observed));
        }
        if self.areas.total_gross > 0.0 {
            return Some((self.areas.total_gross, false));
        }
        None
    }

    pub fn indoor_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|r| r.is_indoor())
    }

    pub fn indoor_count(&self) -> usize {
        self.indoor_rooms().count()
    }

    pub fn count_of(&self, category: RoomCategory) -> usize {
        self.rooms.iter().filter(|r| r.category == category).count()
    }

    pub fn wet_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms
            .iter()
            .filter(|r| crate::classify::is_wet_room(r.category))
    }

    pub fn terrace_area(&self) -> f64 {
        self.rooms
            .iter()
            .filter(|r| r.category == RoomCategory::Terrace)
            .map(|r| r.area)
            .sum()
    }
}

/// Produce the full itemized estimate.
///
/// Section order is fixed and the output is fully deterministic for a
/// given input and configuration.
pub fn estimate(
    cfg: &PricingConfig,
    rooms: &[Room],
    areas: &AreaBreakdown,
    summary: &SummaryAreas,
    equipment: Equipment,
) -> Vec<CostItem> {
    let ctx = EstimateContext {
        cfg,
        rooms,
        areas,
        summary,
        equipment,
    };

    let mut items = Vec::new();
    phases::ground_section(&ctx, &mut items);
    phases::structure_section(&ctx, &mut items);
    phases::interior_section(&ctx, &mut items);
    phases::plumbing_section(&ctx, &mut items);
    phases::electrical_section(&ctx, &mut items);
    phases::completion_section(&ctx, &mut items);
    phases::admin_section(&ctx, &mut items);

    let subtotal: f64 = items.iter().map(|i| i.total_cost).sum();
    if subtotal > 0.0 {
        phases::overhead_and_contingency(&ctx, subtotal, &mut items);
    }

    debug!(
        items = items.len(),
        subtotal, "cost estimate generated"
    );
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Phase;

    fn room(name: &str, category: RoomCategory, area: f64) -> Room {
        Room {
            name: name.into(),
            category,
            area,
            is_biarea: crate::classify::is_biarea(category),
        }
    }

    fn base_setup() -> (Vec<Room>, AreaBreakdown, SummaryAreas) {
        let rooms = vec![
            room("KÖK", RoomCategory::Kitchen, 18.1),
            room("SOVRUM 1", RoomCategory::Bedroom, 11.9),
            room("WC", RoomCategory::Bathroom, 4.0),
        ];
        let areas = crate::area::aggregate(&rooms);
        let summary = SummaryAreas {
            footprint: Some(100.0),
            ..SummaryAreas::default()
        };
        (rooms, areas, summary)
    }

    #[test]
    fn test_cost_invariant_holds_for_every_item() {
        let cfg = PricingConfig::default();
        let (rooms, areas, summary) = base_setup();
        let items = estimate(&cfg, &rooms, &areas, &summary, Equipment::default());
        assert!(!items.is_empty());
        for item in &items {
            assert_eq!(
                item.total_cost,
                (item.quantity * item.effective_unit_price()).round(),
                "item {}",
                item.id
            );
        }
    }

    #[test]
    fn test_exactly_one_wc_and_one_kitchen_item() {
        let cfg = PricingConfig::default();
        let (rooms, areas, summary) = base_setup();
        let items = estimate(&cfg, &rooms, &areas, &summary, Equipment::default());
        let wc: Vec<_> = items.iter().filter(|i| i.id == "plumbing-wc").collect();
        assert_eq!(wc.len(), 1);
        assert_eq!(wc[0].quantity, 1.0);
        let kitchen: Vec<_> = items
            .iter()
            .filter(|i| i.id == "interior-kitchen")
            .collect();
        assert_eq!(kitchen.len(), 1);
        assert_eq!(kitchen[0].quantity, 1.0);
    }

    #[test]
    fn test_overhead_and_contingency_from_prior_subtotal() {
        let cfg = PricingConfig::default();
        let (rooms, areas, summary) = base_setup();
        let items = estimate(&cfg, &rooms, &areas, &summary, Equipment::default());

        let n = items.len();
        let overhead = &items[n - 2];
        let contingency = &items[n - 1];
        assert_eq!(overhead.id, "admin-site-overhead");
        assert_eq!(contingency.id, "admin-contingency");

        let subtotal: f64 = items[..n - 2].iter().map(|i| i.total_cost).sum();
        assert_eq!(overhead.quantity, subtotal);
        assert_eq!(contingency.quantity, subtotal);
        assert_eq!(
            overhead.total_cost,
            (subtotal * overhead.effective_unit_price()).round()
        );
        assert_eq!(
            contingency.total_cost,
            (subtotal * contingency.effective_unit_price()).round()
        );
    }

    #[test]
    fn test_no_zero_value_placeholder_items() {
        let cfg = PricingConfig::default();
        let (rooms, areas, summary) = base_setup();
        let items = estimate(&cfg, &rooms, &areas, &summary, Equipment::default());
        // No kitchen room in this variant: the kitchen items must be
        // absent, not present with zero quantity.
        let no_kitchen: Vec<Room> = rooms
            .iter()
            .filter(|r| r.category != RoomCategory::Kitchen)
            .cloned()
            .collect();
        let areas2 = crate::area::aggregate(&no_kitchen);
        let items2 = estimate(&cfg, &no_kitchen, &areas2, &summary, Equipment::default());
        assert!(items2.iter().all(|i| i.quantity > 0.0));
        assert!(items2.iter().all(|i| i.id != "interior-kitchen"));
        assert!(items.iter().all(|i| i.quantity > 0.0));
    }

    #[test]
    fn test_terrace_gates_completion_items() {
        let cfg = PricingConfig::default();
        let (mut rooms, areas, summary) = base_setup();
        let items = estimate(&cfg, &rooms, &areas, &summary, Equipment::default());
        assert!(items.iter().all(|i| i.id != "completion-terrace"));
        assert!(items.iter().all(|i| i.id != "completion-patio-door"));

        rooms.push(room("ALTAN", RoomCategory::Terrace, 15.0));
        let areas = crate::area::aggregate(&rooms);
        let items = estimate(&cfg, &rooms, &areas, &summary, Equipment::default());
        let terrace = items.iter().find(|i| i.id == "completion-terrace").unwrap();
        assert_eq!(terrace.quantity, 15.0);
        assert!(items.iter().any(|i| i.id == "completion-patio-door"));
    }

    #[test]
    fn test_equipment_gates_heat_pump_and_laundry() {
        let cfg = PricingConfig::default();
        let (rooms, areas, summary) = base_setup();
        let equipment = Equipment {
            has_heat_pump: true,
            has_laundry: true,
            has_fireplace: true,
        };
        let items = estimate(&cfg, &rooms, &areas, &summary, equipment);
        assert!(items.iter().any(|i| i.id == "plumbing-heat-pump"));
        assert!(items.iter().any(|i| i.id == "plumbing-laundry"));
        assert!(items.iter().any(|i| i.id == "completion-fireplace"));
    }

    #[test]
    fn test_alternate_price_book_flows_through_discounted_items() {
        let (rooms, areas, summary) = base_setup();
        let baseline = estimate(
            &PricingConfig::default(),
            &rooms,
            &areas,
            &summary,
            Equipment::default(),
        );

        // Double the exterior-wall entry, conventional and optimized
        // alike: the discounted item total must follow the book.
        let mut cfg = PricingConfig::default();
        cfg.book.exterior_wall_per_m2.value *= 2.0;
        if let Some(program) = cfg.book.exterior_wall_per_m2.factory.as_mut() {
            program.optimized_price *= 2.0;
        }
        let items = estimate(&cfg, &rooms, &areas, &summary, Equipment::default());

        let walls = items.iter().find(|i| i.id == "structure-ext-walls").unwrap();
        let baseline_walls = baseline
            .iter()
            .find(|i| i.id == "structure-ext-walls")
            .unwrap();
        assert_ne!(walls.total_cost, baseline_walls.total_cost);
        assert_eq!(
            walls.total_cost,
            (walls.quantity * walls.effective_unit_price()).round()
        );
        let discount = walls.prefab_discount.as_ref().unwrap();
        assert_eq!(discount.conventional_price, 7600.0);
        assert_eq!(discount.optimized_price, 6400.0);
    }

    #[test]
    fn test_determinism() {
        let cfg = PricingConfig::default();
        let (rooms, areas, summary) = base_setup();
        let a = estimate(&cfg, &rooms, &areas, &summary, Equipment::default());
        let b = estimate(&cfg, &rooms, &areas, &summary, Equipment::default());
        let ja = serde_json::to_string(&a).unwrap();
        let jb = serde_json::to_string(&b).unwrap();
        assert_eq!(ja, jb);
    }

    #[test]
    fn test_empty_rooms_no_footprint_yields_no_items() {
        let cfg = PricingConfig::default();
        let items = estimate(
            &cfg,
            &[],
            &AreaBreakdown::default(),
            &SummaryAreas::default(),
            Equipment::default(),
        );
        assert!(items.is_empty());
    }

    #[test]
    fn test_phase_ordering() {
        let cfg = PricingConfig::default();
        let (rooms, areas, summary) = base_setup();
        let items = estimate(&cfg, &rooms, &areas, &summary, Equipment::default());
        let order = [
            Phase::Ground,
            Phase::Structure,
            Phase::Interior,
            Phase::Plumbing,
            Phase::Electrical,
            Phase::Completion,
            Phase::Admin,
        ];
        let indices: Vec<usize> = items
            .iter()
            .map(|i| order.iter().position(|p| *p == i.phase).unwrap())
            .collect();
        assert!(indices.windows(2).all(|w| w[0] <= w[1]));
    }
}
