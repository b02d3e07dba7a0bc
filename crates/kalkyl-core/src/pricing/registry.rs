//! Price-reference registry: every unit price in the estimate comes from
//! here, with its source, verification date and market range attached.
//!
//! All values are SEK, Swedish market 2025, material + labor unless the
//! notes say otherwise. When changing a price, update the source and
//! verification date with it.

use crate::model::{EfficiencyType, PriceSource, RoomCategory, Unit};

/// Optimized factory-program price for an entry, with the mechanism
/// that achieves it. Entries without one are priced conventionally.
#[derive(Debug, Clone)]
pub struct FactoryProgram {
    pub optimized_price: f64,
    pub efficiency_type: EfficiencyType,
    pub rationale: String,
}

/// A unit price with its provenance.
#[derive(Debug, Clone)]
pub struct PriceRef {
    /// Conventional on-site contractor price.
    pub value: f64,
    pub unit: Unit,
    pub source: PriceSource,
    pub factory: Option<FactoryProgram>,
}

impl PriceRef {
    fn new(value: f64, unit: Unit, source: PriceSource) -> Self {
        PriceRef {
            value,
            unit,
            source,
            factory: None,
        }
    }

    fn with_factory(
        mut self,
        efficiency_type: EfficiencyType,
        optimized_price: f64,
        rationale: &str,
    ) -> Self {
        self.factory = Some(FactoryProgram {
            optimized_price,
            efficiency_type,
            rationale: rationale.to_string(),
        });
        self
    }
}

fn src(
    name: &str,
    url: &str,
    verified: &str,
    range: Option<(f64, f64)>,
    notes: &str,
) -> PriceSource {
    PriceSource {
        source_name: name.to_string(),
        source_url: url.to_string(),
        verified: verified.to_string(),
        market_range_low: range.map(|(lo, _)| lo),
        market_range_high: range.map(|(_, hi)| hi),
        notes: if notes.is_empty() {
            None
        } else {
            Some(notes.to_string())
        },
    }
}

/// The full 2025 price book. Immutable once built; the engine takes it
/// by reference so tests can swap in alternate price sets.
#[derive(Debug, Clone)]
pub struct PriceBook {
    // Ground
    pub excavation_per_m2: PriceRef,
    pub foundation_per_m2: PriceRef,
    pub drainage_per_m: PriceRef,
    // Structure
    pub exterior_wall_per_m2: PriceRef,
    pub roof_per_m2: PriceRef,
    pub window_per_m2: PriceRef,
    pub exterior_door: PriceRef,
    pub interior_door: PriceRef,
    // Flooring
    pub flooring_parquet_per_m2: PriceRef,
    pub flooring_tile_per_m2: PriceRef,
    pub flooring_basic_per_m2: PriceRef,
    pub flooring_garage_per_m2: PriceRef,
    // Walls
    pub interior_wall_per_m2: PriceRef,
    pub wet_room_wall_per_m2: PriceRef,
    // Interior units
    pub kitchen_base: PriceRef,
    pub appliance_package: PriceRef,
    pub wardrobe_unit: PriceRef,
    // Plumbing
    pub wc_unit: PriceRef,
    pub washbasin_unit: PriceRef,
    pub shower_unit: PriceRef,
    pub floor_drain: PriceRef,
    pub underfloor_heating_per_m2: PriceRef,
    pub heat_pump: PriceRef,
    pub laundry_package: PriceRef,
    // Electrical
    pub electrical_point: PriceRef,
    pub distribution_board: PriceRef,
    // Completion
    pub terrace_per_m2: PriceRef,
    pub patio_door: PriceRef,
    pub gutters_per_m: PriceRef,
    pub fireplace_flue: PriceRef,
    // Admin
    pub climate_declaration: PriceRef,
    pub ka_fee: PriceRef,
    pub building_permit: PriceRef,
    pub construction_insurance: PriceRef,
    pub project_management: PriceRef,
    // Percentage rates, applied to the item subtotal
    pub site_overhead_rate: PriceRef,
    pub contingency_rate: PriceRef,
}

const BYGGSTART_HUS: &str = "https://www.byggstart.se/pris/bygga-hus";
const BYGGSTART_BADRUM: &str = "https://www.byggstart.se/pris/renovera-badrum";
const HUSEXPERTER_EL: &str = "https://www.husexperter.se/pris/vad-kostar-elektriker";
const VERIFIED: &str = "2025-11";

impl PriceBook {
    /// Swedish market prices, verified November 2025.
    pub fn swedish_2025() -> Self {
        PriceBook {
            excavation_per_m2: PriceRef::new(
                1000.0,
                Unit::M2,
                src(
                    "Bygglov.se",
                    "https://bygglov.se/guide/utomhus/schaktning",
                    VERIFIED,
                    Some((500.0, 1500.0)),
                    "Schaktning och markberedning. Range varies by soil conditions.",
                ),
            ),
            foundation_per_m2: PriceRef::new(
                3500.0,
                Unit::M2,
                src(
                    "Byggstart.se",
                    "https://www.byggstart.se/pris/gjuta-platta",
                    VERIFIED,
                    Some((1500.0, 4000.0)),
                    "Platta på mark inkl isolering 300mm, armering, betong. Exkl golvvärme.",
                ),
            ),
            drainage_per_m: PriceRef::new(
                400.0,
                Unit::M,
                src(
                    "Bygglov.se",
                    "https://bygglov.se/guide/utomhus/schaktning",
                    VERIFIED,
                    Some((300.0, 600.0)),
                    "Perimeter drainage system",
                ),
            ),
            exterior_wall_per_m2: PriceRef::new(
                3800.0,
                Unit::M2,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((3000.0, 4500.0)),
                    "Timber frame 45x220mm, mineral wool, sheathing, vapor barrier",
                ),
            )
            .with_factory(
                EfficiencyType::Prefab,
                3200.0,
                "Wall elements manufactured off-site with windows pre-fitted",
            ),
            roof_per_m2: PriceRef::new(
                2200.0,
                Unit::M2,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((1800.0, 2800.0)),
                    "Pitched roof with concrete tiles, includes trusses and insulation",
                ),
            )
            .with_factory(
                EfficiencyType::Prefab,
                1900.0,
                "Prefabricated roof trusses, one-day assembly",
            ),
            window_per_m2: PriceRef::new(
                8500.0,
                Unit::M2,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((6000.0, 12000.0)),
                    "Triple-glazed windows, installed",
                ),
            )
            .with_factory(
                EfficiencyType::Standardized,
                7200.0,
                "Standard catalogue sizes, no custom manufacturing",
            ),
            exterior_door: PriceRef::new(
                25000.0,
                Unit::St,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((15000.0, 40000.0)),
                    "Insulated entry door with frame, installed",
                ),
            ),
            interior_door: PriceRef::new(
                8500.0,
                Unit::St,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((5000.0, 12000.0)),
                    "Standard interior door with frame, installed",
                ),
            )
            .with_factory(
                EfficiencyType::Bulk,
                7000.0,
                "Volume purchasing across all factory projects",
            ),
            flooring_parquet_per_m2: PriceRef::new(
                850.0,
                Unit::M2,
                src(
                    "Hernogolv.se",
                    "https://hernogolv.se/lagga-golv-kostnad/",
                    VERIFIED,
                    Some((650.0, 1200.0)),
                    "Parquet flooring material + installation",
                ),
            ),
            flooring_tile_per_m2: PriceRef::new(
                1600.0,
                Unit::M2,
                src(
                    "Qicon.se",
                    "https://qicon.se/pris/kakel-badrum/",
                    VERIFIED,
                    Some((1200.0, 2500.0)),
                    "Ceramic tile flooring material + installation",
                ),
            ),
            flooring_basic_per_m2: PriceRef::new(
                450.0,
                Unit::M2,
                src(
                    "Proffsmagasinet.se",
                    "https://www.proffsmagasinet.se/kunskapsportalen/guider/prisguide-golv",
                    VERIFIED,
                    Some((300.0, 600.0)),
                    "Basic flooring for storage/utility rooms",
                ),
            ),
            flooring_garage_per_m2: PriceRef::new(
                350.0,
                Unit::M2,
                src(
                    "Proffsmagasinet.se",
                    "https://www.proffsmagasinet.se/kunskapsportalen/guider/prisguide-golv",
                    VERIFIED,
                    Some((250.0, 500.0)),
                    "Epoxy or sealed concrete garage floor",
                ),
            ),
            interior_wall_per_m2: PriceRef::new(
                1450.0,
                Unit::M2,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((1000.0, 1800.0)),
                    "Gypsum board wall with paint finish",
                ),
            ),
            wet_room_wall_per_m2: PriceRef::new(
                4200.0,
                Unit::M2,
                src(
                    "Byggstart.se",
                    BYGGSTART_BADRUM,
                    VERIFIED,
                    Some((3500.0, 5500.0)),
                    "Wet room walls with full waterproofing per Säker Vatten 2021:2",
                ),
            ),
            kitchen_base: PriceRef::new(
                85000.0,
                Unit::St,
                src(
                    "Husexperter.se",
                    "https://www.husexperter.se/pris/vad-kostar-koksrenovering",
                    VERIFIED,
                    Some((50000.0, 200000.0)),
                    "Budget kitchen with countertop and installation",
                ),
            )
            .with_factory(
                EfficiencyType::Vendor,
                72000.0,
                "Negotiated volume terms with kitchen supplier",
            ),
            appliance_package: PriceRef::new(
                65000.0,
                Unit::St,
                src(
                    "Husexperter.se",
                    "https://www.husexperter.se/pris/vad-kostar-koksrenovering",
                    VERIFIED,
                    Some((40000.0, 100000.0)),
                    "Stove, fridge, dishwasher",
                ),
            )
            .with_factory(
                EfficiencyType::Bulk,
                56000.0,
                "Appliance packages purchased in volume",
            ),
            wardrobe_unit: PriceRef::new(
                6000.0,
                Unit::St,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((3500.0, 10000.0)),
                    "Fitted wardrobe per bedroom, installed",
                ),
            ),
            wc_unit: PriceRef::new(
                14000.0,
                Unit::St,
                src(
                    "Byggstart.se",
                    BYGGSTART_BADRUM,
                    VERIFIED,
                    Some((8000.0, 25000.0)),
                    "Wall-hung WC with concealed cistern, installed",
                ),
            ),
            washbasin_unit: PriceRef::new(
                6000.0,
                Unit::St,
                src(
                    "Byggstart.se",
                    BYGGSTART_BADRUM,
                    VERIFIED,
                    Some((3000.0, 12000.0)),
                    "Porcelain basin with mixer tap, installed",
                ),
            ),
            shower_unit: PriceRef::new(
                8000.0,
                Unit::St,
                src(
                    "Byggstart.se",
                    BYGGSTART_BADRUM,
                    VERIFIED,
                    Some((5000.0, 15000.0)),
                    "Shower with mixer and rain head, installed",
                ),
            ),
            floor_drain: PriceRef::new(
                6500.0,
                Unit::St,
                src(
                    "Byggstart.se",
                    BYGGSTART_BADRUM,
                    VERIFIED,
                    Some((4000.0, 10000.0)),
                    "Wet room floor drain per Säker Vatten",
                ),
            ),
            underfloor_heating_per_m2: PriceRef::new(
                450.0,
                Unit::M2,
                src(
                    "Byggstart.se",
                    BYGGSTART_BADRUM,
                    VERIFIED,
                    Some((300.0, 700.0)),
                    "Electric/water underfloor heating in wet rooms",
                ),
            ),
            heat_pump: PriceRef::new(
                120000.0,
                Unit::St,
                src(
                    "Greenmatch.se",
                    "https://www.greenmatch.se/luftvaermepump/luft-vattenvaermepump/pris",
                    VERIFIED,
                    Some((95000.0, 195000.0)),
                    "Luft-vatten värmepump 8-10kW with installation",
                ),
            )
            .with_factory(
                EfficiencyType::Vendor,
                105000.0,
                "Volume agreement with heat pump supplier",
            ),
            laundry_package: PriceRef::new(
                25000.0,
                Unit::St,
                src(
                    "Husexperter.se",
                    "https://www.husexperter.se/pris/vad-kostar-koksrenovering",
                    VERIFIED,
                    Some((15000.0, 40000.0)),
                    "Washer and dryer column, installed with connections",
                ),
            ),
            electrical_point: PriceRef::new(
                1800.0,
                Unit::St,
                src(
                    "Husexperter.se",
                    HUSEXPERTER_EL,
                    VERIFIED,
                    Some((1500.0, 2500.0)),
                    "New electrical outlet/switch/spotlight installation",
                ),
            ),
            distribution_board: PriceRef::new(
                22000.0,
                Unit::St,
                src(
                    "Husexperter.se",
                    HUSEXPERTER_EL,
                    VERIFIED,
                    Some((15000.0, 35000.0)),
                    "Main electrical panel",
                ),
            ),
            terrace_per_m2: PriceRef::new(
                2500.0,
                Unit::M2,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((1500.0, 4000.0)),
                    "Wooden deck/terrace",
                ),
            ),
            patio_door: PriceRef::new(
                18000.0,
                Unit::St,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((12000.0, 30000.0)),
                    "Sliding patio door, installed",
                ),
            ),
            gutters_per_m: PriceRef::new(
                650.0,
                Unit::M,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((400.0, 900.0)),
                    "Gutters and downpipes",
                ),
            ),
            fireplace_flue: PriceRef::new(
                55000.0,
                Unit::St,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((35000.0, 90000.0)),
                    "Braskamin with insulated flue, installed and inspected",
                ),
            ),
            climate_declaration: PriceRef::new(
                20000.0,
                Unit::St,
                src(
                    "Boverket.se",
                    "https://www.boverket.se/sv/byggande/hallbart-byggande-och-forvaltning/klimatdeklaration/",
                    VERIFIED,
                    Some((15000.0, 30000.0)),
                    "Klimatdeklaration (mandatory from 2022)",
                ),
            ),
            ka_fee: PriceRef::new(
                35000.0,
                Unit::St,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((25000.0, 50000.0)),
                    "Kontrollansvarig (certified inspector)",
                ),
            ),
            building_permit: PriceRef::new(
                40000.0,
                Unit::St,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((25000.0, 70000.0)),
                    "Building permit fee (varies by municipality)",
                ),
            ),
            construction_insurance: PriceRef::new(
                25000.0,
                Unit::St,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((15000.0, 40000.0)),
                    "Byggförsäkring",
                ),
            ),
            project_management: PriceRef::new(
                60000.0,
                Unit::St,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((40000.0, 100000.0)),
                    "Project management and BAS-P/U coordination",
                ),
            ),
            site_overhead_rate: PriceRef::new(
                0.05,
                Unit::Kr,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((0.03, 0.08)),
                    "Scaffolding, containers, waste management; share of subtotal",
                ),
            )
            .with_factory(
                EfficiencyType::Streamlined,
                0.035,
                "Shorter on-site build time cuts establishment costs",
            ),
            contingency_rate: PriceRef::new(
                0.10,
                Unit::Kr,
                src(
                    "Byggstart.se",
                    BYGGSTART_HUS,
                    VERIFIED,
                    Some((0.05, 0.15)),
                    "Risk margin; share of subtotal",
                ),
            )
            .with_factory(
                EfficiencyType::Standardized,
                0.07,
                "Proven standardized designs lower execution risk",
            ),
        }
    }

    /// All entries with their registry names, for listing and audit.
    pub fn entries(&self) -> Vec<(&'static str, &PriceRef)> {
        vec![
            ("excavation", &self.excavation_per_m2),
            ("foundation", &self.foundation_per_m2),
            ("drainage", &self.drainage_per_m),
            ("exterior-wall", &self.exterior_wall_per_m2),
            ("roof", &self.roof_per_m2),
            ("window", &self.window_per_m2),
            ("exterior-door", &self.exterior_door),
            ("interior-door", &self.interior_door),
            ("flooring-parquet", &self.flooring_parquet_per_m2),
            ("flooring-tile", &self.flooring_tile_per_m2),
            ("flooring-basic", &self.flooring_basic_per_m2),
            ("flooring-garage", &self.flooring_garage_per_m2),
            ("interior-wall", &self.interior_wall_per_m2),
            ("wet-room-wall", &self.wet_room_wall_per_m2),
            ("kitchen", &self.kitchen_base),
            ("appliances", &self.appliance_package),
            ("wardrobe", &self.wardrobe_unit),
            ("wc", &self.wc_unit),
            ("washbasin", &self.washbasin_unit),
            ("shower", &self.shower_unit),
            ("floor-drain", &self.floor_drain),
            ("underfloor-heating", &self.underfloor_heating_per_m2),
            ("heat-pump", &self.heat_pump),
            ("laundry", &self.laundry_package),
            ("electrical-point", &self.electrical_point),
            ("distribution-board", &self.distribution_board),
            ("terrace", &self.terrace_per_m2),
            ("patio-door", &self.patio_door),
            ("gutters", &self.gutters_per_m),
            ("fireplace", &self.fireplace_flue),
            ("climate-declaration", &self.climate_declaration),
            ("ka", &self.ka_fee),
            ("building-permit", &self.building_permit),
            ("insurance", &self.construction_insurance),
            ("project-management", &self.project_management),
            ("site-overhead-rate", &self.site_overhead_rate),
            ("contingency-rate", &self.contingency_rate),
        ]
    }

    /// Flooring rate by room category. Terraces are priced as decking in
    /// the completion phase, not here.
    pub fn flooring(&self, category: RoomCategory) -> &PriceRef {
        match category {
            RoomCategory::Bedroom | RoomCategory::Living | RoomCategory::Closet => {
                &self.flooring_parquet_per_m2
            }
            RoomCategory::Kitchen
            | RoomCategory::Bathroom
            | RoomCategory::Laundry
            | RoomCategory::Entry => &self.flooring_tile_per_m2,
            RoomCategory::Garage => &self.flooring_garage_per_m2,
            RoomCategory::Storage | RoomCategory::Utility | RoomCategory::Terrace => {
                &self.flooring_basic_per_m2
            }
        }
    }
}
