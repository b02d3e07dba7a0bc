use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity of an OCR text block.
///
/// Document AI emits both full lines and individual tokens; room labels
/// are usually cleanest at line level, so matching prefers `Line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Line,
    Token,
}

/// A single OCR text fragment with its normalized position on the page.
///
/// Coordinates are in [0,1] page space. Ephemeral, supplied per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    /// Centroid x in [0,1].
    pub x: f64,
    /// Centroid y in [0,1].
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    pub granularity: Granularity,
}

/// Canonical room category, classified from the Swedish room label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomCategory {
    Bedroom,
    Living,
    Kitchen,
    Bathroom,
    Laundry,
    Entry,
    Closet,
    Storage,
    Garage,
    Utility,
    Terrace,
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoomCategory::Bedroom => "bedroom",
            RoomCategory::Living => "living",
            RoomCategory::Kitchen => "kitchen",
            RoomCategory::Bathroom => "bathroom",
            RoomCategory::Laundry => "laundry",
            RoomCategory::Entry => "entry",
            RoomCategory::Closet => "closet",
            RoomCategory::Storage => "storage",
            RoomCategory::Garage => "garage",
            RoomCategory::Utility => "utility",
            RoomCategory::Terrace => "terrace",
        };
        write!(f, "{s}")
    }
}

/// A room label detected on the plan, not yet paired with an area.
#[derive(Debug, Clone)]
pub struct RoomCandidate {
    pub name: String,
    pub category: RoomCategory,
    pub x: f64,
    pub y: f64,
}

/// A numeric floor-area value detected on the plan, not yet paired with a room.
#[derive(Debug, Clone)]
pub struct AreaCandidate {
    /// Area in m², already filtered to the plausible [1,100] range.
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

/// A resolved room with its assigned floor area.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub name: String,
    pub category: RoomCategory,
    /// Net floor area in m², invariant: area ∈ (0,100].
    pub area: f64,
    /// True for secondary (unheated) area: garage, storage, utility.
    pub is_biarea: bool,
}

impl Room {
    /// Indoor rooms drive interior finishes, door and electrical counts.
    /// Terraces are outdoor surfaces and contribute no floor area.
    pub fn is_indoor(&self) -> bool {
        self.category != RoomCategory::Terrace
    }
}

/// Living vs. secondary floor area figures, net (inside walls, as labeled)
/// and gross (with the 3.5% wall-thickness allowance).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaBreakdown {
    pub boa_net: f64,
    pub biarea_net: f64,
    pub total_net: f64,
    pub boa_gross: f64,
    pub biarea_gross: f64,
    pub total_gross: f64,
}

/// Fixed equipment detected from plan annotations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub has_heat_pump: bool,
    pub has_laundry: bool,
    pub has_fireplace: bool,
}

/// Explicit summary figures printed on the plan (BOA/BTA/BIA/BYA labels),
/// plus a footprint inferred from building dimensions when no label exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryAreas {
    /// Living area (BOA/BOYTA) in m².
    pub boa: Option<f64>,
    /// Total area (BTA) in m².
    pub total: Option<f64>,
    /// Secondary area (BIA/BIYTA) in m².
    pub biarea: Option<f64>,
    /// Building footprint (BYA/BYGGYTA) in m².
    pub footprint: Option<f64>,
    /// True when footprint was inferred from dimension tokens rather
    /// than read from an explicit label.
    #[serde(default)]
    pub footprint_inferred: bool,
}

impl SummaryAreas {
    /// Footprint in effect for ground/structure quantities: explicit BYA
    /// first, then BTA, then the dimension-inferred estimate.
    pub fn effective_footprint(&self) -> Option<f64> {
        if !self.footprint_inferred {
            if let Some(footprint) = self.footprint {
                return Some(footprint);
            }
        }
        self.total.or(self.footprint)
    }
}

/// Construction phase, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Ground,
    Structure,
    Interior,
    Plumbing,
    Electrical,
    Completion,
    Admin,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Ground => "ground",
            Phase::Structure => "structure",
            Phase::Interior => "interior",
            Phase::Plumbing => "plumbing",
            Phase::Electrical => "electrical",
            Phase::Completion => "completion",
            Phase::Admin => "admin",
        };
        write!(f, "{s}")
    }
}

/// Unit of measure for quantities and prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "m")]
    M,
    #[serde(rename = "m2")]
    M2,
    #[serde(rename = "st")]
    St,
    /// Swedish kronor, used when the quantity itself is a cost base
    /// (overhead and contingency items).
    #[serde(rename = "kr")]
    Kr,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Unit::M => "m",
            Unit::M2 => "m²",
            Unit::St => "st",
            Unit::Kr => "kr",
        };
        write!(f, "{s}")
    }
}

/// One contributing measurement in a quantity derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityEntry {
    /// E.g. "WC/D 1", "BYA footprint".
    pub label: String,
    pub value: f64,
    pub unit: Unit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<RoomCategory>,
}

/// Auditable derivation of a cost item's quantity: the contributing rooms
/// or measurements and the formula that combined them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityBreakdown {
    pub entries: Vec<QuantityEntry>,
    pub total: f64,
    pub unit: Unit,
    pub formula: String,
}

/// Provenance of a unit price: where it was found and when it was verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSource {
    pub source_name: String,
    pub source_url: String,
    /// Verification date, YYYY-MM.
    pub verified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_range_low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_range_high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Which factory-efficiency mechanism produces an optimized price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EfficiencyType {
    /// Manufactured off-site in the factory.
    Prefab,
    /// Downstream effect of a shorter build time.
    Streamlined,
    /// Proven standardized designs lower risk.
    Standardized,
    /// Volume purchasing agreements.
    Bulk,
    /// Negotiated vendor terms.
    Vendor,
    /// Bundled turnkey pricing.
    Bundled,
}

/// Dual pricing: conventional on-site contractor price vs. the optimized
/// price the factory-efficiency program achieves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefabDiscount {
    pub efficiency_type: EfficiencyType,
    pub conventional_price: f64,
    pub optimized_price: f64,
    pub savings_amount: f64,
    pub savings_percent: f64,
    pub rationale: String,
}

/// One line of the itemized cost estimate.
///
/// Invariant: `total_cost == round(quantity × unit price in effect)`,
/// where the price in effect is `prefab_discount.optimized_price` when a
/// discount is present, else `unit_price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItem {
    pub id: String,
    pub phase: Phase,
    pub element_name: String,
    pub description: String,
    pub quantity: f64,
    pub unit: Unit,
    /// Conventional unit price in SEK.
    pub unit_price: f64,
    /// Rounded to whole SEK at item granularity.
    pub total_cost: f64,
    /// 0.0–1.0; observed quantities score higher than heuristic ones.
    pub confidence_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_breakdown: Option<QuantityBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefab_discount: Option<PrefabDiscount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_source: Option<PriceSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guideline_reference: Option<String>,
}

impl CostItem {
    /// The unit price in effect: the optimized price when the item is in
    /// the factory-efficiency program.
    pub fn effective_unit_price(&self) -> f64 {
        match &self.prefab_discount {
            Some(d) => d.optimized_price,
            None => self.unit_price,
        }
    }
}

/// Input to the pipeline: the flattened OCR text plus positioned blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlanInput {
    pub text: String,
    #[serde(default)]
    pub blocks: Vec<TextBlock>,
}

/// Room/bedroom/bathroom counts for the result summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCounts {
    pub rooms: usize,
    pub bedrooms: usize,
    pub bathrooms: usize,
}

/// Full pipeline output for one floor plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlanAnalysis {
    pub items: Vec<CostItem>,
    /// Reported total area (gross, or the explicit BTA figure).
    pub total_area: f64,
    /// Reported living area (explicit BOA figure overrides the computed gross).
    pub boa: f64,
    /// Reported secondary area (gross).
    pub biarea: f64,
    pub rooms: Vec<Room>,
    pub equipment: Equipment,
    pub area_breakdown: AreaBreakdown,
    pub summary: RoomCounts,
    /// First 500 chars of the OCR text, for debugging.
    pub extracted_text_excerpt: String,
}

impl FloorPlanAnalysis {
    /// The all-zero result returned for empty OCR input.
    pub fn empty() -> Self {
        FloorPlanAnalysis {
            items: Vec::new(),
            total_area: 0.0,
            boa: 0.0,
            biarea: 0.0,
            rooms: Vec::new(),
            equipment: Equipment::default(),
            area_breakdown: AreaBreakdown::default(),
            summary: RoomCounts::default(),
            extracted_text_excerpt: String::new(),
        }
    }

    pub fn total_cost(&self) -> f64 {
        self.items.iter().map(|i| i.total_cost).sum()
    }
}
