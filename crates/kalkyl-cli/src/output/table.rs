use kalkyl_core::model::{
    AreaBreakdown, Equipment, FloorPlanAnalysis, Phase, Room,
};

const PHASES: [Phase; 7] = [
    Phase::Ground,
    Phase::Structure,
    Phase::Interior,
    Phase::Plumbing,
    Phase::Electrical,
    Phase::Completion,
    Phase::Admin,
];

pub fn print_rooms(rooms: &[Room], breakdown: &AreaBreakdown, equipment: Equipment) {
    if rooms.is_empty() {
        println!("No rooms detected.");
        return;
    }

    println!("Rooms:\n");
    for room in rooms {
        let kind = if room.is_biarea { "biarea" } else { "boa" };
        println!(
            "  {:<16} {:>6.1} m²  {:<9} ({kind})",
            room.name,
            room.area,
            room.category.to_string()
        );
    }

    println!();
    println!("  BOA (net/gross):    {:>6.1} / {:>6.1} m²", breakdown.boa_net, breakdown.boa_gross);
    println!(
        "  Biarea (net/gross): {:>6.1} / {:>6.1} m²",
        breakdown.biarea_net, breakdown.biarea_gross
    );
    println!(
        "  Total (net/gross):  {:>6.1} / {:>6.1} m²",
        breakdown.total_net, breakdown.total_gross
    );

    let mut notes = Vec::new();
    if equipment.has_heat_pump {
        notes.push("heat pump");
    }
    if equipment.has_laundry {
        notes.push("laundry equipment");
    }
    if equipment.has_fireplace {
        notes.push("fireplace");
    }
    if !notes.is_empty() {
        println!("\n  Equipment: {}", notes.join(", "));
    }
}

pub fn print_analysis(analysis: &FloorPlanAnalysis) {
    print_rooms(&analysis.rooms, &analysis.area_breakdown, analysis.equipment);

    if analysis.items.is_empty() {
        return;
    }

    println!("\nCost estimate:\n");
    for phase in PHASES {
        let items: Vec<_> = analysis.items.iter().filter(|i| i.phase == phase).collect();
        if items.is_empty() {
            continue;
        }
        println!("=== {} ===", phase);
        for item in &items {
            let marker = if item.prefab_discount.is_some() {
                " *"
            } else {
                ""
            };
            println!(
                "  {:<28} {:>8.1} {:<3} {:>12.0} kr{marker}",
                item.element_name, item.quantity, item.unit.to_string(), item.total_cost
            );
        }
        let phase_total: f64 = items.iter().map(|i| i.total_cost).sum();
        println!("  {:<28} {:>26.0} kr\n", "Subtotal", phase_total);
    }

    let savings: f64 = analysis
        .items
        .iter()
        .filter_map(|i| i.prefab_discount.as_ref())
        .map(|d| d.savings_amount)
        .sum();
    if savings > 0.0 {
        println!("  * factory-program price applied ({savings:.0} kr saved vs. conventional)");
    }
    println!("\n  Total: {:.0} kr", analysis.total_cost());
}
