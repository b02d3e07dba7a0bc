use kalkyl_core::error::KalkylError;
use kalkyl_core::pricing::registry::PriceBook;

pub fn run(output_format: &str) -> Result<(), KalkylError> {
    let book = PriceBook::swedish_2025();

    match output_format {
        "json" => {
            let entries: Vec<serde_json::Value> = book
                .entries()
                .iter()
                .map(|(name, price)| {
                    serde_json::json!({
                        "name": name,
                        "value": price.value,
                        "unit": price.unit,
                        "source": price.source,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        _ => {
            println!("Price-reference registry (SEK, Swedish market 2025):\n");
            for (name, price) in book.entries() {
                let range = match (price.source.market_range_low, price.source.market_range_high)
                {
                    (Some(lo), Some(hi)) => format!("  [{lo}-{hi}]"),
                    _ => String::new(),
                };
                println!(
                    "  {:<22} {:>10} kr/{:<3} {} ({}){}",
                    name,
                    price.value,
                    price.unit.to_string(),
                    price.source.source_name,
                    price.source.verified,
                    range
                );
                if let Some(ref notes) = price.source.notes {
                    println!("  {:<22} {notes}", "");
                }
            }
        }
    }

    Ok(())
}
