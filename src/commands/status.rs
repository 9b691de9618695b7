use crate::services::{self, FilePriceStore};
use crate::utils::format_timestamp;
use std::path::Path;

pub fn run(data_dir: &Path, not_supported_file: &Path) {
    println!("📊 Crypto Data Status\n");

    let store = FilePriceStore::new(data_dir, not_supported_file);
    if let Err(e) = show_status(&store) {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn show_status(store: &FilePriceStore) -> Result<(), Box<dyn std::error::Error>> {
    let stats = services::get_market_stats(store)?;

    if !stats.has_data() {
        println!(
            "⚠️  No price files found in {}",
            store.data_dir().display()
        );
        return Ok(());
    }

    println!("📈 Symbols: {}", stats.symbols.len());
    println!("🧾 Records: {}\n", stats.total_records());

    let tz = chrono_tz::UTC;
    for info in &stats.symbols {
        let span = match (info.first_time, info.last_time) {
            (Some(first), Some(last)) => format!(
                "{} → {}",
                format_timestamp(&first, &tz),
                format_timestamp(&last, &tz)
            ),
            _ => "no records".to_string(),
        };
        let marker = if info.excluded { "  (not supported)" } else { "" };
        println!(
            "  {:<8} {:>6} records  {}{}",
            info.symbol, info.record_count, span, marker
        );
    }

    println!();
    if stats.excluded.is_empty() {
        println!("🚫 Not supported: none");
    } else {
        println!("🚫 Not supported: {}", stats.excluded.join(", "));
    }

    Ok(())
}
