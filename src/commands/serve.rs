use crate::server::{self, AppState};
use crate::services::{CryptoService, FilePriceStore, PriceStore};
use crate::utils::parse_timezone;
use std::path::Path;
use std::sync::Arc;

pub async fn run(port: u16, timezone: &str, data_dir: &Path, not_supported_file: &Path) {
    init_tracing();

    let timezone = match parse_timezone(timezone) {
        Ok(tz) => tz,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let store = FilePriceStore::new(data_dir, not_supported_file);

    println!("🚀 Starting cryptostats server on port {}", port);
    println!("📁 Price directory:  {}", store.data_dir().display());
    println!("🚫 Exclusion list:   {}", store.not_supported_file().display());

    // Files are re-read per request; this only surfaces setup problems early
    match store.list_symbols() {
        Ok(symbols) => tracing::info!(count = symbols.len(), ?symbols, "Price files found"),
        Err(e) => tracing::warn!("Price directory not readable yet: {}", e),
    }

    let service = CryptoService::new(Arc::new(store), timezone);
    println!("🕒 Reporting zone:   {}", service.timezone());

    if let Err(e) = server::serve(AppState::new(service), port).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}
