//! JSON snapshot files written after each pipeline stage.

use anyhow::Context;
use catscrape_scraper::record::ProductRecord;
use std::fs;
use std::path::Path;
use tracing::info;

pub const LINKS_FILE: &str = "product_links.json";
pub const PRODUCTS_FILE: &str = "products.json";

/// Write the collected link list as a pretty-printed JSON array.
pub fn write_links(path: &Path, links: &[String]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(links)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write link snapshot {}", path.display()))?;
    info!("Product links saved to {}", path.display());
    Ok(())
}

/// Write the scraped records as a JSON array mirroring the record fields.
pub fn write_products(path: &Path, products: &[ProductRecord]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(products)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write product snapshot {}", path.display()))?;
    info!("Product details saved to {}", path.display());
    Ok(())
}
