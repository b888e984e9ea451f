use crate::data::Database;
use crate::snapshot;
use anyhow::Context;
use catscrape_scraper::record::ProductRecord;
use catscrape_scraper::{DetailExtractor, LinkCollector};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use url::Url;

/// Options for configuring a scrape run
pub struct ScrapeOptions {
    pub base_url: String,
    pub page_size: usize,
    pub database: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub show_progress_bars: bool,
}

/// Outcome of a completed run: the scraped records plus stage counts
pub struct ScrapeSummary {
    pub links_found: usize,
    pub rows_written: usize,
    pub records: Vec<ProductRecord>,
}

impl ScrapeSummary {
    pub fn products_scraped(&self) -> usize {
        self.records.len()
    }
}

/// Extract the trailing path segment of a product URL for display
pub fn product_slug(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            u.path()
                .trim_end_matches('/')
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .unwrap_or("/")
                .to_string()
        })
        .unwrap_or_else(|| url.to_string())
}

/// Run the full pipeline: collect links, extract records, snapshot, persist.
///
/// The database is opened before any network work so a storage failure (the
/// one fatal error class) surfaces up-front instead of after a long scrape.
pub async fn execute_scrape(options: ScrapeOptions) -> anyhow::Result<ScrapeSummary> {
    let ScrapeOptions {
        base_url,
        page_size,
        database,
        output_dir,
        show_progress_bars,
    } = options;

    let db = Database::new(&database)
        .with_context(|| format!("Failed to open database {}", database.display()))?;

    if let Some(ref dir) = output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    // Stage 1: walk the paginated catalogue
    let spinner = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Walking catalogue...");
        Some(pb)
    } else {
        None
    };

    let mut collector = LinkCollector::new().with_page_size(page_size);
    if let Some(ref pb) = spinner {
        let pb_clone = pb.clone();
        collector = collector.with_progress_callback(Arc::new(move |page_url: String| {
            pb_clone.set_message(format!("Fetching {}", page_url));
            pb_clone.tick();
        }));
    }

    let links = collector.collect(&base_url).await?;
    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!("Found {} product links", links.len()));
    }

    if let Some(ref dir) = output_dir {
        snapshot::write_links(&dir.join(snapshot::LINKS_FILE), &links)?;
    }

    // Stage 2: scrape each product page
    let bar = if show_progress_bars {
        let pb = ProgressBar::new(links.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan} {pos}/{len} {msg}")
                .unwrap(),
        );
        Some(pb)
    } else {
        None
    };

    let mut extractor = DetailExtractor::new(&base_url)?;
    if let Some(ref pb) = bar {
        let pb_clone = pb.clone();
        extractor = extractor.with_item_callback(Arc::new(move |count: usize, url: String| {
            pb_clone.set_position(count as u64);
            pb_clone.set_message(product_slug(&url));
        }));
    }

    let records = extractor.extract_all(&links).await;
    if let Some(ref pb) = bar {
        pb.finish_with_message(format!("Scraped {} products", records.len()));
    }

    if let Some(ref dir) = output_dir {
        snapshot::write_products(&dir.join(snapshot::PRODUCTS_FILE), &records)?;
    }

    // Stage 3: persist
    let rows_written = db
        .insert_products(&records)
        .context("Failed to write scraped products to the database")?;

    info!(
        "Scrape complete: {} links, {} products, {} rows",
        links.len(),
        records.len(),
        rows_written
    );

    Ok(ScrapeSummary {
        links_found: links.len(),
        rows_written,
        records,
    })
}

/// Render a post-run text report from the scraped records
pub fn generate_scrape_report(records: &[ProductRecord]) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str(&format!(
        "# Summary ({}):\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    report.push_str(&format!("  Products scraped: {}\n", records.len()));

    let with_image = records.iter().filter(|r| r.image_url.is_some()).count();
    report.push_str(&format!("  With image: {}\n", with_image));

    let total_documents: usize = records.iter().map(|r| r.documents.len()).sum();
    report.push_str(&format!("  Total documents: {}\n", total_documents));

    let total_categories: usize = records.iter().map(|r| r.categories.len()).sum();
    report.push_str(&format!("  Total category tags: {}\n", total_categories));

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str("## Products:\n");
    for record in records {
        let slug = product_slug(&record.url);

        // Products missing their description block stand out in yellow
        let slug_str = if record.detailed_description.is_empty() {
            format!("\x1b[33m{}\x1b[0m", slug)
        } else {
            format!("\x1b[32m{}\x1b[0m", slug)
        };

        report.push_str(&format!(
            "  {} ({} docs, {} categories)\n",
            slug_str,
            record.documents.len(),
            record.categories.len()
        ));
    }

    report
}
