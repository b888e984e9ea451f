use crate::error::{Result, ScrapeError};
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Path of the paginated catalogue listing, relative to the site origin.
const CATALOGUE_PATH: &str = "/index.php/en/products/product-catalogue";

/// Anchors whose href contains this segment point at individual product pages.
const PRODUCT_PATH_SEGMENT: &str = "/en/products/item/";

/// Walks the paginated catalogue and collects product page URLs.
///
/// The loop runs while the current page has not been visited before and the
/// page contributed at least one new link. A page of only previously-seen
/// links is treated the same as an empty page: end of catalogue.
pub struct LinkCollector {
    client: Client,
    page_size: usize,
    progress_callback: Option<ProgressCallback>,
}

impl LinkCollector {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("Catscrape/0.1 (https://github.com/trapdoorsec/catscrape)")
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(timeout_secs / 2))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            page_size: 10,
            progress_callback: None,
        }
    }

    /// Offset increment between catalogue pages.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Collect every product link reachable through the paginated catalogue.
    ///
    /// A failed catalogue fetch is not fatal: the links gathered so far are
    /// returned. Only a malformed `base_url` surfaces as an error.
    pub async fn collect(&self, base_url: &str) -> Result<Vec<String>> {
        let base = Url::parse(base_url)
            .map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let mut visited: HashSet<String> = HashSet::new();
        let mut links: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut offset = 0usize;

        loop {
            let page_url = Self::catalogue_url(&base, offset);

            // Defensive cycle guard: offsets only grow, but a repeated page
            // URL must never loop forever.
            if !visited.insert(page_url.clone()) {
                debug!("Catalogue page {} already visited, stopping", page_url);
                break;
            }

            if let Some(ref callback) = self.progress_callback {
                callback(page_url.clone());
            }

            let body = match self.fetch_page(&page_url).await {
                Ok(body) => body,
                Err(e) => {
                    // Partial result accepted, not escalated.
                    warn!("Failed to retrieve catalogue page {}: {}", page_url, e);
                    break;
                }
            };

            let found = Self::extract_product_links(&body, &base, &mut seen);
            if found.is_empty() {
                info!("No new products at {}, stopping pagination", page_url);
                break;
            }

            debug!("Catalogue page {}: {} new products", page_url, found.len());
            links.extend(found);
            offset += self.page_size;
        }

        info!("Collected {} product links", links.len());
        Ok(links)
    }

    fn catalogue_url(base: &Url, offset: usize) -> String {
        format!(
            "{}{}?start={}",
            base.as_str().trim_end_matches('/'),
            CATALOGUE_PATH,
            offset
        )
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    /// Scan anchors on a catalogue page and return the product links not seen
    /// in this run yet, in document order.
    fn extract_product_links(html: &str, base: &Url, seen: &mut HashSet<String>) -> Vec<String> {
        let document = Html::parse_document(html);
        let link_selector = Selector::parse("a[href]").unwrap();

        let mut found = Vec::new();
        for element in document.select(&link_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            if !href.contains(PRODUCT_PATH_SEGMENT) {
                continue;
            }

            let full_link = if href.starts_with("http") {
                href.to_string()
            } else {
                match base.join(href) {
                    Ok(resolved) => resolved.to_string(),
                    Err(e) => {
                        debug!("Skipping unresolvable href {}: {}", href, e);
                        continue;
                    }
                }
            };

            if seen.insert(full_link.clone()) {
                found.push(full_link);
            }
        }
        found
    }
}

impl Default for LinkCollector {
    fn default() -> Self {
        Self::new()
    }
}
