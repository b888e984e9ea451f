use crate::error::{Result, ScrapeError};
use crate::record::{CategoryLink, DocumentLink, ProductRecord};
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

pub type ItemCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Marker phrase locating the description block on a product page.
const DESCRIPTION_MARKER: &str = "SHORT DESCRIPTION & APPLICATIONS";

/// Marker phrase locating the consumption block.
const CONSUMPTION_MARKER: &str = "CONSUMPTION INFORMATION";

/// Class token carried by tracked document download anchors.
const DOCUMENT_CLASS: &str = "docman_track_download";

/// Container holding the product's category anchors.
const CATEGORIES_CLASS: &str = "k2CategoriesListBlock";

/// Fetches product pages and extracts their metadata fields.
///
/// Every field lookup is tolerant: a missing element or attribute yields an
/// empty or absent value for that field only, never an error.
pub struct DetailExtractor {
    client: Client,
    base: Url,
    item_callback: Option<ItemCallback>,
}

impl DetailExtractor {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, 10)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder()
            .user_agent("Catscrape/0.1 (https://github.com/trapdoorsec/catscrape)")
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(timeout_secs / 2))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            client,
            base,
            item_callback: None,
        })
    }

    /// Called after each product page with the running count and its URL.
    pub fn with_item_callback(mut self, callback: ItemCallback) -> Self {
        self.item_callback = Some(callback);
        self
    }

    /// Fetch one product page and extract its fields.
    pub async fn extract(&self, url: &str) -> Result<ProductRecord> {
        debug!("Fetching product page {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        Ok(Self::parse_record(&body, url, &self.base))
    }

    /// Extract every link in input order, best effort.
    ///
    /// A failed fetch skips that single product; the rest of the batch
    /// continues.
    pub async fn extract_all(&self, links: &[String]) -> Vec<ProductRecord> {
        let mut records = Vec::with_capacity(links.len());
        for (processed, link) in links.iter().enumerate() {
            match self.extract(link).await {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping product {}: {}", link, e),
            }
            if let Some(ref callback) = self.item_callback {
                callback(processed + 1, link.clone());
            }
        }
        records
    }

    /// Pull the five metadata fields out of a product page body.
    fn parse_record(html: &str, url: &str, base: &Url) -> ProductRecord {
        let document = Html::parse_document(html);
        let mut record = ProductRecord::new(url.to_string());

        Self::extract_marker_blocks(&document, &mut record);
        record.image_url = Self::extract_image_url(&document);
        record.documents = Self::extract_documents(&document, base);
        record.categories = Self::extract_categories(&document, base);

        record
    }

    /// First paragraph containing each marker phrase wins; the marker text is
    /// stripped from the captured value.
    fn extract_marker_blocks(document: &Html, record: &mut ProductRecord) {
        let paragraph_selector = Selector::parse("p").unwrap();

        for paragraph in document.select(&paragraph_selector) {
            let text: String = paragraph.text().collect();
            if record.detailed_description.is_empty() && text.contains(DESCRIPTION_MARKER) {
                record.detailed_description =
                    text.replace(DESCRIPTION_MARKER, "").trim().to_string();
            } else if record.consumption_information.is_empty()
                && text.contains(CONSUMPTION_MARKER)
            {
                record.consumption_information =
                    text.replace(CONSUMPTION_MARKER, "").trim().to_string();
            }
        }
    }

    /// `og:image` meta content, falling back to a meta tag named `image`.
    fn extract_image_url(document: &Html) -> Option<String> {
        let og_selector = Selector::parse(r#"meta[property="og:image"]"#).unwrap();
        let name_selector = Selector::parse(r#"meta[name="image"]"#).unwrap();

        document
            .select(&og_selector)
            .next()
            .or_else(|| document.select(&name_selector).next())
            .and_then(|meta| meta.value().attr("content"))
            .map(str::to_string)
    }

    /// Anchors with the download-tracking class or a `data-title` attribute.
    fn extract_documents(document: &Html, base: &Url) -> Vec<DocumentLink> {
        let link_selector = Selector::parse("a[href]").unwrap();

        let mut documents = Vec::new();
        for element in document.select(&link_selector) {
            let has_class = element
                .value()
                .classes()
                .any(|class| class == DOCUMENT_CLASS);
            let data_title = element.value().attr("data-title");
            if !has_class && data_title.is_none() {
                continue;
            }

            let Some(href) = element.value().attr("href") else {
                continue;
            };
            documents.push(DocumentLink {
                title: data_title.unwrap_or("").trim().to_string(),
                url: Self::resolve_rooted(href, base),
            });
        }
        documents
    }

    /// Anchors inside the categories block; label comes from the nested
    /// `catTitle` span. An anchor without that span is skipped.
    fn extract_categories(document: &Html, base: &Url) -> Vec<CategoryLink> {
        let block_selector =
            Selector::parse(&format!("div.{}", CATEGORIES_CLASS)).unwrap();
        let link_selector = Selector::parse("a[href]").unwrap();
        let title_selector = Selector::parse("span.catTitle").unwrap();

        let Some(block) = document.select(&block_selector).next() else {
            return Vec::new();
        };

        let mut categories = Vec::new();
        for anchor in block.select(&link_selector) {
            let Some(title) = anchor.select(&title_selector).next() else {
                continue;
            };
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let label: String = title.text().collect();
            categories.push(CategoryLink {
                category: label.trim().to_string(),
                url: Self::resolve_rooted(href, base),
            });
        }
        categories
    }

    /// Resolve an href against the base origin only when it is root-relative;
    /// anything else is kept verbatim.
    fn resolve_rooted(href: &str, base: &Url) -> String {
        let href = href.trim();
        if href.starts_with('/') {
            base.join(href)
                .map(|resolved| resolved.to_string())
                .unwrap_or_else(|_| href.to_string())
        } else {
            href.to_string()
        }
    }
}
