// Tests for pipeline helpers and report rendering

use catscrape_core::pipeline::{generate_scrape_report, product_slug};
use catscrape_scraper::record::{CategoryLink, DocumentLink, ProductRecord};

// ============================================================================
// Product Slug Tests
// ============================================================================

#[test]
fn test_product_slug_simple() {
    let url = "https://example.com/en/products/item/penecrete";
    assert_eq!(product_slug(url), "penecrete");
}

#[test]
fn test_product_slug_trailing_slash() {
    let url = "https://example.com/en/products/item/penecrete/";
    assert_eq!(product_slug(url), "penecrete");
}

#[test]
fn test_product_slug_with_query() {
    let url = "https://example.com/en/products/item/penecrete?lang=en";
    assert_eq!(product_slug(url), "penecrete");
}

#[test]
fn test_product_slug_root() {
    assert_eq!(product_slug("https://example.com/"), "/");
    assert_eq!(product_slug("https://example.com"), "/");
}

#[test]
fn test_product_slug_invalid_url() {
    let url = "not a valid url";
    assert_eq!(product_slug(url), url);
}

#[test]
fn test_product_slug_with_port() {
    let url = "http://127.0.0.1:8080/en/products/item/admix";
    assert_eq!(product_slug(url), "admix");
}

// ============================================================================
// Report Tests
// ============================================================================

fn record(url: &str, description: &str, documents: usize) -> ProductRecord {
    ProductRecord {
        url: url.to_string(),
        detailed_description: description.to_string(),
        consumption_information: String::new(),
        image_url: None,
        documents: (0..documents)
            .map(|i| DocumentLink {
                title: format!("doc {}", i),
                url: format!("{}/doc-{}.pdf", url, i),
            })
            .collect(),
        categories: vec![CategoryLink {
            category: "Sealants".to_string(),
            url: "https://example.com/en/products/category/sealants".to_string(),
        }],
    }
}

#[test]
fn test_report_counts() {
    let records = vec![
        record("https://example.com/en/products/item/one", "desc", 2),
        record("https://example.com/en/products/item/two", "", 1),
    ];

    let report = generate_scrape_report(&records);

    assert!(report.contains("Products scraped: 2"));
    assert!(report.contains("Total documents: 3"));
    assert!(report.contains("Total category tags: 2"));
    assert!(report.contains("With image: 0"));
}

#[test]
fn test_report_lists_product_slugs() {
    let records = vec![record(
        "https://example.com/en/products/item/penebar",
        "desc",
        0,
    )];

    let report = generate_scrape_report(&records);
    assert!(report.contains("penebar"));
    assert!(report.contains("0 docs, 1 categories"));
}

#[test]
fn test_report_empty_run() {
    let report = generate_scrape_report(&[]);
    assert!(report.contains("Products scraped: 0"));
}
