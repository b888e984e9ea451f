// Tests for database functionality

use catscrape_core::data::Database;
use catscrape_scraper::record::{CategoryLink, DocumentLink, ProductRecord};
use tempfile::TempDir;

fn create_test_db() -> (TempDir, Database) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).unwrap();
    (temp_dir, db)
}

fn sample_record(n: usize) -> ProductRecord {
    ProductRecord {
        url: format!("https://catalogue.example/en/products/item/product-{}", n),
        detailed_description: format!("Description of product {}", n),
        consumption_information: "0.8 kg/m2 in two coats".to_string(),
        image_url: Some(format!("https://catalogue.example/img/{}.jpg", n)),
        documents: vec![
            DocumentLink {
                title: "Technical datasheet".to_string(),
                url: format!("https://catalogue.example/documents/tds-{}.pdf", n),
            },
            DocumentLink {
                title: "Safety datasheet".to_string(),
                url: format!("https://catalogue.example/documents/sds-{}.pdf", n),
            },
        ],
        categories: vec![CategoryLink {
            category: "Sealants".to_string(),
            url: "https://catalogue.example/en/products/category/sealants".to_string(),
        }],
    }
}

// ============================================================================
// Database Creation Tests
// ============================================================================

#[test]
fn test_database_creation() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let db = Database::new(&db_path);
    assert!(db.is_ok());
    assert!(db_path.exists());
}

#[test]
fn test_database_exists() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    assert!(!Database::exists(&db_path));

    let _db = Database::new(&db_path).unwrap();
    assert!(Database::exists(&db_path));
}

#[test]
fn test_database_drop() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let _db = Database::new(&db_path).unwrap();
    assert!(Database::exists(&db_path));

    Database::drop(&db_path);
    assert!(!Database::exists(&db_path));
}

// ============================================================================
// Insert Tests
// ============================================================================

#[test]
fn test_insert_product() {
    let (_temp_dir, db) = create_test_db();

    let row_id = db.insert_product(&sample_record(1)).unwrap();
    assert!(row_id > 0);
    assert_eq!(db.product_count().unwrap(), 1);
}

#[test]
fn test_insert_products_preserves_input_order() {
    let (_temp_dir, db) = create_test_db();

    let records: Vec<ProductRecord> = (1..=5).map(sample_record).collect();
    let written = db.insert_products(&records).unwrap();
    assert_eq!(written, 5);

    let stored = db.all_products().unwrap();
    let urls: Vec<&str> = stored.iter().map(|r| r.url.as_str()).collect();
    let expected: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, expected);
}

#[test]
fn test_rerun_appends_duplicate_rows() {
    let (_temp_dir, db) = create_test_db();

    let records = vec![sample_record(1)];
    db.insert_products(&records).unwrap();
    db.insert_products(&records).unwrap();

    // No upsert at this layer: same record twice means two rows.
    assert_eq!(db.product_count().unwrap(), 2);
}

#[test]
fn test_insert_record_with_absent_fields() {
    let (_temp_dir, db) = create_test_db();

    let record = ProductRecord::new(
        "https://catalogue.example/en/products/item/sparse".to_string(),
    );
    db.insert_product(&record).unwrap();

    let stored = db.all_products().unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].image_url.is_none());
    assert!(stored[0].documents.is_empty());
    assert!(stored[0].categories.is_empty());
}

// ============================================================================
// Round-Trip Tests
// ============================================================================

#[test]
fn test_round_trip_preserves_nested_sequences() {
    let (_temp_dir, db) = create_test_db();

    let records: Vec<ProductRecord> = (1..=3).map(sample_record).collect();
    db.insert_products(&records).unwrap();

    let stored = db.all_products().unwrap();
    assert_eq!(stored.len(), records.len());
    for (original, read_back) in records.iter().zip(stored.iter()) {
        assert_eq!(original, read_back);
    }
}

#[test]
fn test_round_trip_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let records: Vec<ProductRecord> = (1..=2).map(sample_record).collect();
    {
        let db = Database::new(&db_path).unwrap();
        db.insert_products(&records).unwrap();
    }

    let db = Database::new(&db_path).unwrap();
    assert_eq!(db.all_products().unwrap(), records);
}
