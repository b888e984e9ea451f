use catscrape_scraper::record::{CategoryLink, DocumentLink, ProductRecord};
use rusqlite::{Connection, Result, params};
use std::fs;
use std::path::Path;

pub struct Database {
    conn: Connection,
}

fn to_sql_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn from_sql_json<T: serde::de::DeserializeOwned>(column: usize, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

impl Database {
    pub fn drop(path: &Path) {
        fs::remove_file(path).unwrap();
    }

    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            ",
        )?;

        let db = Database { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT,
                detailed_description TEXT,
                consumption_information TEXT,
                image_url TEXT,
                documents TEXT,   -- JSON array of {title, url}
                categories TEXT   -- JSON array of {category, url}
            );
            ",
        )?;
        Ok(())
    }

    /// Insert one record as a new row. No upsert: re-running a scrape appends.
    pub fn insert_product(&self, record: &ProductRecord) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO products (
                url, detailed_description, consumption_information, image_url,
                documents, categories
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                &record.url,
                &record.detailed_description,
                &record.consumption_information,
                &record.image_url,
                to_sql_json(&record.documents)?,
                to_sql_json(&record.categories)?,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a batch of records in input order. Returns rows written.
    pub fn insert_products(&self, records: &[ProductRecord]) -> Result<usize> {
        for record in records {
            self.insert_product(record)?;
        }
        Ok(records.len())
    }

    /// Read every stored record back, in insertion order.
    pub fn all_products(&self) -> Result<Vec<ProductRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT url, detailed_description, consumption_information, image_url,
                    documents, categories
             FROM products ORDER BY id",
        )?;

        let products = stmt
            .query_map([], |row| {
                let documents: Vec<DocumentLink> =
                    from_sql_json(4, &row.get::<_, String>(4)?)?;
                let categories: Vec<CategoryLink> =
                    from_sql_json(5, &row.get::<_, String>(5)?)?;
                Ok(ProductRecord {
                    url: row.get(0)?,
                    detailed_description: row.get(1)?,
                    consumption_information: row.get(2)?,
                    image_url: row.get(3)?,
                    documents,
                    categories,
                })
            })?
            .collect::<Result<Vec<_>>>()?;

        Ok(products)
    }

    pub fn product_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
    }

    pub fn get_connection(&self) -> &Connection {
        &self.conn
    }
}
