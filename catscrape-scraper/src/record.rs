use serde::{Deserialize, Serialize};

/// A document attachment on a product page (datasheet, certificate, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLink {
    pub title: String,
    pub url: String,
}

/// A category tag the product is filed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryLink {
    pub category: String,
    pub url: String,
}

/// Everything extracted from a single product page.
///
/// Missing fields are empty strings / `None` / empty vecs, never errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub url: String,
    pub detailed_description: String,
    pub consumption_information: String,
    pub image_url: Option<String>,
    pub documents: Vec<DocumentLink>,
    pub categories: Vec<CategoryLink>,
}

impl ProductRecord {
    pub fn new(url: String) -> Self {
        Self {
            url,
            detailed_description: String::new(),
            consumption_information: String::new(),
            image_url: None,
            documents: Vec::new(),
            categories: Vec::new(),
        }
    }
}
