pub mod collector;
pub mod error;
pub mod extractor;
pub mod record;

pub use collector::LinkCollector;
pub use error::ScrapeError;
pub use extractor::DetailExtractor;
pub use record::ProductRecord;
