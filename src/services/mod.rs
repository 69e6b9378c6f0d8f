pub mod catalog;
pub mod ranking;
pub mod recommendations;
pub mod scoring;
pub mod tables;

pub use catalog::{CatalogSource, FallbackCatalog, JsonFileCatalog, StaticCatalog};
pub use ranking::{filter_by_budget, rank};
pub use scoring::{sanitize_keywords, score_by_answers, score_by_keywords};
