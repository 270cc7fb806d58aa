pub mod catalog;
pub mod directory;
pub mod fairness;
pub mod ranking;

pub use catalog::{CatalogProvider, InMemoryCatalog};
pub use directory::DirectorySearch;
pub use fairness::QuerySeed;
pub use ranking::{RankingConfig, RankingEngine};
