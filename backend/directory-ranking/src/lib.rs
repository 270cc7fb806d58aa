pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use models::{BusinessCandidate, CatalogQuery};
pub use services::{
    CatalogProvider, DirectorySearch, InMemoryCatalog, QuerySeed, RankingConfig, RankingEngine,
};
