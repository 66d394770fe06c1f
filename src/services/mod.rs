//! Data services
//!
//! - Catalog loading and page queries
//! - Background page fetching

pub mod catalog;
pub mod page_fetcher;

pub use catalog::{GalaxyCatalog, GalaxyPage};
pub use page_fetcher::PageFetcher;
