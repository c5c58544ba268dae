//! Observability service

pub mod scrapeconfig;

pub use scrapeconfig::ScrapeConfigResource;
