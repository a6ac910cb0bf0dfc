pub mod extract;
pub mod fetcher;
pub mod text;

pub use fetcher::{CrawlError, PageFetcher};
