pub mod env;
mod loader;

pub use env::{
    AnthropicConfig, AppConfig, CrawlerConfig, NaverConfig, ScanConfig, ServerConfig,
};
pub use loader::load_config;
