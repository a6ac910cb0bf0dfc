use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub anthropic: AnthropicConfig,
    pub naver: NaverConfig,
    pub crawler: CrawlerConfig,
    pub scan: ScanConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
    pub timezone: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub analysis_model: String,
    pub chat_model: String,
    pub chat_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct NaverConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    pub fetch_timeout: Duration,
    pub content_max_length: usize,
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub batch_delay: Duration,
    pub batch_max_urls: usize,
    pub search_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {0}")]
    Invalid(&'static str),
}
