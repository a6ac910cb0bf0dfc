use std::env;
use std::time::Duration;

use super::env::{
    AnthropicConfig, AppConfig, ConfigError, CrawlerConfig, DirectoryConfig, LoggingConfig,
    NaverConfig, ScanConfig, ServerConfig,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let server = ServerConfig {
            port: parse_or("PORT", 3001)?,
        };

        // API 키 부재는 부팅 실패가 아니라 해당 요청의 500으로 처리한다.
        let anthropic = AnthropicConfig {
            api_key: env::var("ANTHROPIC_API_KEY").ok().filter(|v| !v.is_empty()),
            base_url: env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com".to_string()),
            analysis_model: env::var("ANALYSIS_MODEL")
                .unwrap_or_else(|_| "claude-haiku-4-5-20251001".to_string()),
            chat_model: env::var("CHAT_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string()),
            chat_timeout: Duration::from_millis(parse_or("CHAT_TIMEOUT_MS", 30_000)?),
        };

        let naver = NaverConfig {
            client_id: env::var("NAVER_CLIENT_ID").ok().filter(|v| !v.is_empty()),
            client_secret: env::var("NAVER_CLIENT_SECRET")
                .ok()
                .filter(|v| !v.is_empty()),
            base_url: env::var("NAVER_BASE_URL")
                .unwrap_or_else(|_| "https://openapi.naver.com".to_string()),
        };

        let crawler = CrawlerConfig {
            fetch_timeout: Duration::from_millis(parse_or("WEBPAGE_FETCH_TIMEOUT", 10_000)?),
            content_max_length: parse_or("WEBPAGE_CONTENT_MAX_LENGTH", 8_000)?,
        };

        let scan = ScanConfig {
            batch_delay: Duration::from_millis(parse_or("SCAN_BATCH_DELAY_MS", 1_000)?),
            batch_max_urls: parse_or("SCAN_BATCH_MAX_URLS", 30)?,
            search_delay: Duration::from_millis(parse_or("SEARCH_KEYWORD_DELAY_MS", 100)?),
        };

        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        let timezone = env::var("REPORT_TIMEZONE").unwrap_or_else(|_| "Asia/Seoul".to_string());

        Ok(Self {
            server,
            anthropic,
            naver,
            crawler,
            scan,
            directories,
            logging,
            timezone,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value.parse::<T>().map_err(|_| ConfigError::Invalid(key)),
        Err(_) => Ok(default),
    }
}
