use reqwest::{header, Client, StatusCode};
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::{config::CrawlerConfig, domain::ExtractedPage};

use super::{extract, text::truncate_chars};

/// 모바일 크롬 UA. 네이버 모바일 페이지는 서버 렌더링이라 스크립트 실행 없이
/// 본문을 읽을 수 있다.
const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 13; SM-G991B) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";

/// 이 길이 미만이면 추출 실패로 보고 안내 문구로 대체한다. 요청 자체는
/// 성공으로 처리해 후속 분석이 계속 돌 수 있게 한다.
const MIN_EXTRACTED_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("유효하지 않은 URL입니다: {0}")]
    InvalidUrl(String),
    #[error("페이지 로드 실패 ({0})")]
    PageLoad(u16),
    #[error("크롤링 오류: {0}")]
    Network(#[from] reqwest::Error),
}

pub struct PageFetcher {
    client: Client,
    config: CrawlerConfig,
}

impl PageFetcher {
    pub fn new(client: Client, config: CrawlerConfig) -> Self {
        Self { client, config }
    }

    pub async fn crawl(&self, raw_url: &str) -> Result<ExtractedPage, CrawlError> {
        match Url::parse(raw_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => return Err(CrawlError::InvalidUrl(raw_url.to_string())),
        }

        let fetch_url = to_mobile_url(raw_url);
        let response = self
            .client
            .get(&fetch_url)
            .timeout(self.config.fetch_timeout)
            .header(header::USER_AGENT, MOBILE_USER_AGENT)
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .header(header::ACCEPT_LANGUAGE, "ko-KR,ko;q=0.9")
            .send()
            .await?;

        let status: StatusCode = response.status();
        if !status.is_success() {
            return Err(CrawlError::PageLoad(status.as_u16()));
        }

        let html = response.text().await?;
        let extracted = extract::extract(&html, &fetch_url);

        let title = if extracted.title.is_empty() {
            "제목 없음".to_string()
        } else {
            extracted.title
        };

        let char_count = extracted.text.chars().count();
        let text = if char_count < MIN_EXTRACTED_CHARS {
            format!("[크롤링 제한] 본문 추출 실패 ({char_count}자). 원본 URL: {raw_url}")
        } else {
            truncate_chars(&extracted.text, self.config.content_max_length)
        };

        info!(
            target: "crawler",
            url = %raw_url,
            chars = char_count,
            "페이지 본문 추출 완료"
        );

        Ok(ExtractedPage {
            title,
            text,
            url: raw_url.to_string(),
        })
    }
}

/// 네이버 블로그 데스크톱 URL을 모바일 변형으로 바꾼다. 그 외는 그대로.
pub fn to_mobile_url(url: &str) -> String {
    if url.contains("blog.naver.com") && !url.contains("m.blog.naver.com") {
        return url.replace("blog.naver.com", "m.blog.naver.com");
    }
    url.to_string()
}
