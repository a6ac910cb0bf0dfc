use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    ai::{AiError, Analyzer},
    config::ScanConfig,
    crawler::{text::truncate_chars, CrawlError, PageFetcher},
    domain::{Platform, ScanResult},
};

/// 결과에 보관하는 원문 미리보기 길이.
const RAW_SNIPPET_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Crawl(#[from] CrawlError),
    #[error(transparent)]
    Analyze(#[from] AiError),
}

/// 크롤링 → 1차 필터/AI 분석 → 결과 조립 파이프라인.
pub struct Scanner {
    fetcher: Arc<PageFetcher>,
    analyzer: Arc<Analyzer>,
    config: ScanConfig,
}

impl Scanner {
    pub fn new(fetcher: Arc<PageFetcher>, analyzer: Arc<Analyzer>, config: ScanConfig) -> Self {
        Self {
            fetcher,
            analyzer,
            config,
        }
    }

    pub async fn scan_one(&self, url: &str) -> Result<ScanResult, ScanError> {
        let page = self.fetcher.crawl(url).await?;
        let analysis = self.analyzer.analyze(&page.text, url, &page.title).await?;

        Ok(ScanResult {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            title: page.title,
            source: Platform::detect(url),
            scanned_at: Utc::now(),
            status: analysis.status,
            violations: analysis.violations,
            raw_text: truncate_chars(&page.text, RAW_SNIPPET_CHARS),
            analysis_text: analysis.analysis_text,
            suspect_keywords: analysis.suspect_keywords,
            api_called: analysis.api_called,
        })
    }

    /// URL 목록을 순차 스캔한다. 업스트림 rate limit 때문에 병렬화하지 않고
    /// 호출 사이에 고정 지연을 둔다. 개별 실패는 로그만 남기고 건너뛴다.
    pub async fn scan_batch(&self, urls: &[String]) -> Vec<ScanResult> {
        let limited = &urls[..urls.len().min(self.config.batch_max_urls)];
        let mut results = Vec::with_capacity(limited.len());

        for (index, url) in limited.iter().enumerate() {
            match self.scan_one(url).await {
                Ok(result) => {
                    info!(
                        target: "scan",
                        url = %url,
                        status = result.status.label(),
                        api_called = result.api_called,
                        "스캔 완료"
                    );
                    results.push(result);
                }
                Err(err) => {
                    error!(target: "scan", url = %url, error = %err, "스캔 실패, 건너뜀");
                }
            }
            if index + 1 < limited.len() {
                sleep(self.config.batch_delay).await;
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ai::AnthropicClient,
        config::{AnthropicConfig, CrawlerConfig},
        domain::VerdictStatus,
        report,
    };
    use axum::{http::StatusCode, routing::get, routing::post, Json, Router};
    use reqwest::Client;
    use serde_json::json;
    use std::time::Duration;

    const PLAIN_PAGE: &str = r#"<html><head><title>일상 블로그</title></head><body><article>
        오늘은 공원에 다녀왔습니다. 날씨가 맑아서 산책하기 좋았고 커피도 한 잔 마셨습니다.
        사진을 여러 장 찍었는데 나무와 하늘이 잘 어울려서 마음에 들었습니다.
        다음 주에는 미술관에 가 볼 생각입니다. 좋은 하루였습니다.
    </article></body></html>"#;

    const AD_PAGE: &str = r#"<html><head><title>형사 전문</title></head><body><article>
        형사 사건 전문 변호사가 직접 상담합니다. 승소율 100% 보장을 약속드리며
        수많은 사건을 처리한 경험으로 최선의 결과를 만들어 드립니다.
        지금 바로 전화 주시면 무료 상담을 받으실 수 있습니다.
    </article></body></html>"#;

    async fn spawn_content_server() -> String {
        let app = Router::new()
            .route("/ok1", get(|| async { axum::response::Html(PLAIN_PAGE) }))
            .route(
                "/bad",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "down") }),
            )
            .route("/ok2", get(|| async { axum::response::Html(PLAIN_PAGE) }))
            .route("/ad", get(|| async { axum::response::Html(AD_PAGE) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn spawn_violation_model() -> String {
        let app = Router::new().route(
            "/v1/messages",
            post(|| async {
                let verdict = json!({
                    "status": "violation",
                    "violations": [{
                        "article": "제4조 제1호",
                        "type": "violation",
                        "keyword": "승소율 100% 보장",
                        "description": "검증 불가능한 승소율 보장 표현"
                    }],
                    "summary": "허위·과장 광고"
                });
                Json(json!({
                    "content": [{"type": "text", "text": verdict.to_string()}],
                    "usage": {"input_tokens": 10, "output_tokens": 10}
                }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn scanner(anthropic_base: String) -> Scanner {
        let http = Client::new();
        let fetcher = Arc::new(PageFetcher::new(
            http.clone(),
            CrawlerConfig {
                fetch_timeout: Duration::from_secs(5),
                content_max_length: 8_000,
            },
        ));
        let analyzer = Arc::new(Analyzer::new(Arc::new(AnthropicClient::new(
            http,
            AnthropicConfig {
                api_key: Some("test-key".into()),
                base_url: anthropic_base,
                analysis_model: "m".into(),
                chat_model: "m".into(),
                chat_timeout: Duration::from_secs(30),
            },
        ))));
        Scanner::new(
            fetcher,
            analyzer,
            ScanConfig {
                batch_delay: Duration::from_millis(0),
                batch_max_urls: 30,
                search_delay: Duration::from_millis(0),
            },
        )
    }

    #[tokio::test]
    async fn batch_skips_failed_url_and_returns_partial_results() {
        let content = spawn_content_server().await;
        // 일상 글은 1차 필터에서 단락되므로 모델 서버가 필요 없다
        let scanner = scanner("http://127.0.0.1:9".into());

        let urls = vec![
            format!("{content}/ok1"),
            format!("{content}/bad"),
            format!("{content}/ok2"),
        ];
        let results = scanner.scan_batch(&urls).await;

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.status == VerdictStatus::Clean));
        assert!(results.iter().all(|r| !r.api_called));
        assert_eq!(results[0].url, urls[0]);
        assert_eq!(results[1].url, urls[2]);
    }

    #[tokio::test]
    async fn guarantee_phrase_triggers_model_and_yields_violation() {
        let content = spawn_content_server().await;
        let model = spawn_violation_model().await;
        let scanner = scanner(model);

        let url = format!("{content}/ad");
        let result = scanner.scan_one(&url).await.unwrap();

        assert_eq!(result.status, VerdictStatus::Violation);
        assert!(result.api_called);
        assert!(result
            .suspect_keywords
            .contains(&"승소율".to_string()));
        assert!(result
            .suspect_keywords
            .contains(&"100%".to_string()));

        // CSV에는 위반 한 건이 정확히 한 행으로 나온다
        let csv = report::csv(std::slice::from_ref(&result));
        let data_rows: Vec<&str> = csv
            .trim_end()
            .lines()
            .skip(1)
            .filter(|line| line.contains(&url))
            .collect();
        assert_eq!(data_rows.len(), 1);
        assert!(data_rows[0].contains("승소율 100% 보장"));
    }

    #[tokio::test]
    async fn batch_input_capped_at_configured_maximum() {
        let content = spawn_content_server().await;
        let http = Client::new();
        let fetcher = Arc::new(PageFetcher::new(
            http.clone(),
            CrawlerConfig {
                fetch_timeout: Duration::from_secs(5),
                content_max_length: 8_000,
            },
        ));
        let analyzer = Arc::new(Analyzer::new(Arc::new(AnthropicClient::new(
            http,
            AnthropicConfig {
                api_key: Some("test-key".into()),
                base_url: "http://127.0.0.1:9".into(),
                analysis_model: "m".into(),
                chat_model: "m".into(),
                chat_timeout: Duration::from_secs(30),
            },
        ))));
        let scanner = Scanner::new(
            fetcher,
            analyzer,
            ScanConfig {
                batch_delay: Duration::from_millis(0),
                batch_max_urls: 2,
                search_delay: Duration::from_millis(0),
            },
        );

        let urls = vec![
            format!("{content}/ok1"),
            format!("{content}/ok2"),
            format!("{content}/ok1"),
        ];
        let results = scanner.scan_batch(&urls).await;
        assert_eq!(results.len(), 2);
    }
}
