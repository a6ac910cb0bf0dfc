use std::collections::HashSet;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tokio::time::sleep;
use tracing::warn;

use crate::{
    config::NaverConfig,
    crawler::text::strip_markup,
    domain::{DiscoveredItem, SearchItem},
};

/// 자동 스캔 한 번에 처리하는 키워드 상한.
const MAX_KEYWORDS: usize = 20;
const MAX_PER_KEYWORD: usize = 30;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(
        "네이버 API 키가 설정되지 않았습니다. 환경변수에 NAVER_CLIENT_ID, NAVER_CLIENT_SECRET을 설정하세요."
    )]
    MissingCredentials,
    #[error("네이버 검색 오류 ({status})")]
    Upstream { status: u16 },
    #[error("검색 요청 실패: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct NaverBlogResponse {
    #[serde(default)]
    items: Vec<NaverBlogItem>,
}

#[derive(Debug, Deserialize)]
struct NaverBlogItem {
    title: String,
    link: String,
    description: String,
}

#[derive(Debug, Clone)]
pub struct Discovery {
    pub total_found: usize,
    pub keywords: Vec<String>,
    pub items: Vec<DiscoveredItem>,
}

pub struct NaverClient {
    http: Client,
    config: NaverConfig,
    keyword_delay: Duration,
}

impl NaverClient {
    pub fn new(http: Client, config: NaverConfig, keyword_delay: Duration) -> Self {
        Self {
            http,
            config,
            keyword_delay,
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.config.client_id.is_some() && self.config.client_secret.is_some()
    }

    /// 블로그 검색. 키워드에는 항상 "변호사"를 덧붙여 광고성 결과로 좁힌다.
    pub async fn search_blogs(
        &self,
        keyword: &str,
        display: usize,
    ) -> Result<Vec<SearchItem>, SearchError> {
        let (client_id, client_secret) = match (&self.config.client_id, &self.config.client_secret)
        {
            (Some(id), Some(secret)) => (id, secret),
            _ => return Err(SearchError::MissingCredentials),
        };

        let query = format!("{keyword} 변호사");
        let url = format!("{}/v1/search/blog.json", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("query", query.as_str()),
                ("display", &display.to_string()),
                ("sort", "date"),
            ])
            .header("X-Naver-Client-Id", client_id)
            .header("X-Naver-Client-Secret", client_secret)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Upstream {
                status: status.as_u16(),
            });
        }

        let data: NaverBlogResponse = response.json().await?;
        Ok(data
            .items
            .into_iter()
            .map(|item| SearchItem {
                title: strip_markup(&item.title),
                link: item.link,
                description: strip_markup(&item.description),
            })
            .collect())
    }

    /// 여러 키워드를 순차 검색해 URL 중복을 제거한 목록을 만든다.
    /// 키워드 하나의 실패는 로그만 남기고 전체를 중단하지 않는다.
    pub async fn discover(
        &self,
        keywords: &[String],
        per_keyword: usize,
    ) -> Result<Discovery, SearchError> {
        if !self.has_credentials() {
            return Err(SearchError::MissingCredentials);
        }

        let limited: Vec<String> = keywords.iter().take(MAX_KEYWORDS).cloned().collect();
        let per_keyword = per_keyword.min(MAX_PER_KEYWORD);

        let mut items: Vec<DiscoveredItem> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (index, keyword) in limited.iter().enumerate() {
            match self.search_blogs(keyword, per_keyword).await {
                Ok(found) => {
                    for item in found {
                        let normalized = item.link.trim_end_matches('/').to_string();
                        if seen.insert(normalized) {
                            items.push(DiscoveredItem {
                                title: item.title,
                                link: item.link,
                                description: item.description,
                                keyword: keyword.clone(),
                            });
                        }
                    }
                }
                Err(err) => {
                    warn!(target: "search", keyword = %keyword, error = %err, "키워드 검색 실패");
                }
            }

            // 네이버 rate limit 대응
            if index + 1 < limited.len() {
                sleep(self.keyword_delay).await;
            }
        }

        Ok(Discovery {
            total_found: items.len(),
            keywords: limited,
            items,
        })
    }
}
