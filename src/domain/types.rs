use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 스캔 대상 URL이 속한 플랫폼. 추출 전략 선택과 결과 라벨링에만 쓰인다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    NaverBlog,
    Tistory,
    Youtube,
    Brunch,
    Website,
}

impl Platform {
    pub fn detect(url: &str) -> Self {
        if url.contains("blog.naver.com") {
            Platform::NaverBlog
        } else if url.contains("tistory.com") {
            Platform::Tistory
        } else if url.contains("youtube.com") || url.contains("youtu.be") {
            Platform::Youtube
        } else if url.contains("brunch.co.kr") {
            Platform::Brunch
        } else {
            Platform::Website
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::NaverBlog => "naver_blog",
            Platform::Tistory => "tistory",
            Platform::Youtube => "youtube",
            Platform::Brunch => "brunch",
            Platform::Website => "website",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Clean,
    Warning,
    Violation,
}

impl VerdictStatus {
    /// 위반 목록에서 상태를 유도한다. 비어 있으면 clean, violation이 하나라도
    /// 있으면 violation, 나머지는 warning.
    pub fn derive(findings: &[Finding]) -> Self {
        if findings.is_empty() {
            VerdictStatus::Clean
        } else if findings.iter().any(|f| f.severity == Severity::Violation) {
            VerdictStatus::Violation
        } else {
            VerdictStatus::Warning
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VerdictStatus::Clean => "적법",
            VerdictStatus::Warning => "주의",
            VerdictStatus::Violation => "위반",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Violation,
    Warning,
}

/// 탐지된 위반 사항 한 건. `type` 필드명은 기존 API 응답과 동일하게 유지한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub article: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub keyword: String,
    pub description: String,
}

/// 분류기(원격 모델 또는 1차 필터 단락)가 내린 판정.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    #[serde(default)]
    pub violations: Vec<Finding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// 크롤링된 페이지 본문.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedPage {
    pub title: String,
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct PreFilterOutcome {
    pub strong_hits: Vec<String>,
    pub is_lawyer_ad: bool,
}

/// 스캔 한 건의 최종 결과. 생성 후 변경되지 않는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub id: String,
    pub url: String,
    pub title: String,
    pub source: Platform,
    pub scanned_at: DateTime<Utc>,
    pub status: VerdictStatus,
    pub violations: Vec<Finding>,
    pub raw_text: String,
    pub analysis_text: String,
    pub suspect_keywords: Vec<String>,
    pub api_called: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    pub title: String,
    pub link: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub keyword: String,
}
