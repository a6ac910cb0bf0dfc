use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{ai::AiError, crawler::CrawlError, scan::ScanError, search::SearchError};

/// 스캐너 계열 엔드포인트의 오류 → `{success:false, error}` 본문.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Crawl(#[from] CrawlError),
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }
}

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::Crawl(inner) => ApiError::Crawl(inner),
            ScanError::Analyze(inner) => ApiError::Ai(inner),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Crawl(err @ (CrawlError::InvalidUrl(_) | CrawlError::PageLoad(_))) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::Crawl(err) => {
                tracing::error!(target: "server", error = %err, "크롤링 실패");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Ai(AiError::Upstream { status }) => {
                tracing::error!(target: "server", status, "AI 업스트림 오류");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("AI 분석 오류 ({status})"),
                )
            }
            ApiError::Ai(err) => {
                tracing::error!(target: "server", error = %err, "AI 분석 실패");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Search(err @ SearchError::MissingCredentials) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Search(err @ SearchError::Upstream { .. }) => {
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            ApiError::Search(err) => {
                tracing::error!(target: "server", error = %err, "검색 실패");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

/// 채팅 프록시는 기존 클라이언트와의 호환을 위해 `{error}` 본문을 쓴다.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),
    #[error("ANTHROPIC_API_KEY가 설정되지 않았습니다.")]
    MissingKey,
    #[error("AI 서비스 오류 ({0})")]
    Upstream(u16),
    #[error("AI 응답 시간 초과")]
    Timeout,
    #[error("서버 내부 오류가 발생했습니다.")]
    Internal,
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = match &self {
            ChatError::Validation(_) => StatusCode::BAD_REQUEST,
            ChatError::MissingKey | ChatError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            // 업스트림 상태 코드를 그대로 전달한다
            ChatError::Upstream(code) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ChatError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
