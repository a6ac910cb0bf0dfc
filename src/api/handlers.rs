use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tokio::time::timeout;
use tracing::info;

use crate::{ai::AiError, app::AppState, report};

use super::{
    dto::{
        AnalyzeRequest, ApiResponse, AutoScanData, AutoScanRequest, ChatRequest, ChatResponse,
        CrawlRequest, ReportQuery, ScanBatchRequest, ScanRequest, SearchRequest,
    },
    error::{ApiError, ChatError},
};

const MAX_CHAT_MESSAGES: usize = 50;
const MAX_CHAT_MESSAGE_CHARS: usize = 5_000;
const CHAT_MAX_TOKENS: u32 = 4_096;
const DEFAULT_SEARCH_RESULTS: usize = 10;

const MALFORMED_BODY: &str = "잘못된 요청 형식입니다.";

pub async fn health() -> &'static str {
    "OK"
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|_| ApiError::validation(MALFORMED_BODY))
}

pub async fn crawl(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CrawlRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = parse_body(payload)?;
    if req.url.is_empty() {
        return Err(ApiError::validation("URL이 필요합니다."));
    }
    let page = state.fetcher.crawl(&req.url).await?;
    Ok(Json(ApiResponse::ok(page)))
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = parse_body(payload)?;
    if req.text.is_empty() {
        return Err(ApiError::validation("분석할 텍스트가 필요합니다."));
    }
    let analysis = state.analyzer.analyze(&req.text, &req.url, &req.title).await?;
    Ok(Json(ApiResponse::ok(analysis)))
}

/// 크롤링+분석 원스톱. 파이프라인 단계 실패는 200에 `{success:false, error}`로
/// 내려간다(기존 클라이언트가 이 형태를 기대한다).
pub async fn scan(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = parse_body(payload)?;
    if req.url.is_empty() {
        return Err(ApiError::validation("URL이 필요합니다."));
    }
    match state.scanner.scan_one(&req.url).await {
        Ok(result) => {
            state.store.insert(result.clone());
            Ok(Json(json!({ "success": true, "data": result })))
        }
        Err(err) => Ok(Json(json!({ "success": false, "error": err.to_string() }))),
    }
}

pub async fn scan_batch(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScanBatchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = parse_body(payload)?;
    if req.urls.is_empty() {
        return Err(ApiError::validation("스캔할 URL 배열이 필요합니다."));
    }
    info!(target: "server", total = req.urls.len(), "일괄 스캔 시작");
    let results = state.scanner.scan_batch(&req.urls).await;
    for result in &results {
        state.store.insert(result.clone());
    }
    Ok(Json(ApiResponse::ok(results)))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = parse_body(payload)?;
    if req.keyword.is_empty() {
        return Err(ApiError::validation("검색 키워드가 필요합니다."));
    }

    // 검색 키 부재는 오류가 아니라 빈 결과 + 안내로 낮춘다
    if !state.naver.has_credentials() {
        return Ok(Json(ApiResponse::ok_with_message(
            Vec::<crate::domain::SearchItem>::new(),
            "네이버 API 키가 설정되지 않았습니다. \
             환경변수에 NAVER_CLIENT_ID, NAVER_CLIENT_SECRET을 설정하세요. \
             또는 URL 직접 입력 모드를 사용하세요.",
        )));
    }

    let items = state
        .naver
        .search_blogs(&req.keyword, req.max_results.unwrap_or(DEFAULT_SEARCH_RESULTS))
        .await?;
    Ok(Json(ApiResponse::ok(items)))
}

pub async fn auto_scan(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AutoScanRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = parse_body(payload)?;
    if req.keywords.is_empty() {
        return Err(ApiError::validation("검색 키워드 배열이 필요합니다."));
    }
    let discovery = state
        .naver
        .discover(
            &req.keywords,
            req.max_results_per_keyword.unwrap_or(DEFAULT_SEARCH_RESULTS),
        )
        .await?;
    Ok(Json(ApiResponse::ok(AutoScanData {
        total_found: discovery.total_found,
        keywords: discovery.keywords,
        items: discovery.items,
    })))
}

pub async fn list_results(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.store.list()))
}

pub async fn clear_results(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.store.clear();
    Json(json!({ "success": true }))
}

pub async fn results_csv(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = report::csv(&state.store.list());
    ([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body)
}

pub async fn results_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    let body = report::summary_text(&query.keyword, &state.store.list(), &state.config.timezone);
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}

/// 규정 챗봇용 무상태 프록시. 대화 이력은 요청에 실려 오고 서버에는 남지
/// 않는다.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ChatError> {
    let req = payload
        .map(|Json(body)| body)
        .map_err(|_| ChatError::Validation(MALFORMED_BODY.to_string()))?;

    if req.messages.is_empty() {
        return Err(ChatError::Validation("messages 배열이 필요합니다.".into()));
    }
    if req.messages.len() > MAX_CHAT_MESSAGES {
        return Err(ChatError::Validation(format!(
            "메시지는 최대 {MAX_CHAT_MESSAGES}개까지 허용됩니다."
        )));
    }
    if req
        .messages
        .iter()
        .any(|msg| msg.content.chars().count() > MAX_CHAT_MESSAGE_CHARS)
    {
        return Err(ChatError::Validation(format!(
            "메시지 길이는 {MAX_CHAT_MESSAGE_CHARS}자를 초과할 수 없습니다."
        )));
    }
    if !state.ai.has_key() {
        return Err(ChatError::MissingKey);
    }

    let call = state.ai.messages(
        state.ai.chat_model(),
        CHAT_MAX_TOKENS,
        req.system.as_deref().unwrap_or(""),
        &req.messages,
    );
    let response = match timeout(state.ai.chat_timeout(), call).await {
        Ok(Ok(response)) => response,
        Ok(Err(AiError::MissingKey)) => return Err(ChatError::MissingKey),
        Ok(Err(AiError::Upstream { status })) => return Err(ChatError::Upstream(status)),
        Ok(Err(AiError::Network(err))) => {
            tracing::error!(target: "server", error = %err, "채팅 업스트림 호출 실패");
            return Err(ChatError::Internal);
        }
        Err(_) => return Err(ChatError::Timeout),
    };

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Json(ChatResponse {
            content: response.joined_text(),
            usage: response.usage,
        }),
    ))
}
