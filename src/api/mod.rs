pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::app::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    // 채팅 위젯이 다른 오리진에서 호출하므로 프리플라이트까지 전부 허용
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/crawl", post(handlers::crawl))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/scan", post(handlers::scan))
        .route("/api/scan-batch", post(handlers::scan_batch))
        .route("/api/search", post(handlers::search))
        .route("/api/auto-scan", post(handlers::auto_scan))
        .route(
            "/api/results",
            get(handlers::list_results).delete(handlers::clear_results),
        )
        .route("/api/results/csv", get(handlers::results_csv))
        .route("/api/results/report", get(handlers::results_report))
        .route("/api/chat", post(handlers::chat))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
