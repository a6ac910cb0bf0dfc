use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use reqwest::Client;
use tracing::info;

use crate::{
    ai::{Analyzer, AnthropicClient},
    api,
    config::AppConfig,
    crawler::PageFetcher,
    infrastructure::shutdown::ShutdownListener,
    scan::{ResultStore, Scanner},
    search::NaverClient,
};

/// 모든 핸들러가 공유하는 애플리케이션 상태. 요청 간 가변 상태는
/// 세션 결과 저장소 하나뿐이다.
pub struct AppState {
    pub fetcher: Arc<PageFetcher>,
    pub analyzer: Arc<Analyzer>,
    pub ai: Arc<AnthropicClient>,
    pub naver: Arc<NaverClient>,
    pub scanner: Arc<Scanner>,
    pub store: Arc<ResultStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let config = Arc::new(config);

        let http = Client::builder()
            .user_agent(format!("adwatch/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let fetcher = Arc::new(PageFetcher::new(http.clone(), config.crawler.clone()));
        let ai = Arc::new(AnthropicClient::new(http.clone(), config.anthropic.clone()));
        let analyzer = Arc::new(Analyzer::new(ai.clone()));
        let naver = Arc::new(NaverClient::new(
            http,
            config.naver.clone(),
            config.scan.search_delay,
        ));
        let scanner = Arc::new(Scanner::new(
            fetcher.clone(),
            analyzer.clone(),
            config.scan.clone(),
        ));

        Ok(Self {
            fetcher,
            analyzer,
            ai,
            naver,
            scanner,
            store: Arc::new(ResultStore::new()),
            config,
        })
    }
}

pub async fn serve(state: AppState, mut shutdown: ShutdownListener) -> Result<()> {
    let port = state.config.server.port;
    let app = api::router(Arc::new(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(target: "server", %addr, "광고규정 모니터링 서버 시작");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.notified().await;
            info!(target: "server", "종료 신호 감지 (CTRL+C / SIGTERM)");
        })
        .await?;

    info!(target: "server", "서버 종료 완료");
    Ok(())
}
