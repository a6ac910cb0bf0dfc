use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    crawler::text::truncate_chars,
    domain::{Finding, Severity, Verdict, VerdictStatus},
    filter, report,
};

use super::{
    client::{AiError, AnthropicClient, ChatMessage},
    prompt,
};

/// 모델에 넘기는 본문 최대 길이(문자). 컨텍스트와 비용 제한.
const ANALYSIS_INPUT_MAX_CHARS: usize = 3_000;
const ANALYSIS_MAX_TOKENS: u32 = 1024;
/// 파싱 실패 시 원문을 요약으로 보존하는 길이.
const DEGRADED_SUMMARY_CHARS: usize = 300;

/// `/api/analyze` 응답의 data 부분이자 스캔 파이프라인의 분석 단계 산출물.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub status: VerdictStatus,
    pub violations: Vec<Finding>,
    pub analysis_text: String,
    pub suspect_keywords: Vec<String>,
    pub api_called: bool,
}

/// 모델 출력 파싱 결과. 실패해도 예외가 아니라 Degraded로 내려 호출자가
/// 항상 쓸 수 있는 판정을 받게 한다.
#[derive(Debug)]
pub enum ModelVerdict {
    Parsed(Verdict),
    Degraded(String),
}

pub fn parse_model_verdict(raw: &str) -> ModelVerdict {
    let stripped = strip_code_fences(raw);
    match serde_json::from_str::<Verdict>(&stripped) {
        Ok(verdict) => ModelVerdict::Parsed(verdict),
        Err(_) => ModelVerdict::Degraded(raw.to_string()),
    }
}

fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// 파싱 실패용 대체 판정: warning + 키워드별 "확인 필요" 항목.
pub fn degraded_verdict(raw: &str, strong_hits: &[String]) -> Verdict {
    let keywords: Vec<String> = if strong_hits.is_empty() {
        vec!["전체 텍스트".to_string()]
    } else {
        strong_hits.to_vec()
    };
    Verdict {
        status: VerdictStatus::Warning,
        violations: keywords
            .into_iter()
            .map(|keyword| Finding {
                article: "확인 필요".to_string(),
                severity: Severity::Warning,
                keyword,
                description: "AI 분석 결과를 파싱하지 못했습니다. 수동 확인이 필요합니다."
                    .to_string(),
            })
            .collect(),
        summary: Some(truncate_chars(raw, DEGRADED_SUMMARY_CHARS)),
    }
}

/// 변호사 광고로 식별되지 않아 분석을 건너뛴 경우의 고정 결과.
fn skipped_clean() -> Analysis {
    Analysis {
        status: VerdictStatus::Clean,
        violations: vec![],
        analysis_text: "📜 [대전제] 변호사 광고에 관한 규정은 허위·과장·결과예측 등을 금지합니다.\n\
             📌 [소전제] 이 페이지는 변호사 광고로 식별되지 않았습니다.\n\
             ⚖️ [결론] ✅ 변호사 광고 비해당. 분석 대상 아님."
            .to_string(),
        suspect_keywords: vec![],
        api_called: false,
    }
}

pub struct Analyzer {
    client: Arc<AnthropicClient>,
}

impl Analyzer {
    pub fn new(client: Arc<AnthropicClient>) -> Self {
        Self { client }
    }

    /// 1차 필터 → (단락 또는) AI 정밀 분석. 모델 출력이 JSON이 아니어도
    /// 실패하지 않고 degraded 판정으로 내려간다.
    pub async fn analyze(&self, text: &str, url: &str, title: &str) -> Result<Analysis, AiError> {
        if !self.client.has_key() {
            return Err(AiError::MissingKey);
        }

        let outcome = filter::pre_filter(text);
        if outcome.strong_hits.is_empty() && !outcome.is_lawyer_ad {
            info!(target: "ai", url = %url, "변호사 광고 비해당, AI 분석 생략");
            return Ok(skipped_clean());
        }

        let truncated = truncate_chars(text, ANALYSIS_INPUT_MAX_CHARS);
        let user_message =
            prompt::build_user_message(url, title, &outcome.strong_hits, &truncated);
        let response = self
            .client
            .messages(
                self.client.analysis_model(),
                ANALYSIS_MAX_TOKENS,
                prompt::ANALYSIS_SYSTEM,
                &[ChatMessage {
                    role: "user".to_string(),
                    content: user_message,
                }],
            )
            .await?;

        let raw = response.joined_text();
        let verdict = match parse_model_verdict(&raw) {
            ModelVerdict::Parsed(verdict) => verdict,
            ModelVerdict::Degraded(raw) => {
                warn!(target: "ai", url = %url, "모델 응답 JSON 파싱 실패, 수동 확인 판정으로 대체");
                degraded_verdict(&raw, &outcome.strong_hits)
            }
        };

        let analysis_text = report::syllogism(&verdict, url, title);
        Ok(Analysis {
            status: verdict.status,
            violations: verdict.violations,
            analysis_text,
            suspect_keywords: outcome.strong_hits,
            api_called: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnthropicConfig;
    use reqwest::Client;
    use std::time::Duration;

    const VERDICT_JSON: &str = r#"{
        "status": "violation",
        "violations": [
            {"article": "제4조 제1호", "type": "violation", "keyword": "승소율 100%", "description": "허위·과장"}
        ],
        "summary": "허위·과장 광고"
    }"#;

    #[test]
    fn fenced_json_parses_identically_to_unfenced() {
        let fenced = format!("```json\n{VERDICT_JSON}\n```");
        let (plain, from_fence) = match (parse_model_verdict(VERDICT_JSON), parse_model_verdict(&fenced)) {
            (ModelVerdict::Parsed(a), ModelVerdict::Parsed(b)) => (a, b),
            other => panic!("expected both parsed, got {other:?}"),
        };
        assert_eq!(plain.status, from_fence.status);
        assert_eq!(plain.violations.len(), from_fence.violations.len());
        assert_eq!(plain.violations[0].keyword, from_fence.violations[0].keyword);
    }

    #[test]
    fn upstream_status_is_trusted_even_if_inconsistent() {
        // 상태와 위반 목록이 모순돼도 상태 필드를 그대로 믿는다
        let raw = r#"{"status": "clean", "violations": [
            {"article": "제7조", "type": "warning", "keyword": "전관", "description": "전관 표현"}
        ]}"#;
        match parse_model_verdict(raw) {
            ModelVerdict::Parsed(verdict) => {
                assert_eq!(verdict.status, VerdictStatus::Clean);
                assert_eq!(verdict.violations.len(), 1);
            }
            other => panic!("expected parsed, got {other:?}"),
        }
    }

    #[test]
    fn non_json_output_degrades_to_manual_review() {
        let raw = "죄송하지만 JSON으로 답변드리기 어렵습니다.";
        let ModelVerdict::Degraded(text) = parse_model_verdict(raw) else {
            panic!("expected degraded");
        };
        let verdict = degraded_verdict(&text, &["승소율".into(), "100%".into()]);
        assert_eq!(verdict.status, VerdictStatus::Warning);
        assert_eq!(verdict.violations.len(), 2);
        assert!(verdict.violations.iter().all(|f| f.article == "확인 필요"));
        assert_eq!(verdict.summary.as_deref(), Some(raw));
    }

    #[test]
    fn degraded_without_hits_uses_placeholder_finding() {
        let verdict = degraded_verdict("not json", &[]);
        assert_eq!(verdict.violations.len(), 1);
        assert_eq!(verdict.violations[0].keyword, "전체 텍스트");
    }

    fn offline_analyzer() -> Analyzer {
        // 닫힌 포트를 가리키는 클라이언트: 업스트림 호출이 일어나면 테스트가
        // 네트워크 오류로 실패한다
        let config = AnthropicConfig {
            api_key: Some("test-key".into()),
            base_url: "http://127.0.0.1:9".into(),
            analysis_model: "m".into(),
            chat_model: "m".into(),
            chat_timeout: Duration::from_secs(30),
        };
        Analyzer::new(Arc::new(AnthropicClient::new(Client::new(), config)))
    }

    #[tokio::test]
    async fn irrelevant_text_short_circuits_without_upstream_call() {
        let analyzer = offline_analyzer();
        let analysis = analyzer
            .analyze(
                "오늘 날씨가 맑아서 공원에 산책을 다녀왔다.",
                "https://example.com",
                "일상 글",
            )
            .await
            .unwrap();
        assert_eq!(analysis.status, VerdictStatus::Clean);
        assert!(analysis.violations.is_empty());
        assert!(!analysis.api_called);
        assert!(analysis.analysis_text.contains("변호사 광고 비해당"));
    }

    #[tokio::test]
    async fn missing_key_checked_before_pre_filter() {
        let config = AnthropicConfig {
            api_key: None,
            base_url: "http://127.0.0.1:9".into(),
            analysis_model: "m".into(),
            chat_model: "m".into(),
            chat_timeout: Duration::from_secs(30),
        };
        let analyzer = Analyzer::new(Arc::new(AnthropicClient::new(Client::new(), config)));
        let err = analyzer.analyze("아무 글", "u", "t").await.unwrap_err();
        assert!(matches!(err, AiError::MissingKey));
    }
}
