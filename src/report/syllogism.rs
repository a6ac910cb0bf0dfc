use crate::domain::{Verdict, VerdictStatus};

/// 판정을 삼단논법(대전제/소전제/결론) 보고문으로 렌더링한다.
/// 위반 항목 순서는 분류기가 준 순서 그대로다.
pub fn syllogism(verdict: &Verdict, url: &str, title: &str) -> String {
    let label = match verdict.status {
        VerdictStatus::Violation => "❌ 위반",
        VerdictStatus::Warning => "⚠️ 주의",
        VerdictStatus::Clean => "✅ 적법",
    };

    let mut report = format!("🔍 판단: {label}\n📄 대상: {title}\n🔗 {url}\n\n");

    for finding in &verdict.violations {
        report.push_str("━━━━━━━━━━━━━━━━━━━\n");
        report.push_str(&format!("📜 [대전제] {}\n", finding.article));
        report.push_str(&format!("📌 [소전제] 탐지 문구: \"{}\"\n", finding.keyword));
        report.push_str(&format!("⚖️ [결론] {}\n\n", finding.description));
    }

    if let Some(summary) = &verdict.summary {
        report.push_str("━━━━━━━━━━━━━━━━━━━\n");
        report.push_str(&format!("💡 종합: {summary}\n"));
    }

    report.push_str("\n⚠️ 참고용 AI 분석입니다. 최종 판단은 변호사에게 확인하세요.");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Finding, Severity};

    #[test]
    fn renders_finding_blocks_in_order() {
        let verdict = Verdict {
            status: VerdictStatus::Violation,
            violations: vec![
                Finding {
                    article: "제4조 제1호".into(),
                    severity: Severity::Violation,
                    keyword: "승소율 100%".into(),
                    description: "검증 불가능한 수치".into(),
                },
                Finding {
                    article: "제9조 제2항".into(),
                    severity: Severity::Warning,
                    keyword: "업계 최고".into(),
                    description: "최고·유일 표현".into(),
                },
            ],
            summary: Some("허위·과장 광고로 판단됨".into()),
        };

        let text = syllogism(&verdict, "https://blog.naver.com/x/1", "이혼 전문");
        assert!(text.starts_with("🔍 판단: ❌ 위반"));
        let first = text.find("제4조 제1호").unwrap();
        let second = text.find("제9조 제2항").unwrap();
        assert!(first < second);
        assert!(text.contains("💡 종합: 허위·과장 광고로 판단됨"));
        assert!(text.ends_with("최종 판단은 변호사에게 확인하세요."));
    }

    #[test]
    fn clean_verdict_has_no_finding_blocks() {
        let verdict = Verdict {
            status: VerdictStatus::Clean,
            violations: vec![],
            summary: None,
        };
        let text = syllogism(&verdict, "https://example.com", "일반 글");
        assert!(text.contains("✅ 적법"));
        assert!(!text.contains("[대전제]"));
    }
}
