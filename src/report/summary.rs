use chrono::Utc;
use chrono_tz::Tz;

use crate::domain::{ScanResult, Severity, VerdictStatus};

/// 세션의 스캔 결과 전체를 묶은 종합 보고서 본문.
pub fn summary_text(keyword: &str, results: &[ScanResult], timezone: &str) -> String {
    let tz: Tz = timezone.parse().unwrap_or(chrono_tz::Asia::Seoul);
    let generated_at = Utc::now().with_timezone(&tz).format("%Y-%m-%d %H:%M:%S");

    let violations = count_status(results, VerdictStatus::Violation);
    let warnings = count_status(results, VerdictStatus::Warning);
    let cleans = count_status(results, VerdictStatus::Clean);

    let mut out = String::from("═══ 변호사 광고규정 위반 스캔 보고서 ═══\n\n");
    out.push_str(&format!("생성 일시: {generated_at}\n"));
    if !keyword.is_empty() {
        out.push_str(&format!("검색 키워드: {keyword}\n"));
    }
    out.push('\n');
    out.push_str(&format!("총 스캔: {}건\n", results.len()));
    out.push_str(&format!(
        "위반: {violations}건 / 주의: {warnings}건 / 적법: {cleans}건\n\n"
    ));

    for (index, result) in results.iter().enumerate() {
        let emoji = match result.status {
            VerdictStatus::Violation => "❌",
            VerdictStatus::Warning => "⚠️",
            VerdictStatus::Clean => "✅",
        };
        out.push_str(&format!(
            "[{}] {emoji} {} | {}\n    {}\n",
            index + 1,
            result.status.label(),
            result.title,
            result.url
        ));
        for finding in &result.violations {
            let severity = match finding.severity {
                Severity::Violation => "위반",
                Severity::Warning => "주의",
            };
            out.push_str(&format!(
                "    - {} ({severity}): \"{}\" / {}\n",
                finding.article, finding.keyword, finding.description
            ));
        }
        out.push('\n');
    }

    out.push_str("⚠️ 본 보고서는 참고용 AI 분석 결과입니다. 최종 판단은 변호사에게 확인하세요.\n");
    out
}

fn count_status(results: &[ScanResult], status: VerdictStatus) -> usize {
    results.iter().filter(|r| r.status == status).count()
}
