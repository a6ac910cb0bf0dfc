use crate::domain::{ScanResult, Severity};

const HEADER: &str = "URL,제목,플랫폼,스캔일시,판정,조항,유형,탐지 문구,설명";

/// 스캔 결과를 CSV로 렌더링한다. 위반 한 건당 한 행, 위반이 없는 결과는
/// 자리표시 행 한 개. 엑셀 호환을 위해 BOM을 앞에 붙인다.
pub fn csv(results: &[ScanResult]) -> String {
    let mut out = String::from("\u{feff}");
    out.push_str(HEADER);
    out.push('\n');

    for result in results {
        let base = [
            escape(&result.url),
            escape(&result.title),
            escape(result.source.as_str()),
            escape(&result.scanned_at.to_rfc3339()),
            escape(result.status.label()),
        ]
        .join(",");

        if result.violations.is_empty() {
            out.push_str(&format!("{base},-,-,-,위반 사항 없음\n"));
            continue;
        }

        for finding in &result.violations {
            let severity = match finding.severity {
                Severity::Violation => "violation",
                Severity::Warning => "warning",
            };
            out.push_str(&format!(
                "{base},{},{severity},{},{}\n",
                escape(&finding.article),
                escape(&finding.keyword),
                escape(&finding.description),
            ));
        }
    }

    out
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Finding, Platform, VerdictStatus};
    use chrono::Utc;

    fn sample(violations: Vec<Finding>) -> ScanResult {
        ScanResult {
            id: "t-1".into(),
            url: "https://blog.naver.com/x/1".into(),
            title: "제목".into(),
            source: Platform::NaverBlog,
            scanned_at: Utc::now(),
            status: VerdictStatus::derive(&violations),
            violations,
            raw_text: String::new(),
            analysis_text: String::new(),
            suspect_keywords: vec![],
            api_called: true,
        }
    }

    #[test]
    fn one_row_per_finding_plus_header() {
        let result = sample(vec![
            Finding {
                article: "제4조 제1호".into(),
                severity: Severity::Violation,
                keyword: "승소율 100%".into(),
                description: "허위·과장".into(),
            },
            Finding {
                article: "제4조 제11호".into(),
                severity: Severity::Warning,
                keyword: "무료 상담".into(),
                description: "무료·염가".into(),
            },
        ]);
        let out = csv(&[result]);
        assert!(out.starts_with('\u{feff}'));
        let lines: Vec<&str> = out.trim_end().lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("violation"));
        assert!(lines[2].contains("warning"));
    }

    #[test]
    fn clean_result_gets_placeholder_row() {
        let out = csv(&[sample(vec![])]);
        let lines: Vec<&str> = out.trim_end().lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("위반 사항 없음"));
    }

    #[test]
    fn fields_with_separators_are_quoted_and_doubled() {
        let mut result = sample(vec![Finding {
            article: "제4조".into(),
            severity: Severity::Violation,
            keyword: "\"최고\", 유일".into(),
            description: "줄바꿈\n포함".into(),
        }]);
        result.title = "제목, 쉼표".into();
        let out = csv(&[result]);
        assert!(out.contains(r#""제목, 쉼표""#));
        assert!(out.contains(r#""""최고"", 유일""#));
        assert!(out.contains("\"줄바꿈\n포함\""));
    }

    // 표준 파서 규칙(RFC 4180)대로 다시 읽었을 때 원본 필드가 복원되는지 확인.
    #[test]
    fn quoted_fields_round_trip() {
        let keyword = "쉼표, 그리고 \"따옴표\"";
        let result = sample(vec![Finding {
            article: "제4조".into(),
            severity: Severity::Violation,
            keyword: keyword.into(),
            description: "설명".into(),
        }]);
        let out = csv(&[result]);
        let data_line = out.trim_end().lines().nth(1).unwrap();
        let fields = parse_csv_line(data_line);
        assert_eq!(fields[7], keyword);
    }

    fn parse_csv_line(line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut chars = line.chars().peekable();
        let mut in_quotes = false;
        while let Some(ch) = chars.next() {
            match ch {
                '"' if in_quotes => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '"' => in_quotes = true,
                ',' if !in_quotes => {
                    fields.push(std::mem::take(&mut field));
                }
                other => field.push(other),
            }
        }
        fields.push(field);
        fields
    }
}
