pub mod keywords;

use crate::domain::PreFilterOutcome;

use keywords::{LAWYER_AD_INDICATORS, STRONG_KEYWORDS};

/// 1차 키워드 필터. 비용 절감용 게이트일 뿐 분류기가 아니다. 강한 키워드와
/// 광고 지표가 모두 비면 오케스트레이터가 AI 호출 없이 clean으로 단락한다.
pub fn pre_filter(text: &str) -> PreFilterOutcome {
    let lower = text.to_lowercase();

    let strong_hits = STRONG_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(&kw.to_lowercase()))
        .map(|kw| kw.to_string())
        .collect();

    let is_lawyer_ad = LAWYER_AD_INDICATORS
        .iter()
        .any(|kw| lower.contains(&kw.to_lowercase()));

    PreFilterOutcome {
        strong_hits,
        is_lawyer_ad,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_both_keywords_in_guarantee_phrase() {
        let outcome = pre_filter("승소율 100% 보장");
        assert!(outcome.strong_hits.contains(&"승소율".to_string()));
        assert!(outcome.strong_hits.contains(&"100%".to_string()));
    }

    #[test]
    fn unrelated_text_matches_nothing() {
        let outcome = pre_filter("오늘 날씨가 맑아서 공원에 산책을 다녀왔다.");
        assert!(outcome.strong_hits.is_empty());
        assert!(!outcome.is_lawyer_ad);
    }

    #[test]
    fn ad_indicator_without_strong_keyword() {
        let outcome = pre_filter("이혼 전문 변호사가 상담해 드립니다.");
        assert!(outcome.is_lawyer_ad);
    }

    #[test]
    fn match_is_case_insensitive() {
        let outcome = pre_filter("업계 no.1 로펌");
        assert!(outcome.strong_hits.contains(&"No.1".to_string()));
        assert!(outcome.is_lawyer_ad);
    }

    #[test]
    fn hits_preserve_table_order() {
        // "무료상담"(제11호)이 본문에서 먼저 나와도 표 순서상 앞선
        // "승소율"(제1호)이 먼저 보고된다.
        let outcome = pre_filter("무료상담 가능, 승소율 공개");
        let first_strong = outcome.strong_hits.first().unwrap();
        assert_eq!(first_strong, "승소율");
    }
}
