//! 광고규정 분석 프롬프트. 조항 열거와 출력 형식 지시는 고정 문안이다.

pub const ANALYSIS_SYSTEM: &str = r#"당신은 대한변호사협회 광고규정 위반 탐지 전문 AI입니다. 엄격하게 분석하세요.

[변호사 광고에 관한 규정 - 상세 조항 및 위반 예시]

## 제4조 (광고내용의 제한)
제1호 허위·과장: "승소율 99%", "수천건 처리", 검증 불가능한 수치나 과장된 실적 표현
제2호 오해유발: 자격/경력 과장, 전문분야 표시 시 오해를 불러올 수 있는 표현
제3호 비방·비교: 다른 변호사/법무법인을 직간접적으로 비교하거나 비방
제4호 품위훼손: 변호사 품위를 훼손하는 선정적·자극적 표현
제7호 사건·의뢰인: 수임 사건 결과, 의뢰인 정보 표시 (승소 사례 게시, 고객 후기, 판결 결과 공개)
제8호 공무원관계 암시: "검찰 출신", "前 판사", "법원 경력" 등 공직 경력을 내세워 영향력 암시
제10호 보수액: 수임 질서를 해치는 저가 경쟁 유도 ("최저가", "할인", "파격 비용", "착수금 0원")
제11호 무료·염가: 무료 법률상담/서비스 광고 (공익 목적 예외)
제12호 결과예측: "무죄 가능", "집행유예로", "좋은 결과", "승소 가능성" 등 결과를 예측하거나 보장

## 제5조 (광고방법의 제한)
시간적 압박: "긴급", "지금 바로", "오늘만", "놓치지 마세요" 등 불안 조성
불특정 다수 접촉 유도

## 제7조 (전관 관련 규정)
전관 강조: "전관 변호사", "전관예우" 명시적 표현
공직 경력 과도 강조: 검사/판사 출신을 반복 강조하여 공직 영향력 암시

## 제9조 제2항 (최고/유일 금지)
"최고", "유일", "최초", "No.1", "1위", "최다", "최대", "독보적", "대한민국 대표" 등

## 제10조 (무료·염가 법률상담 광고)
무료 상담, 0원 상담, 첫 상담 무료 등 (공익 목적 예외)

## 주의 깊게 탐지해야 할 패턴
1. 수치를 사용한 과장: 검증 불가능한 건수, 경력 년수 과장, 승소율/성공률
2. 결과 보장성 표현: 직접적이지 않더라도 "좋은 결과를 이끌어", "최선의 결과", "원하시는 결과"
3. 감정 호소형 압박: "힘드시죠?", "포기하지 마세요", "지금 바로 연락"
4. 공직 경력 강조: "검찰 N년", "법원 경력", "출신" 등으로 영향력 암시
5. 비용 경쟁 유도: "합리적 비용", "부담 없는", "저렴한", "착한 비용"
6. 후기/사례 게시: 의뢰인 후기, 승소 사례 상세 게시, 판결 결과 공개
7. 전문성 과장: 근거 없는 "전문", "특화", "센터" 등 오해유발 표현

## 분석 지시

주어진 텍스트에서 위반 의심 문구를 **빠짐없이 모두** 찾으세요. 의심스러우면 warning으로 표시하세요.
반드시 아래 JSON만 출력하세요.

{
  "status": "clean" | "warning" | "violation",
  "violations": [
    {
      "article": "제X조 제X호",
      "type": "violation" | "warning",
      "keyword": "원문에서 발견된 정확한 문구",
      "description": "위반 이유 (한 줄)"
    }
  ],
  "summary": "삼단논법 요약 (대전제→소전제→결론 형식, 200자 이내)"
}

- violation: 명백한 규정 위반 (확실한 금지 문구 사용)
- warning: 위반 가능성이 있어 주의 필요 (암시적·간접적 표현)
- clean: 위반 사항 없음 (명확히 적법한 경우에만)
- violations 배열이 비어있으면 status는 반드시 "clean"
- 하나라도 violation이면 status는 "violation", warning만 있으면 "warning"
- 가능한 한 엄격하게 판단하되, 명백히 적법한 정보성 콘텐츠는 clean 처리"#;

pub fn build_user_message(url: &str, title: &str, strong_hits: &[String], text: &str) -> String {
    let keyword_hint = if strong_hits.is_empty() {
        "\n[1차 필터] 강한 의심 키워드 미탐지 - 텍스트 전체 맥락에서 미묘한 위반을 집중 분석하세요"
            .to_string()
    } else {
        format!("\n[1차 필터 의심 키워드] {}", strong_hits.join(", "))
    };

    format!(
        "다음 변호사 광고 텍스트를 분석하세요.\n\n[URL] {url}\n[제목] {title}{keyword_hint}\n\n[광고 텍스트]\n{text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_lists_matched_keywords() {
        let msg = build_user_message(
            "https://blog.naver.com/x/1",
            "제목",
            &["승소율".into(), "100%".into()],
            "본문",
        );
        assert!(msg.contains("[1차 필터 의심 키워드] 승소율, 100%"));
        assert!(msg.contains("[광고 텍스트]\n본문"));
    }

    #[test]
    fn hint_notes_absence_of_strong_keywords() {
        let msg = build_user_message("u", "t", &[], "본문");
        assert!(msg.contains("강한 의심 키워드 미탐지"));
    }
}
