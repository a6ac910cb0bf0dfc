//! 변호사 광고규정 1차 필터용 고정 키워드 표.
//!
//! 프로세스 시작 시 한 번 로드되는 불변 데이터로, 런타임에 바뀌지 않는다.
//! 조항별 묶음 순서가 곧 매칭 보고 순서다.

/// 강한 의심 키워드: 하나라도 걸리면 AI 정밀 분석 대상이다.
pub const STRONG_KEYWORDS: &[&str] = &[
    // 제4조 제1호: 허위·과장
    "승소율", "100%", "성공률", "전승", "무패", "승소 보장", "승소보장",
    "99%", "98%", "95%", "90%", "처리율", "해결율", "해결률",
    "수천 건", "수백 건", "수천건", "수백건", "만 건 이상",
    "대한민국 대표", "업계 최고", "압도적", "독보적", "국내 유일",
    "실력파", "탁월한 실력", "놀라운 결과",
    // 제4조 제2호: 오해유발
    "대형 로펌 출신", "대형로펌 출신",
    // 제4조 제7호: 사건·의뢰인 표시
    "의뢰인 후기", "고객 후기", "고객후기", "의뢰인후기",
    "승소 사례", "승소사례", "판결문", "실제 사례", "실제사례",
    "처분 결과", "선고 결과", "선처 사례",
    // 제4조 제8호: 공무원 관계 암시
    "검찰 출신", "검찰출신", "법원 출신", "법원출신",
    "검사 출신", "검사출신", "판사 출신", "판사출신",
    "前 검사", "前 판사", "前검사", "前판사",
    "전직 검사", "전직 판사", "전직검사", "전직판사",
    // 제4조 제10호: 보수액 관련
    "최저가", "할인", "쿠폰", "후불", "환불", "분할납부",
    "착수금 없", "착수금없", "착수금 0", "수익금",
    "견적", "입찰", "비교견적", "파격", "특별 할인", "특별할인",
    "저렴한 비용", "합리적 비용", "착한 비용", "비용 부담 없",
    "수임료 할인", "착수금 할인", "성공보수만", "후불제",
    // 제4조 제11호: 무료·염가
    "무료 상담", "무료상담", "무료 법률상담", "무료법률상담",
    "0원", "공짜", "무료 견적", "무료견적",
    "첫 상담 무료", "첫상담 무료", "이벤트", "프로모션",
    "상담 무료", "무료 전화상담", "무료전화상담",
    // 제4조 제12호: 결과 예측
    "무죄 보장", "승소 확신", "반드시", "100% 해결", "확실한 결과",
    "불기소 보장", "집행유예 보장", "무죄보장", "승소확신",
    "불기소보장", "집행유예보장", "선처 가능", "감형 가능",
    "높은 확률", "거의 확실", "무죄 가능", "기소유예 가능",
    "벌금으로 마무리", "집행유예로", "승소 가능성",
    "좋은 결과", "최선의 결과", "원하시는 결과",
    // 제7조: 전관
    "전관", "전관예우", "전관 변호사", "전관변호사",
    // 제9조 제2항: 최고·유일
    "최고", "유일", "최초", "넘버원", "No.1", "1위",
    "최다", "최대", "선두", "리딩", "베스트",
    "대한민국 1위", "업계 1위", "지역 1위",
    // 제5조: 광고방법
    "긴급", "지금 전화", "한정 상담", "오늘만", "마감 임박",
    "지금 바로", "서두르세요", "놓치지 마세요",
];

/// 변호사 광고 식별 키워드: 이 중 하나라도 있으면 광고로 보고 분석을 돌린다.
pub const LAWYER_AD_INDICATORS: &[&str] = &[
    "변호사", "법무법인", "로펌", "법률사무소", "법률상담",
    "수임", "착수금", "성공보수", "사건 의뢰", "법률 서비스",
    "형사", "민사", "이혼", "상속", "교통사고",
    "음주운전", "성범죄", "마약", "사기", "횡령",
    "손해배상", "산업재해", "의료사고", "재산분할",
    "소송", "재판", "고소", "고발", "변론",
];
