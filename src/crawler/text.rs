use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_STRIP: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)<script.*?</script>",
        r"(?is)<style.*?</style>",
        r"(?is)<nav.*?</nav>",
        r"(?is)<header.*?</header>",
        r"(?is)<footer.*?</footer>",
        r"(?s)<!--.*?-->",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid block strip regex"))
    .collect()
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static HEX_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#x([0-9a-fA-F]+);").expect("valid hex entity regex"));
static DEC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(\d+);").expect("valid dec entity regex"));

/// 스크립트/스타일/내비게이션 등 본문 외 영역을 먼저 제거한 뒤 모든 태그를
/// 벗겨내고 엔티티를 디코딩한다. 공백 연속은 한 칸으로 정리된다.
pub fn strip_tags(html: &str) -> String {
    let mut cleaned = html.to_string();
    for re in BLOCK_STRIP.iter() {
        cleaned = re.replace_all(&cleaned, " ").into_owned();
    }
    cleaned = TAG.replace_all(&cleaned, " ").into_owned();
    cleaned = decode_entities(&cleaned);
    collapse_whitespace(&cleaned)
}

pub fn decode_entities(input: &str) -> String {
    let mut s = input
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");
    s = HEX_ENTITY
        .replace_all(&s, |caps: &regex::Captures| {
            u32::from_str_radix(&caps[1], 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_default()
        })
        .into_owned();
    DEC_ENTITY
        .replace_all(&s, |caps: &regex::Captures| {
            caps[1]
                .parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_default()
        })
        .into_owned()
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// 검색 결과 제목/설명에 섞여 오는 `<b>` 등 마크업만 제거한다.
pub fn strip_markup(text: &str) -> String {
    TAG.replace_all(text, "").into_owned()
}

/// 문자 수 기준 절단. 한글 본문을 바이트로 자르면 문자 경계가 깨진다.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
