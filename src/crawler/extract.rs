use dom_smoothie::{Config as ReadabilityConfig, Readability, TextMode};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::domain::Platform;

use super::text::{collapse_whitespace, decode_entities, strip_tags};

/// 본문으로 인정할 최소 길이(문자 수). 이보다 짧으면 다음 전략으로 넘어간다.
const MIN_CONTENT_CHARS: usize = 100;

#[derive(Debug, Clone)]
pub struct Extracted {
    pub title: String,
    pub text: String,
}

// 네이버 블로그 본문 컨테이너. 스마트에디터 계열을 먼저, 구 에디터와
// 모바일 뷰 컨테이너를 뒤에 둔다.
static NAVER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"(?is)<div[^>]*class="[^"]*se-main-container[^"]*"[^>]*>(.*?)</div>\s*</div>\s*</div>"#,
        r#"(?is)<div[^>]*class="[^"]*post_ct[^"]*"[^>]*>(.*?)</div>"#,
        r#"(?is)<div[^>]*class="[^"]*se_component_wrap[^"]*"[^>]*>(.*?)</div>"#,
        r#"(?is)<div[^>]*id="postViewArea"[^>]*>(.*?)</div>"#,
        r#"(?is)<div[^>]*id="post-view[^"]*"[^>]*>(.*?)</div>"#,
        r#"(?is)<div[^>]*class="[^"]*sect_dsc[^"]*"[^>]*>(.*?)</div>"#,
        r#"(?is)<div[^>]*class="[^"]*_postView[^"]*"[^>]*>(.*?)</div>"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid naver pattern"))
    .collect()
});

static TISTORY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"(?is)<div[^>]*class="[^"]*article[^"]*"[^>]*>(.*?)</div>"#,
        r#"(?is)<div[^>]*class="[^"]*entry-content[^"]*"[^>]*>(.*?)</div>"#,
        r#"(?is)<div[^>]*class="[^"]*tt_article_useless_p_margin[^"]*"[^>]*>(.*?)</div>"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid tistory pattern"))
    .collect()
});

static OG_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta\s+property="og:title"\s+content="([^"]*)"[^>]*>"#)
        .expect("valid og:title regex")
});
static TITLE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex"));
static OG_DESC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta\s+property="og:description"\s+content="([^"]*)"[^>]*>"#)
        .expect("valid og:description regex")
});
static META_DESC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta\s+name="description"\s+content="([^"]*)"[^>]*>"#)
        .expect("valid meta description regex")
});
static ARTICLE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<article[^>]*>(.*?)</article>").expect("valid article regex"));
static MAIN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<main[^>]*>(.*?)</main>").expect("valid main regex"));
static BODY_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<body[^>]*>(.*?)</body>").expect("valid body regex"));

/// 플랫폼별 전략 사다리를 따라 제목과 본문을 추출한다. 어떤 전략도 길이
/// 기준을 넘지 못하면 `<body>` 전체를 벗겨낸 텍스트가 무조건 반환된다.
pub fn extract(html: &str, url: &str) -> Extracted {
    Extracted {
        title: extract_title(html),
        text: extract_text(html, url),
    }
}

pub fn extract_title(html: &str) -> String {
    if let Some(caps) = OG_TITLE.captures(html) {
        return decode_entities(caps[1].trim());
    }
    match TITLE_TAG.captures(html) {
        Some(caps) => {
            let cleaned: String = caps[1]
                .chars()
                .filter(|ch| !matches!(ch, '\n' | '\r' | '\t'))
                .collect();
            decode_entities(cleaned.trim())
        }
        None => String::new(),
    }
}

pub fn extract_text(html: &str, url: &str) -> String {
    let platform = Platform::detect(url);
    let primary = match platform {
        Platform::NaverBlog => try_patterns(html, &NAVER_PATTERNS),
        Platform::Tistory => try_patterns(html, &TISTORY_PATTERNS),
        _ => readability_text(html, url),
    };
    if let Some(text) = primary {
        return text;
    }

    if let Some(desc) = meta_description(html) {
        if desc.chars().count() > MIN_CONTENT_CHARS {
            return desc;
        }
    }

    for region in [&*ARTICLE_TAG, &*MAIN_TAG] {
        if let Some(caps) = region.captures(html) {
            let text = strip_tags(&caps[1]);
            if text.chars().count() > MIN_CONTENT_CHARS {
                return text;
            }
        }
    }

    // 마지막 수단: body 전체, 길이 무관
    match BODY_TAG.captures(html) {
        Some(caps) => strip_tags(&caps[1]),
        None => strip_tags(html),
    }
}

fn try_patterns(html: &str, patterns: &[Regex]) -> Option<String> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(html) {
            let text = strip_tags(&caps[1]);
            if text.chars().count() > MIN_CONTENT_CHARS {
                return Some(text);
            }
        }
    }
    None
}

/// 전용 컨테이너 패턴이 없는 플랫폼은 readability로 본문 후보를 뽑는다.
fn readability_text(html: &str, url: &str) -> Option<String> {
    let cfg = ReadabilityConfig {
        text_mode: TextMode::Formatted,
        ..Default::default()
    };
    let mut readability = match Readability::new(html, Some(url), Some(cfg)) {
        Ok(reader) => reader,
        Err(err) => {
            debug!(target: "crawler", error = %err, url = %url, "readability init failed");
            return None;
        }
    };
    let article = match readability.parse() {
        Ok(article) => article,
        Err(err) => {
            debug!(target: "crawler", error = %err, url = %url, "readability parse failed");
            return None;
        }
    };
    let text = collapse_whitespace(&article.text_content.to_string());
    (text.chars().count() > MIN_CONTENT_CHARS).then_some(text)
}

fn meta_description(html: &str) -> Option<String> {
    OG_DESC
        .captures(html)
        .or_else(|| META_DESC.captures(html))
        .map(|caps| decode_entities(caps[1].trim()))
}
