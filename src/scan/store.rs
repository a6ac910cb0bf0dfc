use parking_lot::Mutex;

use crate::domain::ScanResult;

/// 세션 범위 인메모리 결과 목록. 삽입 순서를 유지하고 같은 URL은 먼저
/// 들어온 결과가 이긴다. 재시작하면 비워진다.
#[derive(Default)]
pub struct ResultStore {
    results: Mutex<Vec<ScanResult>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 같은 URL이 없을 때만 추가한다. 추가됐으면 true.
    pub fn insert(&self, result: ScanResult) -> bool {
        let mut results = self.results.lock();
        if results.iter().any(|existing| existing.url == result.url) {
            return false;
        }
        results.push(result);
        true
    }

    pub fn list(&self) -> Vec<ScanResult> {
        self.results.lock().clone()
    }

    pub fn clear(&self) {
        self.results.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.results.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Platform, VerdictStatus};
    use chrono::Utc;

    fn result(id: &str, url: &str) -> ScanResult {
        ScanResult {
            id: id.into(),
            url: url.into(),
            title: "제목".into(),
            source: Platform::Website,
            scanned_at: Utc::now(),
            status: VerdictStatus::Clean,
            violations: vec![],
            raw_text: String::new(),
            analysis_text: String::new(),
            suspect_keywords: vec![],
            api_called: false,
        }
    }

    #[test]
    fn first_occurrence_wins_on_duplicate_url() {
        let store = ResultStore::new();
        assert!(store.insert(result("first", "https://a.com")));
        assert!(!store.insert(result("second", "https://a.com")));

        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "first");
    }

    #[test]
    fn insertion_order_preserved_and_clear_empties() {
        let store = ResultStore::new();
        store.insert(result("1", "https://a.com"));
        store.insert(result("2", "https://b.com"));
        let urls: Vec<String> = store.list().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, vec!["https://a.com", "https://b.com"]);

        store.clear();
        assert!(store.is_empty());
    }
}
