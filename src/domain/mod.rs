pub mod types;

pub use types::{
    DiscoveredItem, ExtractedPage, Finding, Platform, PreFilterOutcome, ScanResult, SearchItem,
    Severity, Verdict, VerdictStatus,
};
