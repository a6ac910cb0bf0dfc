pub mod analyzer;
pub mod client;
pub mod prompt;

pub use analyzer::{Analysis, Analyzer};
pub use client::{AiError, AnthropicClient, ChatMessage};
