use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A quote in the app's canonical shape
///
/// `length` is captured when the quote is formatted and never recomputed.
/// `id` is unique per fetch, not per quote text: fetching the same words
/// twice gives two different ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub text: String,
    pub author: String,
    pub category: String,
    pub length: usize,
}

/// A quote the user starred
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteQuote {
    #[serde(flatten)]
    pub quote: Quote,
    /// Epoch millis, set once on insertion
    pub favorited_at: i64,
}

/// A quote the user looked at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub quote: Quote,
    /// Epoch millis of the latest view
    pub viewed_at: i64,
}

/// Usage counters, accumulated across sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub total_quotes_viewed: u64,
    /// category -> view count
    pub favorite_categories: HashMap<String, u64>,
    /// author -> view count
    pub favorite_authors: HashMap<String, u64>,
    pub sessions_count: u64,
}

impl Stats {
    /// Most viewed categories, busiest first, ties broken alphabetically
    pub fn top_categories(&self, n: usize) -> Vec<(String, u64)> {
        top_n(&self.favorite_categories, n)
    }

    pub fn top_authors(&self, n: usize) -> Vec<(String, u64)> {
        top_n(&self.favorite_authors, n)
    }
}

fn top_n(counts: &HashMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    let mut sorted: Vec<(String, u64)> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted.truncate(n);
    sorted
}

/// Display theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a persisted value; accepts the bare word or a JSON string
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().trim_matches('"').to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
