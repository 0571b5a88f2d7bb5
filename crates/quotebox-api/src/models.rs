use serde::{Deserialize, Serialize};

/// Category used whenever a source doesn't tell us one
pub const DEFAULT_CATEGORY: &str = "general";

/// Quote as the primary API (API Ninjas) returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NinjaQuote {
    pub quote: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Quote as the fallback API (Quotable) returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotableQuote {
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A quote in whichever shape its source produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawQuote {
    Native(NinjaQuote),
    Fallback(QuotableQuote),
}

impl RawQuote {
    /// Adapt either shape into the primary API's shape
    ///
    /// Fallback quotes take their first tag as the category, or
    /// `"general"` when they have no tags.
    pub fn into_native(self) -> NinjaQuote {
        match self {
            RawQuote::Native(quote) => quote,
            RawQuote::Fallback(fb) => NinjaQuote {
                category: Some(
                    fb.tags
                        .into_iter()
                        .find(|t| !t.is_empty())
                        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                ),
                quote: fb.content,
                author: fb.author,
            },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RawQuote::Fallback(_))
    }
}

impl From<NinjaQuote> for RawQuote {
    fn from(quote: NinjaQuote) -> Self {
        RawQuote::Native(quote)
    }
}

impl From<QuotableQuote> for RawQuote {
    fn from(quote: QuotableQuote) -> Self {
        RawQuote::Fallback(quote)
    }
}
