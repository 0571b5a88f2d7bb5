// Text helpers for sharing quotes. Opening browsers and clipboards is the
// caller's business; this only builds the strings.
use quotebox_api::ApiError;

use crate::models::Quote;

/// Social network share targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    Twitter,
    Facebook,
    LinkedIn,
}

impl ShareTarget {
    pub fn all() -> [ShareTarget; 3] {
        [ShareTarget::Twitter, ShareTarget::Facebook, ShareTarget::LinkedIn]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShareTarget::Twitter => "twitter",
            ShareTarget::Facebook => "facebook",
            ShareTarget::LinkedIn => "linkedin",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "twitter" | "x" => Some(ShareTarget::Twitter),
            "facebook" => Some(ShareTarget::Facebook),
            "linkedin" => Some(ShareTarget::LinkedIn),
            _ => None,
        }
    }
}

/// One-line form: `"text" — author`
pub fn share_text(quote: &Quote) -> String {
    format!("\"{}\" — {}", quote.text, quote.author)
}

/// Multi-line form used for copying
pub fn format_for_sharing(quote: &Quote) -> String {
    format!(
        "\"{}\"\n\n— {}\n\nCategory: {}",
        quote.text, quote.author, quote.category
    )
}

/// Intent URL that pre-fills a post on `target`
///
/// `page_url` is the link attached to the post (Facebook and LinkedIn need one).
pub fn share_url(target: ShareTarget, quote: &Quote, page_url: &str) -> String {
    let text = urlencoding::encode(&share_text(quote)).into_owned();
    let page = urlencoding::encode(page_url).into_owned();

    match target {
        ShareTarget::Twitter => format!("https://twitter.com/intent/tweet?text={}", text),
        ShareTarget::Facebook => format!(
            "https://www.facebook.com/sharer/sharer.php?u={}&quote={}",
            page, text
        ),
        ShareTarget::LinkedIn => format!(
            "https://www.linkedin.com/sharing/share-offsite/?url={}&summary={}",
            page, text
        ),
    }
}

/// File name for a rendered quote card, e.g. `quote-Maya-Angelou.png`
///
/// Every whitespace run becomes one `-`, leading and trailing runs included.
pub fn image_file_name(quote: &Quote) -> String {
    let mut author = String::with_capacity(quote.author.len());
    let mut in_space = false;

    for c in quote.author.chars() {
        if c.is_whitespace() {
            if !in_space {
                author.push('-');
            }
            in_space = true;
        } else {
            author.push(c);
            in_space = false;
        }
    }

    format!("quote-{}.png", author)
}

/// Short message fit to show a user instead of a raw error
pub fn friendly_message(err: &ApiError) -> String {
    if err.is_network() {
        "Network error. Please check your internet connection.".to_string()
    } else if err.is_http() {
        "Server error. Please try again later.".to_string()
    } else {
        err.to_string()
    }
}
