use regex::Regex;
use std::sync::OnceLock;

/// User-agent substrings of the search engine and link-preview crawlers that
/// get locale-qualified content without redirects.
pub const CRAWLER_PATTERNS: &[&str] = &[
    "googlebot",
    "bingbot",
    "yandex",
    "baiduspider",
    "facebookexternalhit",
    "twitterbot",
    "linkedinbot",
    "whatsapp",
    "slackbot",
];

static CRAWLER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Case-insensitive alternation over a pattern table.
pub fn build_crawler_regex(patterns: &[&str]) -> Result<Regex, regex::Error> {
    let alternation = patterns
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!("(?i)(?:{})", alternation))
}

/// Whether a user agent belongs to a known crawler.
///
/// A missing user agent is passed as `""` and is never a crawler.
pub fn is_crawler(user_agent: &str) -> bool {
    CRAWLER_REGEX
        .get_or_init(|| {
            build_crawler_regex(CRAWLER_PATTERNS).expect("crawler patterns are escaped literals")
        })
        .is_match(user_agent)
}
