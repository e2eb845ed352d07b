//! Sitemap-level configuration consumed by the collector.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Priority applied to items before menu defaults or overrides resolve.
pub const DEFAULT_PRIORITY: f32 = 0.5;

/// How often a page is expected to change, as published in sitemap output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl std::fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only configuration for one sitemap build.
///
/// Loaded fresh by the caller for every build; the collector never writes
/// back into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapConfig {
    /// Identity of the sitemap; scopes menu and settings lookups.
    pub id: String,
    /// Site base; relative item links resolve against it.
    pub base_url: Url,
    /// Language tag the item sources filter on; `None` disables filtering.
    #[serde(default)]
    pub language: Option<String>,
    /// Keep items whose links point off-site. When off, external items are
    /// still collected and emitted, but flagged ignored.
    #[serde(default)]
    pub show_external_links: bool,
    /// Age limit in days for news entries.
    #[serde(default = "default_news_date_limit")]
    pub news_date_limit: u32,
}

fn default_news_date_limit() -> u32 {
    2
}

impl SitemapConfig {
    pub fn new(id: impl Into<String>, base_url: Url) -> Self {
        Self {
            id: id.into(),
            base_url,
            language: None,
            show_external_links: false,
            news_date_limit: default_news_date_limit(),
        }
    }

    /// Oldest publication date still admissible for news entries.
    pub fn news_cutoff(&self) -> DateTime<Utc> {
        Utc::now() - Duration::days(i64::from(self.news_date_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changefreq_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ChangeFreq::Weekly).unwrap(),
            "\"weekly\""
        );
        let parsed: ChangeFreq = serde_json::from_str("\"hourly\"").unwrap();
        assert_eq!(parsed, ChangeFreq::Hourly);
    }

    #[test]
    fn test_config_defaults() {
        let json = r#"{"id": "2", "base_url": "https://example.com/"}"#;
        let config: SitemapConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.id, "2");
        assert!(!config.show_external_links);
        assert_eq!(config.news_date_limit, 2);
        assert!(config.language.is_none());
    }

    #[test]
    fn test_news_cutoff_respects_limit() {
        let mut config =
            SitemapConfig::new("1", Url::parse("https://example.com/").unwrap());
        config.news_date_limit = 7;
        let cutoff = config.news_cutoff();
        assert!(cutoff < Utc::now() - Duration::days(6));
        assert!(cutoff > Utc::now() - Duration::days(8));
    }
}
