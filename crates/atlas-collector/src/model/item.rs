//! Finished sitemap entries as handed to the sink.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

use super::config::{ChangeFreq, SitemapConfig, DEFAULT_PRIORITY};
use super::menu::Menu;
use super::record::{NewsInfo, RawRecord};

/// One collected sitemap entry.
///
/// Built from a raw record plus the owning sitemap and (for menu rows) the
/// originating menu, then decorated by preparers, settings resolution, and
/// duplicate bookkeeping on its way through the submit path. Treat it as
/// immutable once it reaches the sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Stable identity used for deduplication, independent of the URL.
    pub uid: String,
    pub title: String,
    /// Absolute link; resolved against the sitemap base for internal rows.
    pub full_link: String,
    /// Hex SHA-256 of `full_link`; combines with `uid` in settings keys.
    pub full_link_hash: String,
    pub language: Option<String>,
    /// Traversal depth at the moment of emission.
    pub level: u32,
    pub changefreq: ChangeFreq,
    /// Crawl priority in `[0, 1]`.
    pub priority: f32,
    pub published: bool,
    pub ignore: bool,
    pub duplicate: bool,
    /// Points at in-system content rather than an off-site URL.
    pub is_internal: bool,
    pub is_menu_item: bool,
    pub source_type: String,
    pub home: bool,
    pub visible_for_robots: bool,
    pub parent_visible_for_robots: bool,
    /// Preparers may clear these to hide an entry from one output kind
    /// without ignoring it outright.
    pub visible_for_xml: bool,
    pub visible_for_html: bool,
    /// Menu the row came from; `None` for supplier-provided items.
    pub menutype: Option<String>,
    pub news: Option<NewsInfo>,
}

impl Item {
    pub fn new(record: RawRecord, sitemap: &SitemapConfig, menu: Option<&Menu>) -> Self {
        let (full_link, is_internal) = resolve_link(&record, sitemap);
        let full_link_hash = if full_link.is_empty() {
            String::new()
        } else {
            link_hash(&full_link)
        };

        Self {
            uid: record.uid,
            title: record.title,
            full_link,
            full_link_hash,
            language: record.language,
            level: 0,
            changefreq: record.changefreq.unwrap_or_default(),
            priority: record.priority.unwrap_or(DEFAULT_PRIORITY).clamp(0.0, 1.0),
            published: record.published,
            ignore: record.ignore,
            duplicate: false,
            is_internal,
            is_menu_item: record.is_menu_item,
            source_type: record.source_type,
            home: record.home,
            visible_for_robots: record.visible_for_robots,
            parent_visible_for_robots: record.parent_visible_for_robots,
            visible_for_xml: true,
            visible_for_html: true,
            menutype: menu.map(|m| m.menutype.clone()),
            news: record.news,
        }
    }

    /// True when the item is neither ignored nor unpublished.
    pub fn is_displayable(&self) -> bool {
        !self.ignore && self.published
    }

    /// Language gate: untagged and wildcard (`*`) items match everything.
    pub fn has_compatible_language(&self, sitemap: &SitemapConfig) -> bool {
        match (&self.language, &sitemap.language) {
            (Some(lang), Some(filter)) => lang == "*" || lang.eq_ignore_ascii_case(filter),
            _ => true,
        }
    }

    /// News gate: requires a news payload published at or after `cutoff`.
    pub fn news_is_current(&self, cutoff: DateTime<Utc>) -> bool {
        self.news
            .as_ref()
            .and_then(|news| news.publish_up)
            .map_or(false, |published| published >= cutoff)
    }
}

/// Resolve a record link into an absolute URL and classify it as internal
/// or external.
///
/// Home rows collapse to the base URL. Scheme-less links resolve against
/// the base and are internal; absolute links are internal only when they
/// share the base host.
fn resolve_link(record: &RawRecord, sitemap: &SitemapConfig) -> (String, bool) {
    if record.home {
        return (sitemap.base_url.to_string(), true);
    }
    if record.link.is_empty() {
        // Headings and separators have no link but still belong to the
        // tree they came from.
        return (String::new(), record.is_menu_item);
    }
    match Url::parse(&record.link) {
        Ok(absolute) => {
            let internal = absolute.host_str().is_some()
                && absolute.host_str() == sitemap.base_url.host_str();
            (absolute.to_string(), internal)
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => match sitemap.base_url.join(&record.link) {
            Ok(resolved) => (resolved.to_string(), true),
            Err(_) => (record.link.clone(), true),
        },
        Err(_) => (record.link.clone(), false),
    }
}

fn link_hash(link: &str) -> String {
    hex::encode(Sha256::digest(link.as_bytes()))
}
