//! Raw node records consumed from item sources and tree suppliers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::ChangeFreq;

/// News metadata attached to records that feed a news sitemap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsInfo {
    /// Publication date; entries older than the sitemap's news window are
    /// not current.
    #[serde(default)]
    pub publish_up: Option<DateTime<Utc>>,
    #[serde(default)]
    pub keywords: Option<String>,
}

/// The node shape shared by menu rows and handler-supplied children.
///
/// Menu sources leave `uid` empty; the collector derives
/// `menuitem.<id>` before submission. Tree suppliers must provide their
/// own uid scheme, plus whatever metadata (`changefreq`, `priority`,
/// `published`, `news`) the settings resolver should keep when no
/// override exists for the item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub id: i64,
    pub uid: String,
    pub title: String,
    pub alias: Option<String>,
    pub path: Option<String>,
    /// Depth of the row inside its source tree. Only consulted to skip the
    /// descendants of blacklisted rows; emitted items carry the traversal
    /// depth instead.
    pub level: u32,
    /// Source-type identifier, resolved against the handler registry.
    #[serde(rename = "type")]
    pub source_type: String,
    /// Marks the site home entry; its link resolves to the base URL.
    pub home: bool,
    pub parent_id: i64,
    pub link: String,
    pub is_menu_item: bool,
    /// Sources may pre-ignore rows they still want traversed.
    pub ignore: bool,
    pub published: bool,
    pub language: Option<String>,
    /// Supplier-set frequency, kept when no override applies.
    pub changefreq: Option<ChangeFreq>,
    /// Supplier-set priority, kept when no override applies.
    pub priority: Option<f32>,
    pub visible_for_robots: bool,
    pub parent_visible_for_robots: bool,
    pub news: Option<NewsInfo>,
}

impl Default for RawRecord {
    fn default() -> Self {
        Self {
            id: 0,
            uid: String::new(),
            title: String::new(),
            alias: None,
            path: None,
            level: 0,
            source_type: String::new(),
            home: false,
            parent_id: 0,
            link: String::new(),
            is_menu_item: false,
            ignore: false,
            published: true,
            language: None,
            changefreq: None,
            priority: None,
            visible_for_robots: true,
            parent_visible_for_robots: true,
            news: None,
        }
    }
}
