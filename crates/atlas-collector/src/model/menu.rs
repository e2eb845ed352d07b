//! Menu rows selected for a sitemap.

use serde::{Deserialize, Serialize};

use super::config::{ChangeFreq, DEFAULT_PRIORITY};

/// One navigation menu attached to a sitemap.
///
/// Rows are immutable during a fetch and arrive from the menu source
/// already ordered ascending by `ordering`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub id: i64,
    /// Key the item source uses to select this menu's rows.
    pub menutype: String,
    pub title: String,
    /// Default change frequency for items without their own settings.
    #[serde(default)]
    pub changefreq: ChangeFreq,
    /// Default priority for items without their own settings.
    #[serde(default = "default_priority")]
    pub priority: f32,
    pub ordering: i32,
}

fn default_priority() -> f32 {
    DEFAULT_PRIORITY
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            id: 0,
            menutype: String::new(),
            title: String::new(),
            changefreq: ChangeFreq::default(),
            priority: DEFAULT_PRIORITY,
            ordering: 0,
        }
    }
}
