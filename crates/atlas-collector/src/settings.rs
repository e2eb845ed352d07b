//! Per-item settings overrides and their resolution.

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

use crate::model::{ChangeFreq, Item, Menu};

/// A full settings override for one item.
///
/// Overrides are all-or-nothing: when one matches, every field replaces
/// the item's value, including the published flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ItemSettings {
    pub changefreq: ChangeFreq,
    pub priority: f32,
    pub published: bool,
}

/// Overrides indexed by `uid` or `uid:url_hash`, loaded once per fetch.
pub type SettingsMap = FnvHashMap<String, ItemSettings>;

/// Composite settings key for one uid/URL pair.
pub fn settings_key(uid: &str, url_hash: &str) -> String {
    format!("{uid}:{url_hash}")
}

/// Apply the matching override to `item`, if any.
///
/// Lookup order: `uid:url_hash` first (the same page can be reachable
/// through several URLs, each with its own settings), bare `uid` second.
/// An override always wins over whatever the record or a handler set.
/// Without one, menu rows fall back to their menu's defaults; supplier
/// rows keep the values the supplier chose.
pub fn resolve_settings(item: &mut Item, menu: Option<&Menu>, overrides: &SettingsMap) {
    let composite = settings_key(&item.uid, &item.full_link_hash);
    let settings = overrides
        .get(&composite)
        .or_else(|| overrides.get(&item.uid));

    match settings {
        Some(settings) => {
            item.changefreq = settings.changefreq;
            item.priority = settings.priority.clamp(0.0, 1.0);
            item.published = settings.published;
        }
        None => {
            if item.is_menu_item {
                if let Some(menu) = menu {
                    item.changefreq = menu.changefreq;
                    item.priority = menu.priority.clamp(0.0, 1.0);
                }
            }
        }
    }
}
