//! Collaborator traits for the external data a fetch consumes.
//!
//! Persistence lives outside this crate: implementations typically wrap a
//! database or the host framework's row objects. Calls are blocking and
//! not retried here; a failure aborts the fetch. Every trait is
//! object-safe and cheap to mock in tests.

use anyhow::Result;

use crate::model::{Menu, RawRecord};
use crate::settings::SettingsMap;

/// Yields the menus selected for a sitemap, ascending by `ordering`.
pub trait MenuSource: Send + Sync {
    fn list_menus(&self, sitemap_id: &str) -> Result<Vec<Menu>>;
}

/// Yields one menu's rows in pre-order (parents before descendants, the
/// order a nested-set query emits), restricted to published, publicly
/// visible rows matching the language filter.
pub trait ItemSource: Send + Sync {
    fn list_menu_items(&self, menu: &Menu, language: Option<&str>) -> Result<Vec<RawRecord>>;
}

/// Yields the per-item settings overrides for a sitemap, indexed by
/// `uid` or `uid:url_hash`.
pub trait SettingsSource: Send + Sync {
    fn list_overrides(&self, sitemap_id: &str) -> Result<SettingsMap>;
}
