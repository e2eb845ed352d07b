//! Data model: sitemap configuration, menu rows, raw records, and
//! finished items.

pub mod config;
pub mod item;
pub mod menu;
pub mod record;

pub use config::{ChangeFreq, SitemapConfig, DEFAULT_PRIORITY};
pub use item::Item;
pub use menu::Menu;
pub use record::{NewsInfo, RawRecord};
