//! Sitemap item collection engine.
//!
//! Walks a sitemap's configured menus in order, wraps every row into a
//! policy-filtered, deduplicated [`Item`], and streams the result to a
//! caller-supplied sink. Registered handlers can veto items during
//! preparation or supply whole subtrees of additional items, re-entering
//! the same pipeline at an adjusted depth.
//!
//! Rendering, persistence, and the host framework stay outside: the crate
//! consumes menus, rows, and settings through the traits in [`sources`]
//! and hands finished entries out one by one.

pub mod collector;
pub mod dedup;
pub mod error;
pub mod model;
pub mod plugin;
pub mod settings;
pub mod sources;

pub use collector::{Collector, Emitter};
pub use error::CollectError;
pub use model::{ChangeFreq, Item, Menu, NewsInfo, RawRecord, SitemapConfig};
pub use plugin::{
    HandlerParams, HandlerRecord, HandlerRegistry, ItemPreparer, StaticHandlerRegistry,
    TreeSupplier,
};
pub use settings::{ItemSettings, SettingsMap};
pub use sources::{ItemSource, MenuSource, SettingsSource};
