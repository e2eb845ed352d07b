//! Menu traversal and item emission.
//!
//! [`Collector::fetch`] walks every configured menu in order, turns each
//! row into a finished [`Item`], and hands it to the caller's sink.
//! Internal, non-ignored items then invoke the tree suppliers registered
//! for their source type, which push child items back through the same
//! submit path at an adjusted depth via [`Emitter`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::dedup::UidRegistry;
use crate::error::CollectError;
use crate::model::{Item, Menu, RawRecord, SitemapConfig};
use crate::plugin::{HandlerRegistry, PluginDispatcher};
use crate::settings::{resolve_settings, SettingsMap};
use crate::sources::{ItemSource, MenuSource, SettingsSource};

/// Links never admitted into a sitemap, regardless of flags. A matching
/// row is dropped together with its descendants.
const RESERVED_LINKS: &[&str] = &["administrator"];

fn is_reserved_link(link: &str) -> bool {
    RESERVED_LINKS.contains(&link)
}

type Sink<'a> = dyn FnMut(&Item) -> bool + 'a;

/// Collects sitemap items for one sitemap build.
///
/// One collector drives one traversal at a time. `fetch` resets the
/// counter and uid registry, so a collector may be reused for repeated
/// builds of the same sitemap, but never shared between concurrent ones.
pub struct Collector {
    sitemap: SitemapConfig,
    menus: Arc<dyn MenuSource>,
    items: Arc<dyn ItemSource>,
    settings: Arc<dyn SettingsSource>,
    dispatcher: PluginDispatcher,
    /// Loaded once per fetch, read-only afterwards.
    overrides: SettingsMap,
    uids: UidRegistry,
    counter: usize,
}

impl Collector {
    pub fn new(
        sitemap: SitemapConfig,
        menus: Arc<dyn MenuSource>,
        items: Arc<dyn ItemSource>,
        settings: Arc<dyn SettingsSource>,
        registry: Arc<dyn HandlerRegistry>,
    ) -> Self {
        Self {
            sitemap,
            menus,
            items,
            settings,
            dispatcher: PluginDispatcher::new(registry),
            overrides: SettingsMap::default(),
            uids: UidRegistry::new(),
            counter: 0,
        }
    }

    /// The sitemap this collector builds.
    pub fn sitemap(&self) -> &SitemapConfig {
        &self.sitemap
    }

    /// Walk every configured menu and deliver each item to `sink`.
    ///
    /// The sink runs once per submitted item, in traversal order,
    /// including ignored and duplicate items; sinks filter on the item
    /// flags. Its boolean result is handed back to suppliers but never
    /// alters control flow; callers needing early termination keep their
    /// own state (e.g. a countdown captured in the closure). Returns the
    /// number of displayable, non-duplicate items.
    pub fn fetch(&mut self, mut sink: impl FnMut(&Item) -> bool) -> Result<usize, CollectError> {
        self.fetch_inner(&mut sink)
    }

    fn fetch_inner(&mut self, sink: &mut Sink<'_>) -> Result<usize, CollectError> {
        let menus = self
            .menus
            .list_menus(&self.sitemap.id)
            .map_err(|e| CollectError::data_source("listing menus", e))?;

        self.counter = 0;
        self.uids.clear();
        self.overrides = self
            .settings
            .list_overrides(&self.sitemap.id)
            .map_err(|e| CollectError::data_source("loading item settings", e))?;

        debug!(
            "collecting sitemap {} over {} menus",
            self.sitemap.id,
            menus.len()
        );

        for menu in &menus {
            let records = self
                .items
                .list_menu_items(menu, self.sitemap.language.as_deref())
                .map_err(|e| CollectError::data_source("listing menu items", e))?;

            // Depth of the last reserved row; pre-order means its
            // descendants follow immediately with a greater level.
            let mut reserved_above: Option<u32> = None;

            for mut record in records {
                if let Some(parent_level) = reserved_above {
                    if record.level > parent_level {
                        continue;
                    }
                    reserved_above = None;
                }
                if is_reserved_link(&record.link) {
                    debug!("skipping reserved link {:?} and its subtree", record.link);
                    reserved_above = Some(record.level);
                    continue;
                }

                record.uid = format!("menuitem.{}", record.id);
                record.is_menu_item = true;

                self.submit_and_descend(record, Some(menu), true, 0, sink)?;
            }
        }

        debug!(
            "collected {} displayable items for sitemap {}",
            self.counter, self.sitemap.id
        );

        Ok(self.counter)
    }

    /// The single submit path: wrap, prepare, resolve, dedup, count, emit,
    /// then descend into tree supply for internal items.
    fn submit_and_descend(
        &mut self,
        record: RawRecord,
        menu: Option<&Menu>,
        prepare: bool,
        level: u32,
        sink: &mut Sink<'_>,
    ) -> Result<bool, CollectError> {
        let mut item = Item::new(record, &self.sitemap, menu);

        if prepare {
            self.dispatcher.prepare(&mut item)?;
        }

        resolve_settings(&mut item, menu, &self.overrides);

        // External links are collected but ignored unless enabled.
        if !item.is_internal && !self.sitemap.show_external_links {
            item.ignore = true;
        }

        if item.is_displayable() {
            if self.uids.seen(&item.uid) {
                debug!("duplicate uid {}", item.uid);
                item.duplicate = true;
            } else if item.published {
                self.uids.register(&item.uid);
            }
            // The duplicate flag decides counting; ignore and published
            // cannot have changed since the first check.
            if item.is_displayable() && !item.duplicate {
                self.counter += 1;
            }
        }

        item.level = level;

        let accepted = (*sink)(&item);

        // Children are never collected under an ignored parent.
        if item.is_internal && !item.ignore {
            self.supply_tree(&item, sink)?;
        }

        Ok(accepted)
    }

    /// Run every tree supplier registered for the item's source type,
    /// each with a fresh emission channel scoped to the item's depth.
    fn supply_tree(&mut self, item: &Item, sink: &mut Sink<'_>) -> Result<(), CollectError> {
        let handlers = self.dispatcher.handlers_for(&item.source_type);

        for handler in handlers {
            let Some(supplier) = handler.supplier.clone() else {
                continue;
            };
            let mut channel = Emitter {
                collector: &mut *self,
                sink: &mut *sink,
                level: item.level,
            };
            supplier
                .supply_children(&mut channel, item, &handler.params)
                .map_err(|e| CollectError::plugin(&handler.name, "supplying children", e))?;
        }

        Ok(())
    }
}

/// Re-entrant emission channel handed to tree suppliers.
///
/// Every supplier invocation gets its own channel, scoped to the parent
/// item's depth: a depth adjustment a handler forgets to undo dies with
/// the channel instead of leaking into sibling subtrees or a later fetch.
pub struct Emitter<'a, 'b> {
    collector: &'a mut Collector,
    sink: &'a mut Sink<'b>,
    level: u32,
}

impl Emitter<'_, '_> {
    /// Submit one child record through the collector's pipeline.
    ///
    /// The record passes settings resolution, the external-link policy,
    /// and duplicate bookkeeping, is stamped with the channel's current
    /// depth, and reaches the sink; internal, non-ignored children then
    /// trigger their own tree supply. Returns the sink's boolean, which
    /// is informational only.
    pub fn submit(&mut self, record: RawRecord) -> Result<bool, CollectError> {
        let level = self.level;
        self.collector
            .submit_and_descend(record, None, false, level, &mut *self.sink)
    }

    /// Adjust the channel depth by `step` (the legacy enter/exit
    /// protocol around a batch of children). The depth saturates at zero:
    /// a step below the root is clamped and logged, never propagated.
    pub fn change_level(&mut self, step: i32) {
        if self.level.checked_add_signed(step).is_none() {
            warn!(
                "handler stepped outside the valid depth range ({} {step:+}); clamping",
                self.level
            );
        }
        self.level = self.level.saturating_add_signed(step);
    }

    /// Current emission depth.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Read-only view of the sitemap under collection.
    pub fn sitemap(&self) -> &SitemapConfig {
        self.collector.sitemap()
    }
}
