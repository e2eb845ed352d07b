//! Pluggable handlers keyed by item source type.
//!
//! A handler record carries up to two independent capabilities: preparing
//! an item before emission (with veto power) and supplying child items
//! below an internal item. A record with neither capability is a
//! registered no-op and is skipped.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use fnv::FnvHashMap;
use tracing::debug;

use crate::collector::Emitter;
use crate::error::CollectError;
use crate::model::Item;

/// Opaque per-handler configuration, passed back on every capability call.
pub type HandlerParams = serde_json::Value;

/// Capability: inspect and adjust an item before it is emitted.
///
/// Returning `Ok(false)` vetoes the item: it is marked ignored and no
/// later preparer for the same source type runs. An error aborts the
/// whole fetch.
pub trait ItemPreparer: Send + Sync {
    fn prepare(&self, item: &mut Item, params: &HandlerParams) -> Result<bool>;
}

/// Capability: push child items below an internal item.
///
/// The channel re-enters the collector's submit path: children go through
/// settings resolution and duplicate bookkeeping exactly like menu rows,
/// and internal children recurse into their own tree supply.
pub trait TreeSupplier: Send + Sync {
    fn supply_children(
        &self,
        channel: &mut Emitter<'_, '_>,
        item: &Item,
        params: &HandlerParams,
    ) -> Result<()>;
}

/// One registered handler for a source type.
#[derive(Clone)]
pub struct HandlerRecord {
    pub name: String,
    pub params: HandlerParams,
    pub preparer: Option<Arc<dyn ItemPreparer>>,
    pub supplier: Option<Arc<dyn TreeSupplier>>,
}

impl HandlerRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: HandlerParams::Null,
            preparer: None,
            supplier: None,
        }
    }

    pub fn with_params(mut self, params: HandlerParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_preparer(mut self, preparer: Arc<dyn ItemPreparer>) -> Self {
        self.preparer = Some(preparer);
        self
    }

    pub fn with_supplier(mut self, supplier: Arc<dyn TreeSupplier>) -> Self {
        self.supplier = Some(supplier);
        self
    }
}

impl fmt::Debug for HandlerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRecord")
            .field("name", &self.name)
            .field("preparer", &self.preparer.is_some())
            .field("supplier", &self.supplier.is_some())
            .finish()
    }
}

/// Resolves the ordered handler list for a source type.
///
/// The registry is loaded before a fetch starts and must stay stable
/// while it runs.
pub trait HandlerRegistry: Send + Sync {
    fn handlers_for(&self, source_type: &str) -> Vec<HandlerRecord>;
}

/// Map-backed registry for callers that assemble handlers in process.
#[derive(Debug, Default)]
pub struct StaticHandlerRegistry {
    handlers: FnvHashMap<String, Vec<HandlerRecord>>,
}

impl StaticHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler for `source_type`, keeping registration order.
    pub fn register(&mut self, source_type: impl Into<String>, record: HandlerRecord) {
        self.handlers
            .entry(source_type.into())
            .or_default()
            .push(record);
    }
}

impl HandlerRegistry for StaticHandlerRegistry {
    fn handlers_for(&self, source_type: &str) -> Vec<HandlerRecord> {
        self.handlers.get(source_type).cloned().unwrap_or_default()
    }
}

/// Dispatches capability calls for the collector.
pub struct PluginDispatcher {
    registry: Arc<dyn HandlerRegistry>,
}

impl PluginDispatcher {
    pub fn new(registry: Arc<dyn HandlerRegistry>) -> Self {
        Self { registry }
    }

    /// Ordered handlers for an item's source type.
    pub fn handlers_for(&self, source_type: &str) -> Vec<HandlerRecord> {
        self.registry.handlers_for(source_type)
    }

    /// Run every preparer registered for the item's source type.
    ///
    /// The first veto marks the item ignored and stops the walk; a
    /// handler without the capability has no opinion.
    pub fn prepare(&self, item: &mut Item) -> Result<(), CollectError> {
        for handler in self.registry.handlers_for(&item.source_type) {
            let Some(preparer) = handler.preparer.as_ref() else {
                continue;
            };
            match preparer.prepare(item, &handler.params) {
                Ok(true) => {}
                Ok(false) => {
                    debug!("handler {} vetoed item {}", handler.name, item.uid);
                    item.ignore = true;
                    break;
                }
                Err(source) => {
                    return Err(CollectError::plugin(&handler.name, "prepare", source))
                }
            }
        }
        Ok(())
    }
}
