//! Error taxonomy for the collection engine.

use thiserror::Error;

/// Fatal errors raised during a fetch.
///
/// Nothing is retried: a failing source or handler aborts the whole
/// traversal, and callers are expected to discard any partial output and
/// report the build as failed.
#[derive(Debug, Error)]
pub enum CollectError {
    /// A menu, item, or settings query failed at its source.
    #[error("data source failure while {operation}: {source}")]
    DataSource {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// A registered handler failed while preparing an item or supplying
    /// child items.
    #[error("handler {handler} failed while {stage}: {source}")]
    Plugin {
        handler: String,
        stage: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl CollectError {
    pub(crate) fn data_source(operation: &'static str, source: anyhow::Error) -> Self {
        Self::DataSource { operation, source }
    }

    pub(crate) fn plugin(handler: &str, stage: &'static str, source: anyhow::Error) -> Self {
        Self::Plugin {
            handler: handler.to_string(),
            stage,
            source,
        }
    }
}
