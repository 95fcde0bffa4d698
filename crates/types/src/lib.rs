//! Shared type definitions for the typeahead pipeline and its components.
//!
//! Everything here is plain data crossed between the engine, the selector
//! components, and the embedding presentation layer: indexed items handed to
//! selection callbacks, the pipeline configuration, and the diagnostic events
//! emitted when fetches fail.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default quiet period applied between the last edit and the fetch dispatch.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// An item paired with its position in the currently displayed sequence.
///
/// The index is recomputed on every display-set change; it identifies a row
/// at the moment of selection, not a stable identity for the item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedItem<T> {
    /// The selected item.
    pub item: T,
    /// Position of `item` within the display set it was taken from.
    pub index: usize,
}

impl<T> IndexedItem<T> {
    /// Pairs an item with its display position.
    pub fn new(item: T, index: usize) -> Self {
        Self { item, index }
    }
}

/// Tunables for a search pipeline instance.
///
/// The debounce window is the only knob of the core algorithm: the quiet
/// period that must elapse after the last edit before the value is acted
/// upon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Quiet period between the last input edit and the downstream emission.
    pub debounce_window: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
        }
    }
}

impl PipelineConfig {
    /// Builds a configuration with the given debounce window.
    pub fn new(debounce_window: Duration) -> Result<Self, ConfigError> {
        let config = Self { debounce_window };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_window.is_zero() {
            return Err(ConfigError::ZeroDebounceWindow);
        }
        Ok(())
    }
}

/// Errors emitted when validating a [`PipelineConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The debounce window must be a positive duration.
    #[error("debounce window must be a positive duration")]
    ZeroDebounceWindow,
}

/// Diagnostic notifications emitted by the pipeline.
///
/// These never carry user-facing consequences on their own; the pipeline has
/// already recovered (empty display set, reset applied) by the time an event
/// is reported.
#[derive(Debug)]
pub enum DiagnosticEvent {
    /// The one-shot unfiltered fetch at pipeline start failed. The baseline
    /// and display sets stay empty; there is no retry.
    BaselineFetchFailed {
        /// The failure reported by the fetcher.
        error: anyhow::Error,
    },
    /// A filtered fetch failed. The display set was replaced with an empty
    /// sequence and the pipeline remains usable.
    FilteredFetchFailed {
        /// The trimmed filter the fetch was dispatched with.
        filter: String,
        /// The failure reported by the fetcher.
        error: anyhow::Error,
    },
    /// A selection callback panicked. The mandatory clear/reset still ran.
    SelectionCallbackPanicked {
        /// Display index the selection was issued for.
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_the_documented_window() {
        let config = PipelineConfig::default();
        assert_eq!(config.debounce_window, Duration::from_millis(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_debounce_window_is_rejected() {
        assert_eq!(
            PipelineConfig::new(Duration::ZERO),
            Err(ConfigError::ZeroDebounceWindow)
        );
    }

    #[test]
    fn indexed_item_round_trips_through_json() {
        let indexed = IndexedItem::new("banana".to_string(), 1);
        let json = serde_json::to_string(&indexed).expect("serialize");
        let back: IndexedItem<String> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, indexed);
    }
}
