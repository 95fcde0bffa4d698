//! Result state owned by the pipeline task.
//!
//! A single mutable container holds the raw filter text, the baseline item
//! set, and the currently displayed set. The pipeline task is the only
//! writer; readers receive whole-state snapshots through a watch channel, so
//! every observation is of one consistent write. Item sequences are shared
//! as `Arc<[T]>` to keep snapshot clones cheap.

use std::sync::Arc;

/// Snapshot of a pipeline's observable state.
///
/// `filter` is the source of truth for the input widget; `items` is the
/// baseline set loaded once at start; `filtered_items` is what the
/// presentation layer renders.
#[derive(Clone, Debug)]
pub struct SearchState<T> {
    filter: String,
    items: Arc<[T]>,
    filtered_items: Arc<[T]>,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            filter: String::new(),
            items: Arc::from(Vec::new()),
            filtered_items: Arc::from(Vec::new()),
        }
    }
}

impl<T> SearchState<T> {
    /// The current raw filter text.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// The baseline item set.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The currently displayed item set.
    pub fn filtered_items(&self) -> &[T] {
        &self.filtered_items
    }

    /// Shared handle to the displayed set, for zero-copy rendering.
    pub fn filtered_items_shared(&self) -> Arc<[T]> {
        Arc::clone(&self.filtered_items)
    }

    pub(crate) fn set_filter(&mut self, filter: String) {
        self.filter = filter;
    }

    /// Seeds the baseline set from the initial unfiltered fetch.
    pub(crate) fn seed_baseline(&mut self, items: Arc<[T]>, seed_display: bool) {
        if seed_display {
            self.filtered_items = Arc::clone(&items);
        }
        self.items = items;
    }

    pub(crate) fn set_filtered(&mut self, filtered_items: Arc<[T]>) {
        self.filtered_items = filtered_items;
    }

    /// Points the display set back at the current baseline snapshot.
    pub(crate) fn show_baseline(&mut self) {
        self.filtered_items = Arc::clone(&self.items);
    }

    /// Authoritative reset applied on selection and explicit clear: empty
    /// filter, display back to baseline.
    pub(crate) fn reset(&mut self) {
        self.filter.clear();
        self.show_baseline();
    }
}
