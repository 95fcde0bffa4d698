//! # Typeahead Engine
//!
//! The debounced, cancellable search pipeline behind the typeahead input
//! components. The pipeline owns the contract between free-text user input
//! and an injected asynchronous item fetcher, and guarantees that fast
//! typing never lets an older, slower response overwrite a newer, faster
//! one.
//!
//! ## Key behaviors
//!
//! - **Debounce + dedupe**: edits propagate only after a quiet period
//!   (default 300 ms), and consecutive duplicate values are suppressed.
//! - **Switch-latest fetches**: dispatching a fetch for a newer value
//!   aborts the outstanding one; a stale completion can never update the
//!   display set.
//! - **Baseline fallback**: a blank filter restores the baseline set
//!   synchronously, without a fetch.
//! - **Local failure recovery**: a failed fetch yields an empty display set
//!   and a diagnostic event; the pipeline stays usable.
//! - **Unconditional reset on selection**: selecting an item notifies the
//!   caller and then clears the filter and display, even if the callback
//!   panics.
//!
//! ## Usage
//!
//! ```no_run
//! use typeahead_engine::{FetchFn, SearchPipeline};
//! use typeahead_types::{IndexedItem, PipelineConfig};
//!
//! # async fn demo() -> Result<(), typeahead_types::ConfigError> {
//! let fetcher = FetchFn::new(|filter: Option<String>| async move {
//!     let items = vec!["apple".to_string(), "banana".to_string()];
//!     anyhow::Ok(match filter {
//!         Some(filter) => items.into_iter().filter(|i| i.contains(&filter)).collect(),
//!         None => items,
//!     })
//! });
//!
//! let handle = SearchPipeline::builder(fetcher, |selected: IndexedItem<String>| {
//!     println!("picked {} at row {}", selected.item, selected.index);
//! })
//! .config(PipelineConfig::default())
//! .spawn()?;
//!
//! handle.set_filter("ap");
//! # Ok(())
//! # }
//! ```

mod debounce;
mod diagnostics;
mod fetch;
mod pipeline;
mod state;

pub use diagnostics::{DiagnosticSink, TracingSink};
pub use fetch::{FetchFn, ItemFetcher};
pub use pipeline::{PipelineBuilder, PipelineHandle, SearchPipeline, SelectionCallback};
pub use state::SearchState;

pub use typeahead_types::{ConfigError, DiagnosticEvent, IndexedItem, PipelineConfig};
