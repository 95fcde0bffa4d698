//! The search pipeline task and its handle.
//!
//! Each pipeline instance is a single spawned task that owns the result
//! state and is its only writer. The task multiplexes three event sources:
//! commands from the [`PipelineHandle`], the debounce deadline, and
//! completions of fetch tasks it spawned. Fetches follow a switch-latest
//! discipline: dispatching a newer fetch aborts the outstanding one, and a
//! monotonically increasing generation stamps every dispatch so that a
//! completion which raced past the abort is still recognized as stale and
//! dropped before it can touch the state.
//!
//! Disposal (dropping the handle or calling `shutdown`) stops the task,
//! disarms the debounce timer, and aborts outstanding fetch tasks; their
//! resolutions become no-ops.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;
use typeahead_types::{ConfigError, DiagnosticEvent, IndexedItem, PipelineConfig};
use typeahead_util::is_blank;

use crate::debounce::DebouncedInput;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::fetch::ItemFetcher;
use crate::state::SearchState;

/// Callback invoked with the selected item and its display position.
pub type SelectionCallback<T> = Box<dyn FnMut(IndexedItem<T>) + Send>;

/// Messages processed by the pipeline task: handle commands plus the
/// completions of the fetch tasks it spawned.
enum Msg<T> {
    FilterChanged(String),
    Select(usize),
    Clear,
    Shutdown,
    BaselineLoaded(anyhow::Result<Vec<T>>),
    FetchCompleted {
        generation: u64,
        filter: String,
        outcome: anyhow::Result<Vec<T>>,
    },
}

/// Entry point for building search pipelines.
pub struct SearchPipeline;

impl SearchPipeline {
    /// Starts building a pipeline over `fetcher`, notifying `on_selected`
    /// when the user picks an item.
    pub fn builder<T, F, C>(fetcher: F, on_selected: C) -> PipelineBuilder<T>
    where
        T: Clone + Send + Sync + 'static,
        F: ItemFetcher<T> + 'static,
        C: FnMut(IndexedItem<T>) + Send + 'static,
    {
        PipelineBuilder {
            fetcher: Arc::new(fetcher),
            on_selected: Box::new(on_selected),
            config: PipelineConfig::default(),
            sink: Arc::new(TracingSink),
        }
    }
}

/// Configures and spawns a [`PipelineHandle`].
pub struct PipelineBuilder<T> {
    fetcher: Arc<dyn ItemFetcher<T>>,
    on_selected: SelectionCallback<T>,
    config: PipelineConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl<T> PipelineBuilder<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Replaces the whole configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the debounce window only.
    pub fn debounce_window(mut self, window: Duration) -> Self {
        self.config.debounce_window = window;
        self
    }

    /// Installs a diagnostic sink; defaults to [`TracingSink`].
    pub fn diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Validates the configuration and spawns the pipeline task.
    ///
    /// Must be called within a tokio runtime. The initial unfiltered fetch
    /// is dispatched immediately; its result seeds the baseline set.
    pub fn spawn(self) -> Result<PipelineHandle<T>, ConfigError> {
        self.config.validate()?;

        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SearchState::default());

        let actor = PipelineActor {
            fetcher: self.fetcher,
            on_selected: self.on_selected,
            sink: self.sink,
            debounce: DebouncedInput::new(self.config.debounce_window),
            state_tx,
            msg_tx: msg_tx.clone(),
            msg_rx,
            generation: 0,
            in_flight: None,
            baseline_task: None,
        };
        tokio::spawn(actor.run());

        Ok(PipelineHandle { msg_tx, state_rx })
    }
}

/// Handle to a running pipeline.
///
/// Commands are fire-and-forget; after shutdown they become no-ops. The
/// handle is the pipeline's lifetime anchor: dropping it stops the task and
/// cancels all pending work.
pub struct PipelineHandle<T> {
    msg_tx: mpsc::UnboundedSender<Msg<T>>,
    state_rx: watch::Receiver<SearchState<T>>,
}

impl<T: Clone> PipelineHandle<T> {
    /// Feeds one text-change event into the pipeline. The filter text is
    /// reflected in the state as soon as the event is processed, ahead of
    /// any debounce delay; the display set follows after the quiet period.
    pub fn set_filter(&self, text: impl Into<String>) {
        let _ = self.msg_tx.send(Msg::FilterChanged(text.into()));
    }

    /// Selects the item at `index` within the currently displayed set.
    ///
    /// The selection callback is invoked with the item and its position,
    /// then the filter is cleared and the display reset to baseline --
    /// unconditionally, even if the callback panics. Out-of-range indices
    /// are ignored.
    pub fn select(&self, index: usize) {
        let _ = self.msg_tx.send(Msg::Select(index));
    }

    /// Clears the filter and resets the display to baseline without
    /// invoking the selection callback.
    pub fn clear(&self) {
        let _ = self.msg_tx.send(Msg::Clear);
    }

    /// Clones the latest published state.
    pub fn snapshot(&self) -> SearchState<T> {
        self.state_rx.borrow().clone()
    }

    /// A watch receiver for observing state changes.
    pub fn subscribe(&self) -> watch::Receiver<SearchState<T>> {
        self.state_rx.clone()
    }

    /// Stops the pipeline, cancelling any pending debounce or fetch.
    pub fn shutdown(self) {}
}

impl<T> Drop for PipelineHandle<T> {
    fn drop(&mut self) {
        let _ = self.msg_tx.send(Msg::Shutdown);
    }
}

struct InFlightFetch {
    generation: u64,
    task: JoinHandle<()>,
}

struct PipelineActor<T> {
    fetcher: Arc<dyn ItemFetcher<T>>,
    on_selected: SelectionCallback<T>,
    sink: Arc<dyn DiagnosticSink>,
    debounce: DebouncedInput,
    state_tx: watch::Sender<SearchState<T>>,
    msg_tx: mpsc::UnboundedSender<Msg<T>>,
    msg_rx: mpsc::UnboundedReceiver<Msg<T>>,
    generation: u64,
    in_flight: Option<InFlightFetch>,
    baseline_task: Option<JoinHandle<()>>,
}

impl<T> PipelineActor<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn run(mut self) {
        self.dispatch_baseline();
        loop {
            let deadline = self.debounce.deadline();
            tokio::select! {
                message = self.msg_rx.recv() => match message {
                    Some(Msg::Shutdown) | None => break,
                    Some(message) => self.handle_message(message),
                },
                _ = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.handle_quiet_period();
                }
            }
        }
        self.abort_in_flight();
        if let Some(task) = self.baseline_task.take() {
            task.abort();
        }
        debug!("search pipeline stopped");
    }

    fn handle_message(&mut self, message: Msg<T>) {
        match message {
            Msg::FilterChanged(text) => self.on_filter_changed(text),
            Msg::Select(index) => self.on_select(index),
            Msg::Clear => self.reset(),
            Msg::BaselineLoaded(outcome) => self.on_baseline_loaded(outcome),
            Msg::FetchCompleted {
                generation,
                filter,
                outcome,
            } => self.on_fetch_completed(generation, filter, outcome),
            Msg::Shutdown => unreachable!("shutdown is handled by the run loop"),
        }
    }

    /// One unfiltered fetch at pipeline start, independent of the debounce
    /// stream. No retry on failure.
    fn dispatch_baseline(&mut self) {
        let fetcher = Arc::clone(&self.fetcher);
        let events = self.msg_tx.clone();
        debug!("baseline fetch dispatched");
        self.baseline_task = Some(tokio::spawn(async move {
            let outcome = fetcher.fetch_items(None).await;
            let _ = events.send(Msg::BaselineLoaded(outcome));
        }));
    }

    fn on_baseline_loaded(&mut self, outcome: anyhow::Result<Vec<T>>) {
        self.baseline_task = None;
        match outcome {
            Ok(items) => {
                let items: Arc<[T]> = items.into();
                // Seed the display only while it is still baseline-derived;
                // a display produced by a filtered fetch is never
                // overwritten by the late-arriving baseline.
                let seed_display =
                    self.in_flight.is_none() && is_blank(self.state_tx.borrow().filter());
                debug!(count = items.len(), seed_display, "baseline loaded");
                self.state_tx
                    .send_modify(move |state| state.seed_baseline(items, seed_display));
            }
            Err(error) => {
                self.sink.report(DiagnosticEvent::BaselineFetchFailed { error });
            }
        }
    }

    fn on_filter_changed(&mut self, text: String) {
        self.state_tx
            .send_modify(|state| state.set_filter(text.clone()));
        self.debounce.submit(text);
    }

    fn handle_quiet_period(&mut self) {
        let Some(value) = self.debounce.take_emission() else {
            return;
        };
        if is_blank(&value) {
            // The blank emission supersedes any outstanding fetch and is
            // answered synchronously from the baseline snapshot.
            self.abort_in_flight();
            debug!("blank filter, restoring baseline display");
            self.state_tx.send_modify(|state| state.show_baseline());
        } else {
            self.dispatch_fetch(value);
        }
    }

    fn dispatch_fetch(&mut self, value: String) {
        self.abort_in_flight();
        self.generation += 1;
        let generation = self.generation;
        let filter = value.trim().to_string();
        let fetcher = Arc::clone(&self.fetcher);
        let events = self.msg_tx.clone();
        debug!(generation, filter = %filter, "filtered fetch dispatched");
        let task = tokio::spawn(async move {
            let outcome = fetcher.fetch_items(Some(&filter)).await;
            let _ = events.send(Msg::FetchCompleted {
                generation,
                filter,
                outcome,
            });
        });
        self.in_flight = Some(InFlightFetch { generation, task });
    }

    fn on_fetch_completed(
        &mut self,
        generation: u64,
        filter: String,
        outcome: anyhow::Result<Vec<T>>,
    ) {
        if self.in_flight.as_ref().map(|fetch| fetch.generation) != Some(generation) {
            debug!(generation, filter = %filter, "stale fetch result dropped");
            return;
        }
        self.in_flight = None;
        match outcome {
            Ok(items) => {
                debug!(generation, filter = %filter, count = items.len(), "filtered fetch completed");
                let items: Arc<[T]> = items.into();
                self.state_tx.send_modify(move |state| state.set_filtered(items));
            }
            Err(error) => {
                self.sink
                    .report(DiagnosticEvent::FilteredFetchFailed { filter, error });
                self.state_tx
                    .send_modify(|state| state.set_filtered(Arc::from(Vec::new())));
            }
        }
    }

    fn on_select(&mut self, index: usize) {
        let selected = self.state_tx.borrow().filtered_items().get(index).cloned();
        match selected {
            Some(item) => {
                let indexed = IndexedItem::new(item, index);
                let callback = &mut self.on_selected;
                if catch_unwind(AssertUnwindSafe(|| callback(indexed))).is_err() {
                    self.sink
                        .report(DiagnosticEvent::SelectionCallbackPanicked { index });
                }
                self.reset();
            }
            None => {
                debug!(index, "selection index out of range, ignoring");
            }
        }
    }

    /// Authoritative reset shared by selection and explicit clear: cancels
    /// the pending debounce and in-flight fetch, clears the filter, and
    /// restores the baseline display. Bypasses the debounce path entirely.
    fn reset(&mut self) {
        self.debounce.cancel();
        self.debounce.mark_emitted(String::new());
        self.abort_in_flight();
        self.state_tx.send_modify(|state| state.reset());
    }

    fn abort_in_flight(&mut self) {
        if let Some(fetch) = self.in_flight.take() {
            debug!(generation = fetch.generation, "in-flight fetch superseded, aborting");
            fetch.task.abort();
        }
    }
}
