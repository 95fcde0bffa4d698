//! End-to-end behavior tests for the search pipeline, driven through a
//! scripted fetcher over the canonical apple/banana/cherry data set.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::bail;
use async_trait::async_trait;
use tokio::time::sleep;
use typeahead_engine::{DiagnosticSink, ItemFetcher, PipelineHandle, SearchPipeline};
use typeahead_types::{ConfigError, DiagnosticEvent, IndexedItem, PipelineConfig};

const WINDOW: Duration = Duration::from_millis(120);
const TYPE_GAP: Duration = Duration::from_millis(30);

/// Long enough for the debounce window to elapse and a fast fetch to land.
async fn settle() {
    sleep(Duration::from_millis(400)).await;
}

#[derive(Clone, Default)]
struct ScriptedFetcher {
    inner: Arc<FetcherState>,
}

#[derive(Default)]
struct FetcherState {
    items: Vec<String>,
    calls: Mutex<Vec<Option<String>>>,
    delays: Mutex<HashMap<String, Duration>>,
    failures: Mutex<HashSet<String>>,
    fail_baseline: Mutex<bool>,
}

impl ScriptedFetcher {
    fn new() -> Self {
        Self {
            inner: Arc::new(FetcherState {
                items: vec!["apple".to_string(), "banana".to_string(), "cherry".to_string()],
                ..Default::default()
            }),
        }
    }

    fn delay(self, filter: &str, delay: Duration) -> Self {
        self.inner.delays.lock().unwrap().insert(filter.to_string(), delay);
        self
    }

    fn fail_on(self, filter: &str) -> Self {
        self.inner.failures.lock().unwrap().insert(filter.to_string());
        self
    }

    fn fail_baseline(self) -> Self {
        *self.inner.fail_baseline.lock().unwrap() = true;
        self
    }

    fn calls(&self) -> Vec<Option<String>> {
        self.inner.calls.lock().unwrap().clone()
    }

    fn calls_for(&self, filter: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.as_deref() == Some(filter))
            .count()
    }
}

#[async_trait]
impl ItemFetcher<String> for ScriptedFetcher {
    async fn fetch_items(&self, filter: Option<&str>) -> anyhow::Result<Vec<String>> {
        self.inner
            .calls
            .lock()
            .unwrap()
            .push(filter.map(str::to_owned));

        let Some(filter) = filter else {
            if *self.inner.fail_baseline.lock().unwrap() {
                bail!("scripted baseline failure");
            }
            return Ok(self.inner.items.clone());
        };

        let delay = self.inner.delays.lock().unwrap().get(filter).copied();
        if let Some(delay) = delay {
            sleep(delay).await;
        }
        if self.inner.failures.lock().unwrap().contains(filter) {
            bail!("scripted failure for {filter}");
        }

        let needle = filter.to_lowercase();
        Ok(self
            .inner
            .items
            .iter()
            .filter(|item| item.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
struct RecordingSink {
    events: Arc<Mutex<Vec<DiagnosticEvent>>>,
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, event: DiagnosticEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl RecordingSink {
    fn filtered_failure_count(&self, filter: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| {
                matches!(event, DiagnosticEvent::FilteredFetchFailed { filter: f, .. } if f == filter)
            })
            .count()
    }

    fn baseline_failed(&self) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|event| matches!(event, DiagnosticEvent::BaselineFetchFailed { .. }))
    }

    fn callback_panicked_at(&self, index: usize) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|event| matches!(event, DiagnosticEvent::SelectionCallbackPanicked { index: i } if *i == index))
    }
}

type Selections = Arc<Mutex<Vec<IndexedItem<String>>>>;

fn spawn_pipeline(fetcher: ScriptedFetcher, sink: RecordingSink) -> (PipelineHandle<String>, Selections) {
    let selections: Selections = Arc::default();
    let recorded = Arc::clone(&selections);
    let handle = SearchPipeline::builder(fetcher, move |selected| {
        recorded.lock().unwrap().push(selected);
    })
    .debounce_window(WINDOW)
    .diagnostics(sink)
    .spawn()
    .expect("valid configuration");
    (handle, selections)
}

#[tokio::test]
async fn initial_load_seeds_baseline_and_display() {
    let fetcher = ScriptedFetcher::new();
    let (handle, _) = spawn_pipeline(fetcher.clone(), RecordingSink::default());
    settle().await;

    let state = handle.snapshot();
    assert_eq!(state.items(), ["apple", "banana", "cherry"]);
    assert_eq!(state.filtered_items(), ["apple", "banana", "cherry"]);
    assert_eq!(state.filter(), "");
    assert_eq!(fetcher.calls(), vec![None]);
}

#[tokio::test]
async fn filter_text_updates_before_the_window_elapses() {
    let fetcher = ScriptedFetcher::new();
    let (handle, _) = spawn_pipeline(fetcher.clone(), RecordingSink::default());
    settle().await;

    handle.set_filter("ap");
    sleep(TYPE_GAP).await;

    let state = handle.snapshot();
    assert_eq!(state.filter(), "ap");
    // No leading-edge emission: the fetch waits out the quiet period.
    assert_eq!(fetcher.calls(), vec![None]);
}

#[tokio::test]
async fn fast_typing_debounces_to_a_single_fetch() {
    let fetcher = ScriptedFetcher::new();
    let (handle, _) = spawn_pipeline(fetcher.clone(), RecordingSink::default());
    settle().await;

    handle.set_filter("a");
    sleep(TYPE_GAP).await;
    handle.set_filter("ap");
    sleep(TYPE_GAP).await;
    handle.set_filter("app");
    settle().await;

    assert_eq!(fetcher.calls(), vec![None, Some("app".to_string())]);
    assert_eq!(handle.snapshot().filtered_items(), ["apple"]);
}

#[tokio::test]
async fn superseded_fetch_never_overwrites_the_newer_result() {
    let fetcher = ScriptedFetcher::new().delay("an", Duration::from_millis(900));
    let (handle, _) = spawn_pipeline(fetcher.clone(), RecordingSink::default());
    settle().await;

    handle.set_filter("an");
    sleep(Duration::from_millis(250)).await;
    handle.set_filter("app");
    settle().await;

    assert_eq!(handle.snapshot().filtered_items(), ["apple"]);

    // Outlive the slow fetch's original schedule: the display must not flip.
    sleep(Duration::from_millis(900)).await;
    assert_eq!(handle.snapshot().filtered_items(), ["apple"]);
    assert_eq!(fetcher.calls_for("an"), 1);
    assert_eq!(fetcher.calls_for("app"), 1);
}

#[tokio::test]
async fn duplicate_debounced_value_fetches_once() {
    let fetcher = ScriptedFetcher::new();
    let (handle, _) = spawn_pipeline(fetcher.clone(), RecordingSink::default());
    settle().await;

    handle.set_filter("app");
    settle().await;
    handle.set_filter("app");
    settle().await;

    assert_eq!(fetcher.calls_for("app"), 1);
}

#[tokio::test]
async fn blank_filter_restores_baseline_without_fetching() {
    let fetcher = ScriptedFetcher::new();
    let (handle, _) = spawn_pipeline(fetcher.clone(), RecordingSink::default());
    settle().await;

    handle.set_filter("app");
    settle().await;
    assert_eq!(handle.snapshot().filtered_items(), ["apple"]);

    handle.set_filter("   ");
    settle().await;

    let state = handle.snapshot();
    assert_eq!(state.filter(), "   ");
    assert_eq!(state.filtered_items(), ["apple", "banana", "cherry"]);
    // Only the baseline load and the "app" fetch ever reached the fetcher.
    assert_eq!(fetcher.calls(), vec![None, Some("app".to_string())]);
}

#[tokio::test]
async fn selection_notifies_with_the_current_display_index() {
    let fetcher = ScriptedFetcher::new();
    let (handle, selections) = spawn_pipeline(fetcher, RecordingSink::default());
    settle().await;

    handle.set_filter("ban");
    settle().await;
    assert_eq!(handle.snapshot().filtered_items(), ["banana"]);

    handle.select(0);
    settle().await;

    assert_eq!(
        *selections.lock().unwrap(),
        vec![IndexedItem::new("banana".to_string(), 0)]
    );
    let state = handle.snapshot();
    assert_eq!(state.filter(), "");
    assert_eq!(state.filtered_items(), ["apple", "banana", "cherry"]);
}

#[tokio::test]
async fn selection_resets_even_when_the_callback_panics() {
    let fetcher = ScriptedFetcher::new();
    let sink = RecordingSink::default();
    let handle = SearchPipeline::builder(fetcher, |_selected: IndexedItem<String>| {
        panic!("callback exploded");
    })
    .debounce_window(WINDOW)
    .diagnostics(sink.clone())
    .spawn()
    .expect("valid configuration");
    settle().await;

    handle.set_filter("ban");
    settle().await;
    handle.select(0);
    settle().await;

    let state = handle.snapshot();
    assert_eq!(state.filter(), "");
    assert_eq!(state.filtered_items(), ["apple", "banana", "cherry"]);
    assert!(sink.callback_panicked_at(0));
}

#[tokio::test]
async fn selection_reset_rearms_the_duplicate_suppression() {
    let fetcher = ScriptedFetcher::new();
    let (handle, _) = spawn_pipeline(fetcher.clone(), RecordingSink::default());
    settle().await;

    handle.set_filter("app");
    settle().await;
    handle.select(0);
    settle().await;

    // Retyping the query after the reset must fetch again.
    handle.set_filter("app");
    settle().await;
    assert_eq!(fetcher.calls_for("app"), 2);
}

#[tokio::test]
async fn clear_restores_baseline_and_keeps_the_pipeline_usable() {
    let fetcher = ScriptedFetcher::new();
    let (handle, selections) = spawn_pipeline(fetcher.clone(), RecordingSink::default());
    settle().await;

    handle.set_filter("app");
    settle().await;
    handle.clear();
    settle().await;

    let state = handle.snapshot();
    assert_eq!(state.filter(), "");
    assert_eq!(state.filtered_items(), ["apple", "banana", "cherry"]);
    assert!(selections.lock().unwrap().is_empty());

    handle.set_filter("cher");
    settle().await;
    assert_eq!(handle.snapshot().filtered_items(), ["cherry"]);
}

#[tokio::test]
async fn fetch_failure_yields_empty_display_and_a_diagnostic() {
    let fetcher = ScriptedFetcher::new().fail_on("xyz");
    let sink = RecordingSink::default();
    let (handle, _) = spawn_pipeline(fetcher.clone(), sink.clone());
    settle().await;

    handle.set_filter("xyz");
    settle().await;

    let state = handle.snapshot();
    assert_eq!(state.filter(), "xyz");
    assert!(state.filtered_items().is_empty());
    assert_eq!(sink.filtered_failure_count("xyz"), 1);

    // The stream stays alive for subsequent input.
    handle.set_filter("app");
    settle().await;
    assert_eq!(handle.snapshot().filtered_items(), ["apple"]);
}

#[tokio::test]
async fn baseline_failure_leaves_both_sets_empty() {
    let fetcher = ScriptedFetcher::new().fail_baseline();
    let sink = RecordingSink::default();
    let (handle, _) = spawn_pipeline(fetcher.clone(), sink.clone());
    settle().await;

    let state = handle.snapshot();
    assert!(state.items().is_empty());
    assert!(state.filtered_items().is_empty());
    assert!(sink.baseline_failed());
    // No retry.
    assert_eq!(fetcher.calls(), vec![None]);

    // Filtered fetches still work against the fetcher.
    handle.set_filter("app");
    settle().await;
    assert_eq!(handle.snapshot().filtered_items(), ["apple"]);
}

#[tokio::test]
async fn out_of_range_selection_is_ignored() {
    let fetcher = ScriptedFetcher::new();
    let (handle, selections) = spawn_pipeline(fetcher, RecordingSink::default());
    settle().await;

    handle.select(99);
    settle().await;

    assert!(selections.lock().unwrap().is_empty());
    let state = handle.snapshot();
    assert_eq!(state.filtered_items(), ["apple", "banana", "cherry"]);
}

#[tokio::test]
async fn disposal_mid_debounce_fires_no_fetch() {
    let fetcher = ScriptedFetcher::new();
    let (handle, _) = spawn_pipeline(fetcher.clone(), RecordingSink::default());
    settle().await;

    handle.set_filter("app");
    drop(handle);
    settle().await;

    assert_eq!(fetcher.calls(), vec![None]);
}

#[tokio::test]
async fn disposal_mid_fetch_mutates_nothing_further() {
    let fetcher = ScriptedFetcher::new().delay("app", Duration::from_secs(5));
    let (handle, _) = spawn_pipeline(fetcher.clone(), RecordingSink::default());
    settle().await;

    handle.set_filter("app");
    sleep(Duration::from_millis(250)).await;
    assert_eq!(fetcher.calls_for("app"), 1);

    let state_rx = handle.subscribe();
    drop(handle);
    settle().await;

    let state = state_rx.borrow();
    assert_eq!(state.filter(), "app");
    assert_eq!(state.filtered_items(), ["apple", "banana", "cherry"]);
}

#[tokio::test]
async fn zero_debounce_window_is_rejected_at_spawn() {
    let fetcher = ScriptedFetcher::new();
    let result = SearchPipeline::builder(fetcher, |_selected: IndexedItem<String>| {})
        .config(PipelineConfig {
            debounce_window: Duration::ZERO,
        })
        .spawn();
    assert!(matches!(result, Err(ConfigError::ZeroDebounceWindow)));
}
