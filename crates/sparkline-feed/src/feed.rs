// File: crates/sparkline-feed/src/feed.rs
// Summary: Paged loader that accumulates observations and resamples after every page.
// Notes:
// - A failed page never discards what is already on screen; `Failed` is only surfaced
//   while nothing has loaded yet. The error is still kept in `last_error`.

use sparkline_core::{sample, Observation, SampleOptions, SampledSeries};

use crate::envelope::parse_observations;
use crate::paging::Pager;
use crate::retry::{retry, RetryConfig};
use crate::source::ObservationSource;
use crate::state::FetchState;

pub struct SeriesFeed<S> {
    source: S,
    pager: Pager,
    retry: RetryConfig,
    options: SampleOptions,
    observations: Vec<Observation>,
    state: FetchState<SampledSeries>,
    last_error: Option<String>,
}

impl<S: ObservationSource> SeriesFeed<S> {
    pub const DEFAULT_PAGE_SIZE: usize = 100;

    pub fn new(source: S, options: SampleOptions) -> Self {
        Self {
            source,
            pager: Pager::new(Self::DEFAULT_PAGE_SIZE),
            retry: RetryConfig::default(),
            options,
            observations: Vec::new(),
            state: FetchState::Loading,
            last_error: None,
        }
    }

    pub fn with_pager(mut self, pager: Pager) -> Self {
        self.pager = pager;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Fetch the next page and return what the chart should show.
    /// A no-op returning the current state while a page is in flight or paging is exhausted.
    pub async fn load_next(&mut self) -> FetchState<SampledSeries> {
        let Some(page) = self.pager.begin() else {
            return self.state.clone();
        };

        let source = &self.source;
        let fetched = retry(&self.retry, || source.fetch_page(page)).await;
        let parsed = fetched.and_then(|body| parse_observations(&body));

        match parsed {
            Ok(batch) => {
                tracing::debug!(skip = page.skip, received = batch.len(), "page loaded");
                self.pager.complete(batch.len());
                self.observations.extend(batch);
                self.last_error = None;
                self.resample();
            }
            Err(e) => {
                tracing::warn!(skip = page.skip, error = %e, "page failed");
                self.pager.fail();
                self.last_error = Some(e.to_string());
                if self.observations.is_empty() {
                    self.state = FetchState::Failed(e.to_string());
                }
            }
        }
        self.state.clone()
    }

    /// Drop everything and load the first page again.
    pub async fn refresh(&mut self) -> FetchState<SampledSeries> {
        self.reset();
        self.load_next().await
    }

    pub fn reset(&mut self) {
        self.pager.reset();
        self.observations.clear();
        self.state = FetchState::Loading;
        self.last_error = None;
    }

    /// Swap presets (e.g. intraday to multi-day) without refetching.
    pub fn set_options(&mut self, options: SampleOptions) {
        self.options = options;
        if !matches!(self.state, FetchState::Loading | FetchState::Failed(_)) {
            self.resample();
        }
    }

    fn resample(&mut self) {
        self.state = FetchState::Ready(sample(&self.observations, &self.options));
    }

    pub fn state(&self) -> &FetchState<SampledSeries> { &self.state }

    pub fn observations(&self) -> &[Observation] { &self.observations }

    pub fn options(&self) -> &SampleOptions { &self.options }

    pub fn has_more(&self) -> bool { self.pager.has_more() }

    pub fn last_error(&self) -> Option<&str> { self.last_error.as_deref() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::PageRequest;
    use crate::{FeedError, Result};
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::Mutex;

    const T0: i64 = 1_714_555_800;

    #[derive(Default)]
    struct ScriptedSource {
        pages: Mutex<VecDeque<Result<String>>>,
        requests: Mutex<Vec<PageRequest>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<String>>) -> Self {
            Self { pages: Mutex::new(pages.into()), requests: Mutex::default() }
        }

        fn requests(&self) -> Vec<PageRequest> { self.requests.lock().unwrap().clone() }
    }

    impl ObservationSource for ScriptedSource {
        fn fetch_page(&self, page: PageRequest) -> impl Future<Output = Result<String>> + Send {
            self.requests.lock().unwrap().push(page);
            let next = self.pages.lock().unwrap().pop_front().unwrap_or_else(|| Ok("[]".to_string()));
            std::future::ready(next)
        }
    }

    fn page(start: i64, values: &[f64]) -> Result<String> {
        let items: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(i, v)| serde_json::json!({ "price": v, "timestamp": T0 + (start + i as i64) * 60 }))
            .collect();
        Ok(serde_json::json!({ "result": items }).to_string())
    }

    fn feed(pages: Vec<Result<String>>) -> SeriesFeed<ScriptedSource> {
        SeriesFeed::new(ScriptedSource::new(pages), SampleOptions::intraday())
            .with_pager(Pager::new(3))
            .with_retry(RetryConfig { jitter: false, ..RetryConfig::default() })
    }

    #[tokio::test]
    async fn pages_accumulate_until_exhausted() {
        let mut f = feed(vec![page(0, &[10.0, 11.0, 12.0]), page(3, &[13.0, 12.0])]);

        let first = f.load_next().await;
        assert_eq!(first.ready().map(|s| s.stats.valid), Some(3));
        let second = f.load_next().await;
        assert_eq!(second.ready().map(|s| s.stats.valid), Some(5));

        f.load_next().await;
        assert!(f.has_more());
        f.load_next().await;
        assert!(!f.has_more());

        let skips: Vec<_> = f.source.requests().iter().map(|r| r.skip).collect();
        assert_eq!(skips, vec![0, 3, 6, 9]);
        assert_eq!(f.load_next().await.ready().map(|s| s.stats.valid), Some(5));
        assert_eq!(f.source.requests().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_are_retried_within_one_load() {
        let mut f = feed(vec![
            Err(FeedError::ServerError { status: 503, body: String::new() }),
            page(0, &[1.0, 2.0]),
        ]);
        let state = f.load_next().await;
        assert!(state.ready().is_some());
        assert_eq!(f.source.requests().len(), 2);
        assert_eq!(f.last_error(), None);
    }

    #[tokio::test]
    async fn first_page_failure_surfaces_and_is_retried_next_call() {
        let mut f = feed(vec![Ok("{\"error\": \"nope\"}".to_string()), page(0, &[5.0, 6.0])]);
        let state = f.load_next().await;
        assert!(state.error().is_some());

        let state = f.load_next().await;
        assert!(state.ready().is_some());
        let skips: Vec<_> = f.source.requests().iter().map(|r| r.skip).collect();
        assert_eq!(skips, vec![0, 0]);
    }

    #[tokio::test]
    async fn later_failure_keeps_the_chart() {
        let mut f = feed(vec![
            page(0, &[5.0, 6.0, 7.0]),
            Err(FeedError::ServerError { status: 400, body: "bad skip".into() }),
        ]);
        f.load_next().await;
        let state = f.load_next().await;
        assert!(state.ready().is_some());
        assert!(f.last_error().is_some_and(|e| e.contains("bad skip")));
    }

    #[tokio::test]
    async fn malformed_records_do_not_fail_the_page() {
        let body = format!(
            r#"[{{"price": 10.0, "timestamp": {T0}}}, {{"price": 11.0, "timestamp": null}}, {{"price": 12.0, "timestamp": {}}}]"#,
            T0 + 120
        );
        let mut f = feed(vec![Ok(body)]);
        let state = f.load_next().await;
        let series = state.ready().expect("page with a bad record still loads");
        assert_eq!(series.stats.received, 3);
        assert_eq!(series.stats.valid, 2);
        assert_eq!(f.last_error(), None);
    }

    #[tokio::test]
    async fn refresh_starts_from_the_first_page() {
        let mut f = feed(vec![page(0, &[1.0, 2.0, 3.0]), page(0, &[4.0])]);
        f.load_next().await;
        let state = f.refresh().await;
        assert_eq!(f.observations().len(), 1);
        assert!(state.ready().is_some_and(|s| s.len() == 2 && s.stats.valid == 1));
        let skips: Vec<_> = f.source.requests().iter().map(|r| r.skip).collect();
        assert_eq!(skips, vec![0, 0]);
    }

    #[tokio::test]
    async fn switching_presets_resamples_in_place() {
        let mut f = feed(vec![page(0, &[1.0, 2.0, 3.0])]);
        f.load_next().await;
        f.set_options(SampleOptions::mini());
        let series = f.state().ready().cloned().unwrap();
        assert!(series.fill_path.is_some());
        assert_eq!(f.source.requests().len(), 1);
    }
}
