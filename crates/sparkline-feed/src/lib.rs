// File: crates/sparkline-feed/src/lib.rs
// Summary: Data-fetch collaborators for sparkline charts.
// Notes:
// - The sampler in `sparkline-core` is pure; everything that touches time or the network
//   lives here: response envelopes, `(skip, limit)` paging, the loading/error/data
//   tri-state, retry with backoff, debounced and polled refreshes, remote display config.

pub mod config;
pub mod debounce;
pub mod envelope;
pub mod error;
pub mod feed;
pub mod paging;
pub mod poll;
pub mod retry;
pub mod source;
pub mod state;

pub use config::RemoteConfig;
pub use debounce::{Debouncer, Sequencer, Ticket};
pub use envelope::{parse_observations, Envelope};
pub use error::FeedError;
pub use feed::SeriesFeed;
pub use paging::{PageRequest, Pager};
pub use poll::{PollHandle, CLOCK_INTERVAL, FEED_REFRESH_INTERVAL, INDEX_REFRESH_INTERVAL};
pub use retry::{retry, RetryConfig};
pub use source::ObservationSource;
#[cfg(feature = "http")]
pub use source::HttpSource;
pub use state::FetchState;

pub type Result<T> = std::result::Result<T, FeedError>;
