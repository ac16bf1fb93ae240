// File: crates/sparkline-feed/src/state.rs
// Summary: Loading / error-with-message / data tri-state exposed to the rendering layer.

/// What a chart widget shows: spinner, error text with retry, or data.
/// The sampler is only run once a fetch lands in `Ready`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FetchState<T> {
    #[default]
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool { matches!(self, FetchState::Loading) }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Loading => FetchState::Loading,
            FetchState::Failed(msg) => FetchState::Failed(msg),
            FetchState::Ready(v) => FetchState::Ready(f(v)),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for FetchState<T> {
    fn from(r: Result<T, E>) -> Self {
        match r {
            Ok(v) => FetchState::Ready(v),
            Err(e) => FetchState::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_result() {
        let ok: FetchState<u32> = Ok::<u32, String>(3).into();
        assert_eq!(ok.ready(), Some(&3));
        let err: FetchState<u32> = Err::<u32, _>("timeout".to_string()).into();
        assert_eq!(err.error(), Some("timeout"));
        assert!(FetchState::<u32>::default().is_loading());
    }

    #[test]
    fn map_keeps_non_ready_states() {
        let failed: FetchState<u32> = FetchState::Failed("x".into());
        assert_eq!(failed.map(|v| v * 2), FetchState::Failed("x".into()));
        assert_eq!(FetchState::Ready(2).map(|v| v * 2), FetchState::Ready(4));
    }
}
