// File: crates/sparkline-core/src/mode.rs
// Summary: Session-scoped display-mode store (entity name -> chart mode), injected where needed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// What a chart plots for an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartMode {
    #[default]
    Price,
    Rank,
}

impl ChartMode {
    pub fn toggled(self) -> Self {
        match self {
            ChartMode::Price => ChartMode::Rank,
            ChartMode::Rank => ChartMode::Price,
        }
    }
}

/// Explicit entity → mode map. Unset entities read as `M::default()`.
#[derive(Clone, Debug, Default)]
pub struct DisplayModeStore<M = ChartMode> {
    modes: HashMap<String, M>,
}

impl<M: Copy + Default> DisplayModeStore<M> {
    pub fn new() -> Self {
        Self { modes: HashMap::new() }
    }

    pub fn get(&self, entity: &str) -> M {
        self.modes.get(entity).copied().unwrap_or_default()
    }

    /// Set the mode for `entity`, returning the previous one.
    pub fn set(&mut self, entity: impl Into<String>, mode: M) -> M {
        self.modes.insert(entity.into(), mode).unwrap_or_default()
    }

    /// Apply `f` to the current mode of `entity` and store the result.
    pub fn update(&mut self, entity: &str, f: impl FnOnce(M) -> M) -> M {
        let next = f(self.get(entity));
        self.modes.insert(entity.to_string(), next);
        next
    }

    pub fn remove(&mut self, entity: &str) -> Option<M> {
        self.modes.remove(entity)
    }

    pub fn clear(&mut self) {
        self.modes.clear();
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_entities_use_default() {
        let store: DisplayModeStore = DisplayModeStore::new();
        assert_eq!(store.get("bitcoin"), ChartMode::Price);
        assert!(store.is_empty());
    }

    #[test]
    fn set_and_update_are_per_entity() {
        let mut store = DisplayModeStore::new();
        assert_eq!(store.set("bitcoin", ChartMode::Rank), ChartMode::Price);
        assert_eq!(store.update("ethereum", ChartMode::toggled), ChartMode::Rank);
        assert_eq!(store.update("bitcoin", ChartMode::toggled), ChartMode::Price);
        assert_eq!(store.get("ethereum"), ChartMode::Rank);
        assert_eq!(store.len(), 2);
        assert_eq!(store.remove("ethereum"), Some(ChartMode::Rank));
        store.clear();
        assert!(store.is_empty());
    }
}
