/// Smallest cap accepted for a bounded history. A timeline must always
/// hold the active snapshot.
const MIN_MAX_SNAPSHOTS: usize = 1;

/// Configuration for a `History` instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryConfig {
    /// Max snapshots retained in the timeline, including the active one.
    /// `None` keeps every snapshot for the lifetime of the session.
    pub max_snapshots: Option<usize>,
}

impl HistoryConfig {
    /// Unbounded history: every committed snapshot is retained.
    pub fn unbounded() -> Self {
        Self {
            max_snapshots: None,
        }
    }

    /// Bounded history that evicts the oldest snapshots past `max`.
    ///
    /// Values below 1 are raised to 1.
    pub fn bounded(max: usize) -> Self {
        Self {
            max_snapshots: Some(max.max(MIN_MAX_SNAPSHOTS)),
        }
    }

    /// Returns the effective cap, clamped to the minimum.
    pub(crate) fn effective_cap(&self) -> Option<usize> {
        self.max_snapshots.map(|max| max.max(MIN_MAX_SNAPSHOTS))
    }
}
