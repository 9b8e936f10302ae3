// Re-exports from musicbucket-mod-history and the bridge from app config.
pub use musicbucket_mod_history::{History, HistoryConfig, HistoryPosition};

use musicbucket_config::AppConfig;

/// History settings taken from the app config.
pub fn history_config(config: &AppConfig) -> HistoryConfig {
    match config.max_history_snapshots {
        Some(max) => HistoryConfig::bounded(max),
        None => HistoryConfig::unbounded(),
    }
}
