use std::collections::HashMap;

/// Entries kept per difficulty key, fastest first.
pub const MAX_SCORES: usize = 5;

/// Persistence seam for the score ledger. Anything that maps string keys to
/// string values can back the board; implementations swallow their own I/O
/// failures (a lost leaderboard is not fatal).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// Per-difficulty best-time ledger, capped at [`MAX_SCORES`] ascending
/// entries. Stored as a JSON integer array of elapsed seconds under the
/// difficulty's score key.
#[derive(Clone, Debug, Default)]
pub struct ScoreBoard<S> {
    store: S,
}

impl<S: KeyValueStore> ScoreBoard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Records a winning time and returns the updated top list.
    pub fn record_win(&mut self, key: &str, elapsed_secs: u32) -> Vec<u32> {
        let mut scores = self.top_scores(key);
        scores.push(elapsed_secs);
        scores.sort_unstable();
        scores.truncate(MAX_SCORES);

        match serde_json::to_string(&scores) {
            Ok(raw) => self.store.set(key, raw),
            Err(err) => log::warn!("failed to serialize scores for {key}: {err}"),
        }
        scores
    }

    /// Stored best times for a difficulty, fastest first. Missing or
    /// unreadable data counts as no scores.
    pub fn top_scores(&self, key: &str) -> Vec<u32> {
        let Some(raw) = self.store.get(key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(scores) => scores,
            Err(err) => {
                log::warn!("discarding malformed scores for {key}: {err}");
                Vec::new()
            }
        }
    }
}

/// In-memory store for tests and embedders without real persistence.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }
}
