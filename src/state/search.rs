/// Incremental search engine for the header search field
///
/// Two independent result streams feed the suggestion list:
/// - local candidates: a prefix filter over the Movie Snapshot fetched once
///   at startup, shrinking the prefix until something matches
/// - server results: a debounced `GET /movie?title=` search
///
/// Suggestions are server results followed by local candidates, without
/// deduplication, hidden whenever the query is empty.

use crate::state::data::Movie;
use std::time::Duration;

/// Idle window before a keystroke triggers a server search.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// How many results to ask the server for per search.
pub const SERVER_SEARCH_LIMIT: u32 = 5;

#[derive(Debug, Default)]
pub struct SearchEngine {
    query: String,
    /// Full movie list fetched once at startup. Intentionally never
    /// invalidated: it only powers the local fallback, not the primary
    /// search results.
    snapshot: Vec<Movie>,
    /// Prefix-filtered candidates from the snapshot
    local: Vec<Movie>,
    /// Last applied server search results
    remote: Vec<Movie>,
    /// Debounce timer generation. Each keystroke bumps it; a timer that
    /// fires with a stale generation is ignored, which is what "cancels"
    /// the pending server search.
    generation: u64,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the Movie Snapshot. Local candidates are recomputed in case
    /// the user typed before the startup fetch finished.
    pub fn set_snapshot(&mut self, movies: Vec<Movie>) {
        self.snapshot = movies;
        self.local = local_candidates(&self.snapshot, &self.query);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Record a keystroke. Returns the generation to schedule a debounce
    /// timer for, or None when the query became empty (server results are
    /// cleared immediately and no call is issued).
    pub fn input(&mut self, query: String) -> Option<u64> {
        self.query = query;
        self.local = local_candidates(&self.snapshot, &self.query);
        self.generation = self.generation.wrapping_add(1);

        if self.query.is_empty() {
            self.remote.clear();
            None
        } else {
            Some(self.generation)
        }
    }

    /// A debounce timer fired. Returns the query to search for, or None if
    /// the timer is stale (another keystroke replaced it) or the query has
    /// been cleared meanwhile.
    pub fn debounce_fired(&self, generation: u64) -> Option<String> {
        if generation == self.generation && !self.query.is_empty() {
            Some(self.query.clone())
        } else {
            None
        }
    }

    /// Apply results of a server search issued for `searched` .
    ///
    /// One-character queries get a defensive client-side prefix filter in
    /// case the server matched more broadly. There is no sequence guard: a
    /// slow response for an older query overwrites newer results, matching
    /// the original behavior.
    pub fn apply_server_results(&mut self, searched: &str, results: Vec<Movie>) {
        if self.query.is_empty() {
            // Suggestions already dismissed
            return;
        }

        if searched.chars().count() == 1 {
            let prefix = searched.to_lowercase();
            self.remote = results
                .into_iter()
                .filter(|movie| movie.title.to_lowercase().starts_with(&prefix))
                .collect();
        } else {
            self.remote = results;
        }
    }

    /// Dismiss the search entirely (clear button, navigation).
    pub fn clear(&mut self) {
        self.query.clear();
        self.local.clear();
        self.remote.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Whether the suggestion dropdown should be visible at all.
    pub fn has_suggestions(&self) -> bool {
        !self.query.is_empty() && (!self.remote.is_empty() || !self.local.is_empty())
    }

    /// Server results first, then local candidates. Duplicates are kept.
    pub fn suggestions(&self) -> impl Iterator<Item = &Movie> {
        self.remote.iter().chain(self.local.iter())
    }
}

/// Filter the snapshot by case-insensitive "title starts with query".
///
/// When nothing matches and the query is longer than one character, the
/// last character is dropped and the filter retried, until a non-empty
/// match set is found or a single character remains. A one-character query
/// that matches nothing yields the empty set.
fn local_candidates(snapshot: &[Movie], query: &str) -> Vec<Movie> {
    let mut prefix: Vec<char> = query.to_lowercase().chars().collect();
    if prefix.is_empty() {
        return Vec::new();
    }

    loop {
        let needle: String = prefix.iter().collect();
        let matched: Vec<Movie> = snapshot
            .iter()
            .filter(|movie| movie.title.to_lowercase().starts_with(&needle))
            .cloned()
            .collect();

        if !matched.is_empty() || prefix.len() <= 1 {
            return matched;
        }
        prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            ..Movie::default()
        }
    }

    fn snapshot() -> Vec<Movie> {
        vec![
            movie(1, "Batman Begins"),
            movie(2, "Battleship"),
            movie(3, "Catch Me If You Can"),
        ]
    }

    #[test]
    fn test_exact_prefix_match() {
        let found = local_candidates(&snapshot(), "batm");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Batman Begins");
    }

    #[test]
    fn test_prefix_match_is_case_insensitive() {
        let found = local_candidates(&snapshot(), "BAT");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_shrinks_until_a_prefix_matches() {
        // "batz" matches nothing, "bat" matches two
        let found = local_candidates(&snapshot(), "batzzz");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_single_char_without_match_is_empty() {
        // Cannot shrink below one character
        assert!(local_candidates(&snapshot(), "z").is_empty());
    }

    #[test]
    fn test_shrinking_stops_at_length_one() {
        // No title starts with "x", at any prefix length
        assert!(local_candidates(&snapshot(), "xyzzy").is_empty());
    }

    #[test]
    fn test_only_last_keystroke_survives_debounce() {
        let mut engine = SearchEngine::new();
        engine.set_snapshot(snapshot());

        // "b", "ba", "bat" arrive faster than the debounce window; only
        // the last timer generation is still valid when it fires.
        let g1 = engine.input("b".into()).unwrap();
        let g2 = engine.input("ba".into()).unwrap();
        let g3 = engine.input("bat".into()).unwrap();

        assert_eq!(engine.debounce_fired(g1), None);
        assert_eq!(engine.debounce_fired(g2), None);
        assert_eq!(engine.debounce_fired(g3), Some("bat".to_string()));
    }

    #[test]
    fn test_empty_query_clears_server_results_and_schedules_nothing() {
        let mut engine = SearchEngine::new();
        engine.set_snapshot(snapshot());

        engine.input("bat".into());
        engine.apply_server_results("bat", vec![movie(9, "Batman Returns")]);
        assert!(engine.has_suggestions());

        assert_eq!(engine.input(String::new()), None);
        assert!(!engine.has_suggestions());
        assert_eq!(engine.suggestions().count(), 0);
    }

    #[test]
    fn test_single_char_server_results_get_prefix_filtered() {
        let mut engine = SearchEngine::new();
        engine.input("b".into());
        engine.apply_server_results(
            "b",
            vec![movie(1, "Batman Begins"), movie(2, "The Big Short")],
        );

        // "The Big Short" matched the server's broader search but does not
        // start with "b"
        let titles: Vec<&str> = engine.suggestions().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Batman Begins"]);
    }

    #[test]
    fn test_suggestions_concatenate_server_then_local_without_dedup() {
        let mut engine = SearchEngine::new();
        engine.set_snapshot(snapshot());
        engine.input("batman".into());
        engine.apply_server_results("batman", vec![movie(1, "Batman Begins")]);

        let ids: Vec<i64> = engine.suggestions().map(|m| m.id).collect();
        // Movie 1 appears in both streams and is shown twice
        assert_eq!(ids, vec![1, 1]);
    }

    #[test]
    fn test_late_snapshot_recomputes_local_candidates() {
        let mut engine = SearchEngine::new();
        engine.input("bat".into());
        assert_eq!(engine.suggestions().count(), 0);

        engine.set_snapshot(snapshot());
        assert_eq!(engine.suggestions().count(), 2);
    }
}
