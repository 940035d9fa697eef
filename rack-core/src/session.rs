use rack_types::{Language, Rack, RackError, ScoreMode, SearchOutcome, SortStrategy, WordResult};

use crate::filters;
use crate::lexical_search::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, SearchOptions};
use crate::scoring::ScoringEngine;

/// Everything a single player's search interaction carries between operations.
#[derive(Debug, Clone)]
pub struct SearchSession {
    pub language: Language,
    pub rack: Rack,
    pub min_length: usize,
    pub max_length: usize,
    pub score_mode: ScoreMode,
    last_outcome: Option<SearchOutcome>,
}

impl SearchSession {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            rack: Rack::new(),
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            score_mode: ScoreMode::Base,
            last_outcome: None,
        }
    }

    pub fn with_rack(mut self, rack: Rack) -> Self {
        self.rack = rack;
        self
    }

    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            language: self.language,
            min_length: self.min_length,
            max_length: self.max_length,
            score_mode: self.score_mode,
        }
    }

    pub fn set_letter(&mut self, index: usize, letter: Option<char>) -> Result<(), RackError> {
        self.rack.set_slot(index, letter)
    }

    /// Empty the rack and forget the previous results
    pub fn clear(&mut self) {
        self.rack.clear();
        self.last_outcome = None;
    }

    pub fn record(&mut self, outcome: SearchOutcome) {
        self.last_outcome = Some(outcome);
    }

    pub fn last_outcome(&self) -> Option<&SearchOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn results(&self) -> &[WordResult] {
        self.last_outcome
            .as_ref()
            .map(|outcome| outcome.words.as_slice())
            .unwrap_or(&[])
    }

    pub fn sorted_results(&self, strategy: SortStrategy) -> Vec<WordResult> {
        let mut results = self.results().to_vec();
        ScoringEngine::sort_results(&mut results, strategy);
        results
    }

    /// Results matching a query: `?` wildcards make it a whole-word pattern, otherwise a substring
    pub fn filtered_results(&self, query: &str) -> Vec<WordResult> {
        filters::filter_results(self.results(), query)
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(Language::English)
    }
}
