use futures_util::future::join_all;
use rack_types::{
    Language, RACK_SIZE, Rack, ScoreMode, SearchOutcome, SearchStatus, SourceError, WordResult,
};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::rack_matcher::can_form;
use crate::scoring::ScoringEngine;
use crate::session::SearchSession;
use crate::word_source::{OfflineSource, WordSource};

pub const DEFAULT_MIN_LENGTH: usize = 3;
pub const DEFAULT_MAX_LENGTH: usize = RACK_SIZE;
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub language: Language,
    pub min_length: usize,
    pub max_length: usize,
    pub score_mode: ScoreMode,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            language: Language::English,
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            score_mode: ScoreMode::Base,
        }
    }
}

/// Fans a rack out to the configured word sources and merges what comes back.
pub struct LexicalSearch {
    sources: Vec<Arc<dyn WordSource>>,
    fallback: Arc<dyn OfflineSource>,
    source_timeout: Duration,
}

impl LexicalSearch {
    pub fn new(fallback: Arc<dyn OfflineSource>) -> Self {
        Self {
            sources: Vec::new(),
            fallback,
            source_timeout: DEFAULT_SOURCE_TIMEOUT,
        }
    }

    pub fn with_source(mut self, source: Arc<dyn WordSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = timeout;
        self
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.name()).collect()
    }

    pub fn source_timeout(&self) -> Duration {
        self.source_timeout
    }

    pub async fn search(&self, rack: &Rack, options: &SearchOptions) -> SearchOutcome {
        if !rack.has_enough_letters() {
            debug!("Skipping search, rack {} has too few letters", rack);
            return SearchOutcome::empty(SearchStatus::TooFewLetters);
        }

        let letters: Vec<char> = rack.letters().collect();
        let selected: Vec<&dyn WordSource> = self
            .sources
            .iter()
            .map(Arc::as_ref)
            .filter(|source| options.language.includes(source.language()))
            .collect();

        let responses = join_all(
            selected
                .iter()
                .map(|source| fetch_with_timeout(*source, &letters, self.source_timeout)),
        )
        .await;

        let mut candidates = Vec::new();
        let mut failed_sources = Vec::new();
        let mut live_languages = HashSet::new();

        for (source, response) in selected.iter().zip(responses) {
            match response {
                Ok(words) => {
                    debug!("{} returned {} candidates", source.name(), words.len());
                    live_languages.insert(source.language());
                    candidates.extend(words);
                }
                Err(e) => {
                    warn!("Word source failed, excluding it from this search: {}", e);
                    failed_sources.push(e.source_name().to_string());
                }
            }
        }

        let languages = options.language.concrete();
        let mut fallen_back = 0;
        for language in languages {
            if live_languages.contains(language) {
                continue;
            }
            fallen_back += 1;
            let offline =
                self.fallback
                    .candidates(rack, *language, options.min_length, options.max_length);
            warn!(
                "No live source answered for {:?}, using {} offline candidates",
                language,
                offline.len()
            );
            candidates.extend(offline);
        }

        let status = match fallen_back {
            0 => SearchStatus::Live,
            n if n == languages.len() => SearchStatus::Offline,
            _ => SearchStatus::Partial,
        };

        let words = merge_candidates(
            rack,
            candidates,
            options.min_length,
            options.max_length,
            options.score_mode,
        );
        info!(
            "Search for {} found {} words ({:?})",
            rack,
            words.len(),
            status
        );

        SearchOutcome {
            words,
            status,
            failed_sources,
        }
    }

    /// Search with the session's rack and settings, storing the outcome on the session
    pub async fn run(&self, session: &mut SearchSession) -> SearchStatus {
        let outcome = self.search(&session.rack, &session.options()).await;
        let status = outcome.status;
        session.record(outcome);
        status
    }
}

async fn fetch_with_timeout(
    source: &dyn WordSource,
    letters: &[char],
    timeout: Duration,
) -> Result<Vec<String>, SourceError> {
    match tokio::time::timeout(timeout, source.fetch_candidates(letters)).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout {
            source_name: source.name().to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}

/// Normalize, filter and deduplicate raw candidates, then score the survivors.
///
/// Output is in alphabetical order only as a side effect of deduplication; callers that
/// care about order sort explicitly.
pub fn merge_candidates<I>(
    rack: &Rack,
    candidates: I,
    min_length: usize,
    max_length: usize,
    mode: ScoreMode,
) -> Vec<WordResult>
where
    I: IntoIterator<Item = String>,
{
    candidates
        .into_iter()
        .map(|candidate| candidate.trim().to_ascii_lowercase())
        .filter(|word| {
            let len = word.chars().count();
            len > 0 && len >= min_length && len <= max_length
        })
        .filter(|word| can_form(word, rack))
        .collect::<BTreeSet<String>>()
        .into_iter()
        .map(|word| ScoringEngine::score_result(word, mode))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word_source::OfflineWordList;

    #[test]
    fn test_blank_candidates_never_become_results() {
        let rack = Rack::parse("catsxxxx").unwrap();
        let candidates = vec![String::new(), "   ".to_string(), "cat".to_string()];

        let merged = merge_candidates(&rack, candidates, 0, 8, ScoreMode::Base);
        let words: Vec<&str> = merged.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["cat"]);
    }

    #[test]
    fn test_merge_filters_and_dedups() {
        let rack = Rack::parse("catsxxxx").unwrap();
        let candidates = vec![
            "CAT".to_string(),
            "cat".to_string(),
            "at".to_string(),
            "cast".to_string(),
            "coat".to_string(),
            " acts ".to_string(),
        ];

        let merged = merge_candidates(&rack, candidates, 3, 8, ScoreMode::Base);
        let words: Vec<&str> = merged.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["acts", "cast", "cat"]);
        assert_eq!(merged[2].score, 5);
    }

    #[test]
    fn test_merge_honors_max_length() {
        let rack = Rack::parse("aabbccdd").unwrap();
        let merged = merge_candidates(
            &rack,
            vec!["abcd".to_string(), "abcdabcd".to_string()],
            3,
            4,
            ScoreMode::Base,
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].word, "abcd");
    }

    #[tokio::test]
    async fn test_no_sources_is_offline() {
        let fallback = Arc::new(OfflineWordList::from_word_list("cat\nact\ndog"));
        let search = LexicalSearch::new(fallback);
        let rack = Rack::parse("catxxxxx").unwrap();

        let outcome = search.search(&rack, &SearchOptions::default()).await;
        assert_eq!(outcome.status, SearchStatus::Offline);
        assert!(outcome.is_degraded());
        assert!(outcome.contains("cat"));
        assert!(outcome.contains("act"));
        assert!(!outcome.contains("dog"));
    }

    #[tokio::test]
    async fn test_too_few_letters_is_empty() {
        let fallback = Arc::new(OfflineWordList::from_word_list("at"));
        let search = LexicalSearch::new(fallback);
        let rack = Rack::parse("at").unwrap();

        let outcome = search.search(&rack, &SearchOptions::default()).await;
        assert_eq!(outcome.status, SearchStatus::TooFewLetters);
        assert!(outcome.words.is_empty());
    }
}
