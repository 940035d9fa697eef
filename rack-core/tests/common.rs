#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rack_core::{LexicalSearch, OfflineDictionary, OfflineWordList, WordSource};
use rack_types::{ChallengeHistory, DailyChallenge, Language, Rack, SourceError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// English fallback words used across the integration tests
pub const ENGLISH_WORDS: &str = "# test list\ncat\nact\ncast\ncats\nscat\ntaco\ncoat\ndog\nstoat";
pub const MALAY_WORDS: &str = "kata\nbata\natas\ntas";

pub fn create_test_dictionary() -> OfflineDictionary {
    OfflineDictionary::new(
        OfflineWordList::from_word_list(ENGLISH_WORDS),
        OfflineWordList::from_word_list(MALAY_WORDS),
    )
}

#[derive(Debug, Clone)]
pub enum FakeBehavior {
    Answer(Vec<String>),
    Fail,
    Hang,
}

/// Scripted word source that records every request it receives
#[derive(Clone)]
pub struct FakeSource {
    name: String,
    language: Language,
    behavior: FakeBehavior,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeSource {
    pub fn answering(name: &str, language: Language, words: &[&str]) -> Self {
        Self::with_behavior(
            name,
            language,
            FakeBehavior::Answer(words.iter().map(|w| w.to_string()).collect()),
        )
    }

    pub fn failing(name: &str, language: Language) -> Self {
        Self::with_behavior(name, language, FakeBehavior::Fail)
    }

    pub fn hanging(name: &str, language: Language) -> Self {
        Self::with_behavior(name, language, FakeBehavior::Hang)
    }

    fn with_behavior(name: &str, language: Language, behavior: FakeBehavior) -> Self {
        Self {
            name: name.to_string(),
            language,
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl WordSource for FakeSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn language(&self) -> Language {
        self.language
    }

    async fn fetch_candidates(&self, letters: &[char]) -> Result<Vec<String>, SourceError> {
        self.requests
            .lock()
            .unwrap()
            .push(letters.iter().collect());

        match &self.behavior {
            FakeBehavior::Answer(words) => Ok(words.clone()),
            FakeBehavior::Fail => Err(SourceError::Status {
                source_name: self.name.clone(),
                status: 503,
            }),
            FakeBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(Vec::new())
            }
        }
    }
}

/// Search over the test dictionary with a short timeout and the given sources
pub fn create_test_search(sources: Vec<FakeSource>) -> LexicalSearch {
    sources.into_iter().fold(
        LexicalSearch::new(Arc::new(create_test_dictionary()))
            .with_timeout(Duration::from_millis(100)),
        |search, source| search.with_source(Arc::new(source)),
    )
}

pub fn rack(text: &str) -> Rack {
    Rack::parse(text).expect("test rack should parse")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn timestamp(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

/// History with a completed challenge on each of the given days
pub fn completed_history(days: &[NaiveDate]) -> ChallengeHistory {
    days.iter()
        .map(|day| {
            let mut challenge = DailyChallenge::new(*day, rack("abcdefgh"), 50);
            challenge.completed = true;
            (*day, challenge)
        })
        .collect()
}

pub fn words(outcome_words: &[rack_types::WordResult]) -> Vec<&str> {
    outcome_words.iter().map(|r| r.word.as_str()).collect()
}
