use anyhow::{Context, Result};
use async_trait::async_trait;
use rack_types::{Language, Rack, SourceError};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};

use crate::rack_matcher::can_form;

/// Any provider of candidate words for a rack, typically a remote dictionary API.
///
/// Implementations do not need to filter by the rack; the search pipeline does that.
#[async_trait]
pub trait WordSource: Send + Sync {
    fn name(&self) -> &str;

    /// The concrete language this source serves (never `Language::Both`)
    fn language(&self) -> Language;

    async fn fetch_candidates(&self, letters: &[char]) -> Result<Vec<String>, SourceError>;
}

/// The always-available fallback used when live sources fail
pub trait OfflineSource: Send + Sync {
    fn candidates(
        &self,
        rack: &Rack,
        language: Language,
        min_length: usize,
        max_length: usize,
    ) -> Vec<String>;
}

/// A word list held in memory, loaded from newline-separated text
#[derive(Debug, Clone, Default)]
pub struct OfflineWordList {
    words: BTreeSet<String>,
}

impl OfflineWordList {
    /// Build from text with one word per line; `#` starts a comment line
    pub fn from_word_list(word_list: &str) -> Self {
        let words = word_list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|word| word.to_ascii_lowercase())
            .filter(|word| word.chars().all(|ch| ch.is_ascii_lowercase()))
            .collect();

        Self { words }
    }

    /// Load every `.txt` file in a directory into a single list
    pub fn from_directory<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut list = Self::default();

        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read word directory {}", dir.display()))?;

        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
                continue;
            }

            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read word file {}", path.display()))?;
            let before = list.len();
            list.extend(Self::from_word_list(&contents));
            info!(
                "Loaded {} words from {}",
                list.len() - before,
                path.display()
            );
        }

        Ok(list)
    }

    pub fn extend(&mut self, other: OfflineWordList) {
        self.words.extend(other.words);
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.trim().to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word_count_by_length(&self, length: usize) -> usize {
        self.words.iter().filter(|word| word.len() == length).count()
    }

    /// Words in the list that fit the length bounds and can be spelled from `rack`
    pub fn formable_words(&self, rack: &Rack, min_length: usize, max_length: usize) -> Vec<String> {
        self.words
            .iter()
            .filter(|word| word.len() >= min_length && word.len() <= max_length)
            .filter(|word| can_form(word, rack))
            .cloned()
            .collect()
    }
}

/// Offline word lists per language
#[derive(Debug, Clone, Default)]
pub struct OfflineDictionary {
    pub english: OfflineWordList,
    pub malay: OfflineWordList,
}

impl OfflineDictionary {
    pub fn new(english: OfflineWordList, malay: OfflineWordList) -> Self {
        Self { english, malay }
    }

    /// Load `<dir>/english` and `<dir>/malay`; a missing language directory yields an empty list
    pub fn from_directory<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let english = Self::load_language(&dir.join("english"))?;
        let malay = Self::load_language(&dir.join("malay"))?;

        if english.is_empty() && malay.is_empty() {
            // flat layout: every list in the directory is English
            return Ok(Self::new(OfflineWordList::from_directory(dir)?, malay));
        }

        Ok(Self::new(english, malay))
    }

    fn load_language(dir: &Path) -> Result<OfflineWordList> {
        if dir.is_dir() {
            OfflineWordList::from_directory(dir)
        } else {
            warn!("No offline word directory at {}", dir.display());
            Ok(OfflineWordList::default())
        }
    }

    pub fn list(&self, language: Language) -> Option<&OfflineWordList> {
        match language {
            Language::English => Some(&self.english),
            Language::Malay => Some(&self.malay),
            Language::Both => None,
        }
    }
}

impl OfflineSource for OfflineDictionary {
    fn candidates(
        &self,
        rack: &Rack,
        language: Language,
        min_length: usize,
        max_length: usize,
    ) -> Vec<String> {
        let mut words = BTreeSet::new();
        for concrete in language.concrete() {
            if let Some(list) = self.list(*concrete) {
                words.extend(list.formable_words(rack, min_length, max_length));
            }
        }
        words.into_iter().collect()
    }
}

impl OfflineSource for OfflineWordList {
    fn candidates(
        &self,
        rack: &Rack,
        _language: Language,
        min_length: usize,
        max_length: usize,
    ) -> Vec<String> {
        self.formable_words(rack, min_length, max_length)
    }
}
