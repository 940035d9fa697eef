use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Language {
    #[default]
    English,
    Malay,
    Both,
}

impl Language {
    /// Whether a selection covers words of the given language
    pub fn includes(self, other: Language) -> bool {
        self == Language::Both || other == Language::Both || self == other
    }

    /// The concrete languages a selection expands to
    pub fn concrete(self) -> &'static [Language] {
        match self {
            Language::English => &[Language::English],
            Language::Malay => &[Language::Malay],
            Language::Both => &[Language::English, Language::Malay],
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "my" | "ms" | "malay" => Ok(Language::Malay),
            "both" => Ok(Language::Both),
            other => Err(format!("Unknown language: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordResult {
    pub word: String,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScoreMode {
    /// Sum of letter values
    #[default]
    Base,
    /// Letter values with the length multiplier applied
    Bonused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SortStrategy {
    Score,
    Length,
    Alphabetical,
    Common,
}

impl FromStr for SortStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "score" | "score-desc" => Ok(SortStrategy::Score),
            "length" | "length-desc" => Ok(SortStrategy::Length),
            "alpha" | "alphabetical" => Ok(SortStrategy::Alphabetical),
            "common" => Ok(SortStrategy::Common),
            other => Err(format!("Unknown sort strategy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SearchStatus {
    /// Every selected language was served by at least one live source
    Live,
    /// Some languages fell back to the offline dictionary
    Partial,
    /// Nothing live answered; results come from the offline dictionary only
    Offline,
    /// The rack had fewer than three letters; no search was run
    TooFewLetters,
}

impl SearchStatus {
    pub fn is_degraded(self) -> bool {
        matches!(self, SearchStatus::Partial | SearchStatus::Offline)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchOutcome {
    pub words: Vec<WordResult>,
    pub status: SearchStatus,
    pub failed_sources: Vec<String>,
}

impl SearchOutcome {
    pub fn empty(status: SearchStatus) -> Self {
        Self {
            words: Vec::new(),
            status,
            failed_sources: Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.status.is_degraded()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|result| result.word == word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_selection() {
        assert!(Language::Both.includes(Language::Malay));
        assert!(Language::English.includes(Language::English));
        assert!(!Language::English.includes(Language::Malay));
        assert_eq!(Language::Both.concrete().len(), 2);
        assert_eq!("my".parse::<Language>().unwrap(), Language::Malay);
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn test_sort_strategy_aliases() {
        assert_eq!("score-desc".parse::<SortStrategy>().unwrap(), SortStrategy::Score);
        assert_eq!("alpha".parse::<SortStrategy>().unwrap(), SortStrategy::Alphabetical);
        assert!("random".parse::<SortStrategy>().is_err());
    }

    #[test]
    fn test_degraded_flags() {
        assert!(!SearchStatus::Live.is_degraded());
        assert!(SearchStatus::Partial.is_degraded());
        assert!(SearchStatus::Offline.is_degraded());
        assert!(!SearchOutcome::empty(SearchStatus::TooFewLetters).is_degraded());
    }
}
