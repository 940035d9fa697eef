use rack_types::{ScoreMode, SortStrategy, WordResult};
use std::cmp::Reverse;

/// Words that the `Common` sort strategy floats to the top, in priority order
pub const COMMON_WORDS: [&str; 7] = ["the", "and", "you", "that", "was", "for", "are"];

pub struct ScoringEngine;

impl ScoringEngine {
    /// Point value of a single letter; anything outside a-z is worth nothing
    pub fn letter_value(letter: char) -> u32 {
        match letter.to_ascii_lowercase() {
            'a' | 'e' | 'i' | 'l' | 'n' | 'o' | 'r' | 's' | 't' | 'u' => 1,
            'd' | 'g' => 2,
            'b' | 'c' | 'm' | 'p' => 3,
            'f' | 'h' | 'v' | 'w' | 'y' => 4,
            'k' => 5,
            'j' | 'x' => 8,
            'q' | 'z' => 10,
            _ => 0,
        }
    }

    /// Sum of letter values
    pub fn base_score(word: &str) -> u32 {
        word.chars().map(Self::letter_value).sum()
    }

    /// Base score with the length multiplier: x2 from seven letters, x1.5 (floored) for five or six
    pub fn bonused_score(word: &str) -> u32 {
        let base = Self::base_score(word);
        match word.chars().count() {
            len if len >= 7 => base * 2,
            5 | 6 => base * 3 / 2,
            _ => base,
        }
    }

    pub fn score_word(word: &str, mode: ScoreMode) -> u32 {
        match mode {
            ScoreMode::Base => Self::base_score(word),
            ScoreMode::Bonused => Self::bonused_score(word),
        }
    }

    pub fn aggregate_score<'a, I>(words: I, mode: ScoreMode) -> u32
    where
        I: IntoIterator<Item = &'a str>,
    {
        words
            .into_iter()
            .map(|word| Self::score_word(word, mode))
            .sum()
    }

    pub fn score_result(word: String, mode: ScoreMode) -> WordResult {
        let score = Self::score_word(&word, mode);
        WordResult { word, score }
    }

    /// Order results by a single strategy. Sorting is stable, so ties keep their prior order.
    pub fn sort_results(results: &mut [WordResult], strategy: SortStrategy) {
        match strategy {
            SortStrategy::Score => results.sort_by_key(|result| Reverse(result.score)),
            SortStrategy::Length => results.sort_by_key(|result| Reverse(result.word.len())),
            SortStrategy::Alphabetical => results.sort_by(|a, b| a.word.cmp(&b.word)),
            SortStrategy::Common => results.sort_by_key(|result| {
                let priority = COMMON_WORDS
                    .iter()
                    .position(|common| *common == result.word)
                    .unwrap_or(COMMON_WORDS.len());
                (priority, result.word.len())
            }),
        }
    }

    pub fn average_score(results: &[WordResult]) -> Option<f64> {
        if results.is_empty() {
            return None;
        }
        let total: u32 = results.iter().map(|result| result.score).sum();
        Some(total as f64 / results.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(words: &[&str]) -> Vec<WordResult> {
        words
            .iter()
            .map(|word| ScoringEngine::score_result(word.to_string(), ScoreMode::Base))
            .collect()
    }

    fn words(results: &[WordResult]) -> Vec<&str> {
        results.iter().map(|result| result.word.as_str()).collect()
    }

    #[test]
    fn test_letter_table() {
        let expected = [
            ('a', 1), ('b', 3), ('c', 3), ('d', 2), ('e', 1), ('f', 4), ('g', 2),
            ('h', 4), ('i', 1), ('j', 8), ('k', 5), ('l', 1), ('m', 3), ('n', 1),
            ('o', 1), ('p', 3), ('q', 10), ('r', 1), ('s', 1), ('t', 1), ('u', 1),
            ('v', 4), ('w', 4), ('x', 8), ('y', 4), ('z', 10),
        ];
        for (letter, value) in expected {
            assert_eq!(ScoringEngine::letter_value(letter), value, "letter {}", letter);
        }
        assert_eq!(ScoringEngine::letter_value('!'), 0);
        assert_eq!(ScoringEngine::letter_value('Q'), 10);
    }

    #[test]
    fn test_bingo_scores() {
        assert_eq!(ScoringEngine::score_word("bingo", ScoreMode::Base), 8);
        assert_eq!(ScoringEngine::score_word("bingo", ScoreMode::Bonused), 12);
    }

    #[test]
    fn test_length_multipliers() {
        // cat: 3 + 1 + 1
        assert_eq!(ScoringEngine::bonused_score("cat"), 5);
        // quartz: 10+1+1+1+1+10 = 24, six letters
        assert_eq!(ScoringEngine::bonused_score("quartz"), 36);
        // example: 1+8+1+3+3+1+1 = 18, seven letters
        assert_eq!(ScoringEngine::bonused_score("example"), 36);
        // stone: 5 x 1 = 5, floor(7.5)
        assert_eq!(ScoringEngine::bonused_score("stone"), 7);
    }

    #[test]
    fn test_unknown_characters_score_zero() {
        assert_eq!(ScoringEngine::base_score("c-a-t"), 5);
        assert_eq!(ScoringEngine::base_score(""), 0);
    }

    #[test]
    fn test_aggregate_score() {
        let total = ScoringEngine::aggregate_score(["cat", "bingo"], ScoreMode::Base);
        assert_eq!(total, 13);
        let bonused = ScoringEngine::aggregate_score(["cat", "bingo"], ScoreMode::Bonused);
        assert_eq!(bonused, 17);
    }

    #[test]
    fn test_sort_strategies_are_independent() {
        let mut list = results(&["zoo", "the", "apple", "and", "quiz"]);

        ScoringEngine::sort_results(&mut list, SortStrategy::Score);
        assert_eq!(words(&list), vec!["quiz", "zoo", "apple", "the", "and"]);

        ScoringEngine::sort_results(&mut list, SortStrategy::Alphabetical);
        assert_eq!(words(&list), vec!["and", "apple", "quiz", "the", "zoo"]);

        ScoringEngine::sort_results(&mut list, SortStrategy::Length);
        assert_eq!(words(&list), vec!["apple", "quiz", "and", "the", "zoo"]);

        ScoringEngine::sort_results(&mut list, SortStrategy::Common);
        assert_eq!(words(&list), vec!["the", "and", "zoo", "quiz", "apple"]);
    }

    #[test]
    fn test_average_score() {
        assert_eq!(ScoringEngine::average_score(&[]), None);
        let list = results(&["cat", "dog"]);
        // cat 5, dog 2+1+2 = 5
        assert_eq!(ScoringEngine::average_score(&list), Some(5.0));
    }
}
