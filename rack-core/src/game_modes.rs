use rack_types::{Difficulty, GameMode, ModeRules, ModeSettings, Rack, ScoreMode};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

use crate::challenge_generator::{CONSONANTS, VOWELS};
use crate::rack_matcher::can_form;
use crate::scoring::ScoringEngine;

pub const RARE_CONSONANTS: &str = "QZXJKVWY";
pub const MIN_MODE_WORD_LENGTH: usize = 3;

/// Name and one-line pitch shown for a mode
pub fn mode_description(mode: GameMode) -> (&'static str, &'static str) {
    match mode {
        GameMode::Timed => (
            "Timed Challenge",
            "Find as many words as possible before time runs out!",
        ),
        GameMode::Target => (
            "Score Target",
            "Reach the target score using the given letters!",
        ),
        GameMode::Unlimited => (
            "Unlimited Practice",
            "Practice with random letters, no time limit",
        ),
        GameMode::Survival => (
            "Survival Mode",
            "Keep finding words until you run out of time!",
        ),
    }
}

pub fn mode_rules(mode: GameMode, difficulty: Difficulty) -> ModeRules {
    let mut rules = ModeRules {
        time_limit_secs: None,
        target_score: None,
        base_time_secs: None,
        time_per_word_secs: None,
    };

    match mode {
        GameMode::Timed => {
            rules.time_limit_secs = Some(match difficulty {
                Difficulty::Easy => 120,
                Difficulty::Medium => 90,
                Difficulty::Hard => 60,
            });
        }
        GameMode::Target => {
            rules.target_score = Some(match difficulty {
                Difficulty::Easy => 50,
                Difficulty::Medium => 100,
                Difficulty::Hard => 200,
            });
        }
        GameMode::Unlimited => {}
        GameMode::Survival => {
            let (base, per_word) = match difficulty {
                Difficulty::Easy => (30, 5),
                Difficulty::Medium => (20, 3),
                Difficulty::Hard => (15, 2),
            };
            rules.base_time_secs = Some(base);
            rules.time_per_word_secs = Some(per_word);
        }
    }

    rules
}

fn pick<R: Rng>(pool: &str, count: usize, rng: &mut R) -> Vec<char> {
    let pool = pool.as_bytes();
    (0..count)
        .map(|_| pool[rng.random_range(0..pool.len())] as char)
        .collect()
}

/// A random, shuffled rack whose letter mix depends on the difficulty.
///
/// Draws are with replacement, so a rack may repeat letters.
pub fn generate_letters<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Rack {
    let (vowels, consonants, rare) = match difficulty {
        Difficulty::Easy => (4, 4, 0),
        Difficulty::Medium => (3, 5, 0),
        Difficulty::Hard => (2, 4, 2),
    };
    let mut letters = pick(VOWELS, vowels, rng);
    letters.extend(pick(CONSONANTS, consonants, rng));
    letters.extend(pick(RARE_CONSONANTS, rare, rng));
    letters.shuffle(rng);

    Rack::from_letters(letters)
        .expect("every difficulty picks RACK_SIZE letters from ASCII pools")
}

pub fn generate_settings<R: Rng>(
    mode: GameMode,
    difficulty: Difficulty,
    rng: &mut R,
) -> ModeSettings {
    let (name, description) = mode_description(mode);
    ModeSettings {
        mode,
        difficulty,
        name: name.to_string(),
        description: description.to_string(),
        rules: mode_rules(mode, difficulty),
        letters: generate_letters(difficulty, rng),
    }
}

/// Length-bonused score, with survival paying an extra 20% (floored)
pub fn mode_score(word: &str, mode: GameMode) -> u32 {
    let score = ScoringEngine::score_word(word, ScoreMode::Bonused);
    match mode {
        GameMode::Survival => score * 6 / 5,
        GameMode::Timed | GameMode::Target | GameMode::Unlimited => score,
    }
}

/// A word counts in a mode when it is long enough, new, and formable from the rack
pub fn validate_word(word: &str, rack: &Rack, found_words: &BTreeSet<String>) -> bool {
    let word = word.trim().to_ascii_lowercase();
    word.chars().count() >= MIN_MODE_WORD_LENGTH
        && !found_words.contains(&word)
        && can_form(&word, rack)
}
