use chrono::{Datelike, Local, NaiveDate, Weekday};
use rack_types::{DailyChallenge, RACK_SIZE, Rack};
use tracing::debug;

pub const VOWELS: &str = "AEIOU";
pub const CONSONANTS: &str = "BCDFGHJKLMNPQRSTVWXYZ";

pub const MIN_TARGET_SCORE: u32 = 50;
pub const MAX_TARGET_SCORE: u32 = 200;

const HIGH_VALUE_LETTERS: &str = "qzxjk";
const MID_VALUE_LETTERS: &str = "bcdfghlmnp";

/// Derives a daily challenge from nothing but its date.
///
/// Letter selection reads decimal digits of a 32-bit string hash of the `YYYY-MM-DD` key.
/// When the hash has fewer digits than needed, digit positions wrap around to the start
/// of the digit string.
pub struct ChallengeGenerator;

impl ChallengeGenerator {
    pub fn generate(date: NaiveDate) -> DailyChallenge {
        let seed = date_key(date);
        let letters = Self::letters_for_seed(&seed);
        let target_score = Self::target_score(&letters, date);
        debug!(
            "Generated challenge for {}: {} (target {})",
            seed, letters, target_score
        );
        DailyChallenge::new(date, letters, target_score)
    }

    /// `hash = (hash << 5) - hash + code_unit` with 32-bit two's-complement wrapping
    pub fn seed_hash(seed: &str) -> i32 {
        seed.encode_utf16().fold(0i32, |hash, unit| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit))
        })
    }

    /// Decimal digits of `|seed_hash(seed)|`
    pub fn hash_digits(seed: &str) -> Vec<u8> {
        Self::seed_hash(seed)
            .unsigned_abs()
            .to_string()
            .bytes()
            .map(|byte| byte - b'0')
            .collect()
    }

    pub fn letters_for_seed(seed: &str) -> Rack {
        let digits = Self::hash_digits(seed);
        let digit = |position: usize| digits[position % digits.len()] as usize;

        let vowels = VOWELS.as_bytes();
        let consonants = CONSONANTS.as_bytes();

        let vowel_count = 3 + digit(0) % 2;
        let consonant_count = RACK_SIZE - vowel_count;

        let picked_vowels =
            (0..vowel_count).map(|i| vowels[digit(i + 1) % vowels.len()] as char);
        // consonant i reads digit i + vowel_count, so the first one shares the last vowel's digit
        let picked_consonants = (0..consonant_count)
            .map(|i| consonants[digit(i + vowel_count) % consonants.len()] as char);

        Rack::from_letters(picked_vowels.chain(picked_consonants))
            .expect("vowel and consonant counts sum to RACK_SIZE and both pools are ASCII letters")
    }

    /// Sum of per-letter weights before any calendar adjustment
    pub fn base_target(letters: &Rack) -> u32 {
        letters
            .letters()
            .map(|letter| {
                if HIGH_VALUE_LETTERS.contains(letter) {
                    20
                } else if MID_VALUE_LETTERS.contains(letter) {
                    8
                } else {
                    5
                }
            })
            .sum()
    }

    /// Weekend bonus (x1.2, floored) then clamp into `[MIN_TARGET_SCORE, MAX_TARGET_SCORE]`
    pub fn finalize_target(base: u32, date: NaiveDate) -> u32 {
        let adjusted = if is_weekend(date) { base * 6 / 5 } else { base };
        adjusted.clamp(MIN_TARGET_SCORE, MAX_TARGET_SCORE)
    }

    pub fn target_score(letters: &Rack, date: NaiveDate) -> u32 {
        Self::finalize_target(Self::base_target(letters), date)
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The storage and seed key for a date
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Today's date at the process's local day boundary
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_hash_matches_reference_values() {
        assert_eq!(ChallengeGenerator::seed_hash(""), 0);
        assert_eq!(ChallengeGenerator::seed_hash("a"), 97);
        assert_eq!(ChallengeGenerator::seed_hash("2024-01-06"), -613341627);
        assert_eq!(ChallengeGenerator::seed_hash("2025-03-15"), 274221666);
        assert_eq!(
            ChallengeGenerator::hash_digits("2024-01-06"),
            vec![6, 1, 3, 3, 4, 1, 6, 2, 7]
        );
    }

    #[test]
    fn test_known_dates() {
        let challenge = ChallengeGenerator::generate(date(2024, 1, 6));
        assert_eq!(challenge.letters.to_string(), "eoofgcjd");
        assert_eq!(ChallengeGenerator::base_target(&challenge.letters), 67);
        // Saturday: floor(67 * 1.2)
        assert_eq!(challenge.target_score, 80);

        let monday = ChallengeGenerator::generate(date(2024, 1, 8));
        assert_eq!(monday.letters.to_string(), "eoofgcjd");
        assert_eq!(monday.target_score, 67);

        let eight_digit_hash = ChallengeGenerator::generate(date(1999, 12, 31));
        assert_eq!(eight_digit_hash.letters.to_string(), "aiikgcfm");
    }

    #[test]
    fn test_short_digit_strings_wrap() {
        // |hash("a")| = 97 has only two digits
        let rack = ChallengeGenerator::letters_for_seed("a");
        assert_eq!(rack.to_string(), "iuiumkmk");
        assert_eq!(rack.filled_count(), RACK_SIZE);
    }

    #[test]
    fn test_generate_is_pure() {
        let day = date(2024, 7, 19);
        let first = ChallengeGenerator::generate(day);
        let second = ChallengeGenerator::generate(day);
        assert_eq!(first, second);
        assert!(!first.completed);
        assert_eq!(first.user_score, 0);
        assert!(first.found_words.is_empty());
        assert_eq!(first.completed_time, None);
        assert_eq!(first.hints_used, 0);
    }

    #[test]
    fn test_every_rack_has_three_or_four_vowels() {
        let mut day = date(2024, 1, 1);
        for _ in 0..366 {
            let rack = ChallengeGenerator::generate(day).letters;
            let vowels = rack.letters().filter(|l| "aeiou".contains(*l)).count();
            assert!((3..=4).contains(&vowels), "{} has {} vowels", rack, vowels);
            assert_eq!(rack.filled_count(), RACK_SIZE);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_weekend_bonus_and_clamp() {
        let saturday = date(2024, 1, 6);
        let sunday = date(2024, 1, 7);
        let monday = date(2024, 1, 8);

        assert_eq!(ChallengeGenerator::finalize_target(100, saturday), 120);
        assert_eq!(ChallengeGenerator::finalize_target(100, sunday), 120);
        assert_eq!(ChallengeGenerator::finalize_target(100, monday), 100);
        assert_eq!(ChallengeGenerator::finalize_target(40, monday), 50);
        assert_eq!(ChallengeGenerator::finalize_target(180, saturday), 200);
    }

    #[test]
    fn test_base_target_weights() {
        let rack = Rack::parse("qbaxx___").unwrap();
        // q 20, b 8, a 5, x 20, x 20
        assert_eq!(ChallengeGenerator::base_target(&rack), 73);
    }

    #[test]
    fn test_date_key_format() {
        assert_eq!(date_key(date(2024, 1, 6)), "2024-01-06");
    }
}
