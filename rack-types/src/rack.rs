use serde::{Deserialize, Serialize};
use std::fmt;

use crate::RackError;

/// Number of letter slots on a rack
pub const RACK_SIZE: usize = 8;

/// Fewest filled slots a rack needs before a search is attempted
pub const MIN_SEARCH_LETTERS: usize = 3;

/// An ordered holder of up to eight lowercase ASCII letters.
///
/// Slots are positional so a UI can map tiles one-to-one, but matching only ever looks
/// at the letters present (see `rack_core::rack_matcher`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<char>>", into = "Vec<Option<char>>")]
pub struct Rack {
    slots: [Option<char>; RACK_SIZE],
}

impl Rack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a rack from text such as `"cat_____"` or `"CAT"`.
    ///
    /// `_`, `.`, `?` and spaces leave a slot empty; missing trailing slots are empty too.
    pub fn parse(text: &str) -> Result<Self, RackError> {
        let count = text.chars().count();
        if count > RACK_SIZE {
            return Err(RackError::TooManyLetters { count });
        }

        let mut rack = Self::new();
        for (index, ch) in text.chars().enumerate() {
            let slot = match ch {
                '_' | '.' | '?' | ' ' => None,
                other => Some(normalize_letter(other)?),
            };
            rack.slots[index] = slot;
        }

        Ok(rack)
    }

    /// Fill slots left to right from a sequence of letters
    pub fn from_letters<I>(letters: I) -> Result<Self, RackError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut rack = Self::new();
        let mut count = 0;
        for ch in letters {
            if count >= RACK_SIZE {
                return Err(RackError::TooManyLetters { count: count + 1 });
            }
            rack.slots[count] = Some(normalize_letter(ch)?);
            count += 1;
        }
        Ok(rack)
    }

    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    pub fn slots(&self) -> &[Option<char>; RACK_SIZE] {
        &self.slots
    }

    pub fn set_slot(&mut self, index: usize, letter: Option<char>) -> Result<(), RackError> {
        if index >= RACK_SIZE {
            return Err(RackError::SlotOutOfRange { index });
        }
        self.slots[index] = letter.map(normalize_letter).transpose()?;
        Ok(())
    }

    /// Letters present on the rack, in slot order
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    pub fn has_enough_letters(&self) -> bool {
        self.filled_count() >= MIN_SEARCH_LETTERS
    }

    pub fn clear(&mut self) {
        self.slots = [None; RACK_SIZE];
    }
}

fn normalize_letter(ch: char) -> Result<char, RackError> {
    if ch.is_ascii_alphabetic() {
        Ok(ch.to_ascii_lowercase())
    } else {
        Err(RackError::InvalidLetter { letter: ch })
    }
}

impl TryFrom<Vec<Option<char>>> for Rack {
    type Error = RackError;

    fn try_from(slots: Vec<Option<char>>) -> Result<Self, Self::Error> {
        if slots.len() != RACK_SIZE {
            return Err(RackError::WrongSlotCount { count: slots.len() });
        }

        let mut rack = Self::new();
        for (index, slot) in slots.into_iter().enumerate() {
            rack.set_slot(index, slot)?;
        }
        Ok(rack)
    }
}

impl From<Rack> for Vec<Option<char>> {
    fn from(rack: Rack) -> Self {
        rack.slots.to_vec()
    }
}

impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            write!(f, "{}", slot.unwrap_or('_'))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercases_and_pads() {
        let rack = Rack::parse("CaT").unwrap();
        assert_eq!(rack.filled_count(), 3);
        assert_eq!(rack.letters().collect::<String>(), "cat");
        assert_eq!(rack.to_string(), "cat_____");
    }

    #[test]
    fn test_parse_keeps_empty_slots_positional() {
        let rack = Rack::parse("c_a.t?x ").unwrap();
        assert_eq!(rack.slot(0), Some('c'));
        assert_eq!(rack.slot(1), None);
        assert_eq!(rack.slot(2), Some('a'));
        assert_eq!(rack.slot(7), None);
        assert_eq!(rack.filled_count(), 4);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            Rack::parse("abcdefghi"),
            Err(RackError::TooManyLetters { count: 9 })
        ));
        assert!(matches!(
            Rack::parse("ab1"),
            Err(RackError::InvalidLetter { letter: '1' })
        ));
        assert!(Rack::parse("é").is_err());
    }

    #[test]
    fn test_set_slot_bounds() {
        let mut rack = Rack::new();
        rack.set_slot(7, Some('Z')).unwrap();
        assert_eq!(rack.slot(7), Some('z'));
        assert!(matches!(
            rack.set_slot(8, Some('a')),
            Err(RackError::SlotOutOfRange { index: 8 })
        ));

        rack.clear();
        assert!(rack.is_empty());
    }

    #[test]
    fn test_from_letters_limit() {
        assert!(Rack::from_letters("abcdefgh".chars()).is_ok());
        assert!(Rack::from_letters("abcdefghi".chars()).is_err());
    }

    #[test]
    fn test_serde_shape() {
        let rack = Rack::parse("ab").unwrap();
        let json = serde_json::to_string(&rack).unwrap();
        assert_eq!(json, r#"["a","b",null,null,null,null,null,null]"#);

        let back: Rack = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rack);

        assert!(serde_json::from_str::<Rack>(r#"["a","b"]"#).is_err());
        assert!(serde_json::from_str::<Rack>(r#"["1",null,null,null,null,null,null,null]"#).is_err());
    }
}
