use rack_types::Rack;

/// Remaining count per letter a-z, built from the filled slots of a rack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LetterMultiset {
    counts: [u8; 26],
}

impl LetterMultiset {
    pub fn from_rack(rack: &Rack) -> Self {
        let mut counts = [0u8; 26];
        for letter in rack.letters() {
            if let Some(index) = letter_index(letter) {
                counts[index] += 1;
            }
        }
        Self { counts }
    }

    pub fn count(&self, letter: char) -> u8 {
        letter_index(letter).map_or(0, |index| self.counts[index])
    }

    /// Use up one copy of `letter`; false when none are left
    pub fn take(&mut self, letter: char) -> bool {
        match letter_index(letter) {
            Some(index) if self.counts[index] > 0 => {
                self.counts[index] -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&count| count as usize).sum()
    }
}

fn letter_index(letter: char) -> Option<usize> {
    let lower = letter.to_ascii_lowercase();
    if lower.is_ascii_lowercase() {
        Some((lower as u8 - b'a') as usize)
    } else {
        None
    }
}

/// Whether `word` can be spelled from the letters on `rack`, each used at most once
pub fn can_form(word: &str, rack: &Rack) -> bool {
    let mut available = LetterMultiset::from_rack(rack);
    word.chars().all(|ch| available.take(ch))
}
