//! Fixed cipher alphabets and text normalization.
//!
//! Every cipher in this crate does its index arithmetic modulo the size of an
//! [`Alphabet`]. Free-form input is first reduced to the alphabet with
//! [`normalize`]: letters are folded to their canonical uppercase form and
//! everything else is dropped.

use std::fmt;

/// An ordered set of unique uppercase letters.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    name: &'static str,
    letters: &'static [char],
}

/// Latin alphabet, `A` through `Z`.
pub const LATIN: Alphabet = Alphabet {
    name: "latin",
    letters: &[
        'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
        'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    ],
};

/// Russian alphabet, `А` through `Я` with `Ё` after `Е`.
pub const CYRILLIC: Alphabet = Alphabet {
    name: "cyrillic",
    letters: &[
        'А', 'Б', 'В', 'Г', 'Д', 'Е', 'Ё', 'Ж', 'З', 'И', 'Й', 'К', 'Л', 'М', 'Н', 'О', 'П', 'Р',
        'С', 'Т', 'У', 'Ф', 'Х', 'Ц', 'Ч', 'Ш', 'Щ', 'Ъ', 'Ы', 'Ь', 'Э', 'Ю', 'Я',
    ],
};

impl Alphabet {
    /// Short lowercase name, used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of letters, the modulus for index arithmetic.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always `false` for the predefined alphabets.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Letters in alphabet order.
    pub fn letters(&self) -> &'static [char] {
        self.letters
    }

    /// Returns the letter at `index` modulo the alphabet size.
    ///
    /// # Panics
    /// Panics only on an empty alphabet, which cannot be constructed
    /// outside this module.
    pub fn letter(&self, index: usize) -> char {
        self.letters[index % self.letters.len()]
    }

    /// Maps `ch` to its canonical uppercase letter.
    ///
    /// Accepts a letter of the alphabet itself or exactly its lowercase form.
    /// Returns `None` for anything else.
    ///
    /// # Examples
    ///
    /// ```
    /// use cipherlab::alphabet::{CYRILLIC, LATIN};
    ///
    /// assert_eq!(LATIN.canonical('q'), Some('Q'));
    /// assert_eq!(LATIN.canonical('1'), None);
    /// assert_eq!(CYRILLIC.canonical('ё'), Some('Ё'));
    /// assert_eq!(CYRILLIC.canonical('q'), None);
    /// ```
    pub fn canonical(&self, ch: char) -> Option<char> {
        self.position(ch).map(|index| self.letters[index])
    }

    /// Case-insensitive index of `ch` in the alphabet.
    pub fn position(&self, ch: char) -> Option<usize> {
        if let Some(index) = self.letters.iter().position(|&letter| letter == ch) {
            return Some(index);
        }
        self.letters
            .iter()
            .position(|&letter| is_single_lowercase_of(letter, ch))
    }
}

/// `true` when `letter` lowercases to exactly the single character `ch`.
fn is_single_lowercase_of(letter: char, ch: char) -> bool {
    let mut lower = letter.to_lowercase();
    lower.next() == Some(ch) && lower.next().is_none()
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alphabet")
            .field("name", &self.name)
            .field("len", &self.letters.len())
            .finish()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &letter in self.letters {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

/// Reduces free-form text to canonical letters of `alphabet`.
///
/// Characters outside the alphabet (spaces, punctuation, digits, letters of
/// another script) are dropped, not replaced. The order of the remaining
/// letters is preserved. Empty input yields an empty string.
///
/// # Examples
///
/// ```
/// use cipherlab::alphabet::{normalize, LATIN};
///
/// assert_eq!(normalize("Hello, World! 123", &LATIN), "HELLOWORLD");
/// ```
pub fn normalize(text: &str, alphabet: &Alphabet) -> String {
    text.chars().filter_map(|ch| alphabet.canonical(ch)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_sizes() {
        assert_eq!(LATIN.len(), 26);
        assert_eq!(CYRILLIC.len(), 33);
        assert!(!LATIN.is_empty());
    }

    #[test]
    fn test_letters_are_unique_uppercase() {
        for alphabet in [LATIN, CYRILLIC] {
            let mut seen = alphabet.letters().to_vec();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), alphabet.len(), "{} has duplicates", alphabet.name());
            for &letter in alphabet.letters() {
                assert!(letter.is_uppercase(), "{} is not uppercase", letter);
            }
        }
    }

    #[test]
    fn test_position_is_case_insensitive() {
        assert_eq!(LATIN.position('A'), Some(0));
        assert_eq!(LATIN.position('z'), Some(25));
        assert_eq!(CYRILLIC.position('Ё'), Some(6));
        assert_eq!(CYRILLIC.position('я'), Some(32));
        assert_eq!(CYRILLIC.position('A'), None);
    }

    #[test]
    fn test_letter_wraps_around() {
        assert_eq!(LATIN.letter(0), 'A');
        assert_eq!(LATIN.letter(26), 'A');
        assert_eq!(LATIN.letter(27), 'B');
        assert_eq!(CYRILLIC.letter(33), 'А');
    }

    #[test]
    fn test_normalize_strips_and_upcases() {
        assert_eq!(normalize("Hello, World! 123", &LATIN), "HELLOWORLD");
    }

    #[test]
    fn test_normalize_drops_other_script() {
        assert_eq!(normalize("Привет, world!", &CYRILLIC), "ПРИВЕТ");
        assert_eq!(normalize("Привет, world!", &LATIN), "WORLD");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize("", &LATIN), "");
        assert_eq!(normalize("  ,.!? 42", &CYRILLIC), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("Съешь же ещё этих мягких булок", &CYRILLIC);
        assert_eq!(once, "СЪЕШЬЖЕЕЩЁЭТИХМЯГКИХБУЛОК");
        assert_eq!(normalize(&once, &CYRILLIC), once);
    }

    #[test]
    fn test_display_lists_letters() {
        assert_eq!(LATIN.to_string(), "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    }
}
