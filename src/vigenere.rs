//! Vigenère substitution with a progressive key.
//!
//! The key is repeated to the length of the text, but every full pass over the
//! key shifts its letters one position further along the alphabet: the first
//! pass uses the key as is, the second adds 1 to each letter, the third adds 2,
//! and so on. Each text letter is then shifted by its key-stream letter modulo
//! the alphabet size.

use serde::Serialize;
use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::{CipherLabError, CipherLabResult};

/// Whether a substitution adds or subtracts the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// One letter pushed through the tabula recta.
///
/// `plain_index + key_index == cipher_index` modulo the alphabet size, in
/// both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterStep {
    /// Position of the letter among the substituted letters.
    pub position: usize,
    pub plain_char: char,
    pub key_char: char,
    pub cipher_char: char,
    pub plain_index: usize,
    pub key_index: usize,
    pub cipher_index: usize,
}

impl LetterStep {
    /// The letter produced in `direction`.
    pub fn output(&self, direction: Direction) -> char {
        match direction {
            Direction::Encrypt => self.cipher_char,
            Direction::Decrypt => self.plain_char,
        }
    }
}

/// Expands `key` into a key stream of exactly `length` letters.
///
/// Key characters outside `alphabet` are skipped. On the `shift`-th pass over
/// the remaining key letters, each contributes the letter `shift` positions
/// after it. A key without any alphabet letter gives an empty stream.
///
/// # Examples
///
/// ```
/// use cipherlab::alphabet::CYRILLIC;
/// use cipherlab::vigenere::expand_key_progressive;
///
/// assert_eq!(expand_key_progressive("АБВ", 6, &CYRILLIC), "АБВБВГ");
/// ```
pub fn expand_key_progressive(key: &str, length: usize, alphabet: &Alphabet) -> String {
    let indices: Vec<usize> = key.chars().filter_map(|ch| alphabet.position(ch)).collect();
    if indices.is_empty() {
        return String::new();
    }
    (0..length)
        .map(|i| {
            let shift = i / indices.len();
            alphabet.letter(indices[i % indices.len()] + (shift % alphabet.len()))
        })
        .collect()
}

/// Pairs each alphabet letter of `text` with the next key-stream letter.
///
/// Characters of `text` or `key_stream` outside the alphabet are skipped and
/// consume nothing. The sequence ends when either side runs out.
pub(crate) fn substitutions<'a>(
    text: &'a str,
    key_stream: &'a str,
    alphabet: &'a Alphabet,
    direction: Direction,
) -> impl Iterator<Item = LetterStep> + 'a {
    let n = alphabet.len();
    let mut keys = key_stream.chars().filter_map(move |ch| alphabet.position(ch));
    text.chars()
        .filter_map(move |ch| alphabet.position(ch))
        .enumerate()
        .map_while(move |(position, input)| {
            let key = keys.next()?;
            let (plain, cipher) = match direction {
                Direction::Encrypt => (input, (input + key) % n),
                Direction::Decrypt => ((input + n - key) % n, input),
            };
            Some(LetterStep {
                position,
                plain_char: alphabet.letter(plain),
                key_char: alphabet.letter(key),
                cipher_char: alphabet.letter(cipher),
                plain_index: plain,
                key_index: key,
                cipher_index: cipher,
            })
        })
}

fn apply(text: &str, key: &str, alphabet: &Alphabet, direction: Direction) -> String {
    let key_stream = expand_key_progressive(key, text.chars().count(), alphabet);
    debug!(
        ?direction,
        alphabet = alphabet.name(),
        chars = text.chars().count(),
        key_stream = key_stream.chars().count(),
        "vigenere"
    );
    substitutions(text, &key_stream, alphabet, direction)
        .map(|step| step.output(direction))
        .collect()
}

/// Encrypts `plaintext`: `c = (p + k) mod N`.
///
/// # Examples
///
/// ```
/// use cipherlab::alphabet::LATIN;
/// use cipherlab::vigenere;
///
/// assert_eq!(vigenere::encrypt("HELLO", "KEY", &LATIN), "RIJWT");
/// ```
pub fn encrypt(plaintext: &str, key: &str, alphabet: &Alphabet) -> String {
    apply(plaintext, key, alphabet, Direction::Encrypt)
}

/// Decrypts `ciphertext`: `p = (c - k + N) mod N`.
pub fn decrypt(ciphertext: &str, key: &str, alphabet: &Alphabet) -> String {
    apply(ciphertext, key, alphabet, Direction::Decrypt)
}

/// Vigenère cipher bound to a key that has at least one alphabet letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VigenereCipher {
    key: String,
    alphabet: Alphabet,
}

impl VigenereCipher {
    /// Creates a cipher with `key` reduced to its alphabet letters.
    ///
    /// # Errors
    /// Returns [`CipherLabError::EmptyKey`] if `key` has no letter of `alphabet`.
    pub fn new(key: &str, alphabet: Alphabet) -> CipherLabResult<Self> {
        let key = crate::alphabet::normalize(key, &alphabet);
        if key.is_empty() {
            return Err(CipherLabError::EmptyKey);
        }
        Ok(VigenereCipher { key, alphabet })
    }

    /// The normalized key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The alphabet the cipher works over.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Key stream covering `length` letters.
    pub fn key_stream(&self, length: usize) -> String {
        expand_key_progressive(&self.key, length, &self.alphabet)
    }

    /// See [`encrypt`].
    pub fn encrypt(&self, plaintext: &str) -> String {
        encrypt(plaintext, &self.key, &self.alphabet)
    }

    /// See [`decrypt`].
    pub fn decrypt(&self, ciphertext: &str) -> String {
        decrypt(ciphertext, &self.key, &self.alphabet)
    }
}
