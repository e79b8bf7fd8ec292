//! Letter-by-letter replay of the progressive Vigenère cipher.

use serde::Serialize;
use tracing::debug;

use crate::alphabet::{normalize, Alphabet};
use crate::vigenere::{expand_key_progressive, substitutions, Direction, LetterStep};

/// Full encryption replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VigenereEncryptTrace {
    pub plaintext: String,
    pub key_stream: String,
    pub ciphertext: String,
    pub steps: Vec<LetterStep>,
}

/// Full decryption replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VigenereDecryptTrace {
    pub ciphertext: String,
    pub key_stream: String,
    pub plaintext: String,
    pub steps: Vec<LetterStep>,
}

/// Runs the substitution loop once and returns the input, key stream,
/// output and steps.
fn replay(
    text: &str,
    key: &str,
    alphabet: &Alphabet,
    direction: Direction,
) -> (String, String, String, Vec<LetterStep>) {
    let input = normalize(text, alphabet);
    let key_stream = expand_key_progressive(key, input.chars().count(), alphabet);
    debug!(
        ?direction,
        alphabet = alphabet.name(),
        letters = input.chars().count(),
        "trace vigenere"
    );
    let steps: Vec<LetterStep> = substitutions(&input, &key_stream, alphabet, direction).collect();
    let output = steps.iter().map(|step| step.output(direction)).collect();
    (input, key_stream, output, steps)
}

/// Traces encryption of `text` with `key`.
///
/// The text is normalized to `alphabet`; key characters outside it are
/// skipped, as in [`crate::vigenere::encrypt`].
///
/// # Examples
///
/// ```
/// use cipherlab::alphabet::LATIN;
/// use cipherlab::trace::trace_vigenere_encrypt;
///
/// let trace = trace_vigenere_encrypt("hello", "key", &LATIN);
/// assert_eq!(trace.key_stream, "KEYLF");
/// assert_eq!(trace.ciphertext, "RIJWT");
/// assert_eq!(trace.steps[0].cipher_index, 17);
/// ```
pub fn trace_vigenere_encrypt(text: &str, key: &str, alphabet: &Alphabet) -> VigenereEncryptTrace {
    let (plaintext, key_stream, ciphertext, steps) =
        replay(text, key, alphabet, Direction::Encrypt);
    VigenereEncryptTrace {
        plaintext,
        key_stream,
        ciphertext,
        steps,
    }
}

/// Traces decryption of `text` with `key`.
pub fn trace_vigenere_decrypt(text: &str, key: &str, alphabet: &Alphabet) -> VigenereDecryptTrace {
    let (ciphertext, key_stream, plaintext, steps) =
        replay(text, key, alphabet, Direction::Decrypt);
    VigenereDecryptTrace {
        ciphertext,
        key_stream,
        plaintext,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{CYRILLIC, LATIN};
    use crate::vigenere;

    #[test]
    fn test_encrypt_trace_matches_engine() {
        let text = "Однажды в студёную зимнюю пору";
        let trace = trace_vigenere_encrypt(text, "мороз", &CYRILLIC);
        assert_eq!(trace.ciphertext, vigenere::encrypt(text, "мороз", &CYRILLIC));
        assert_eq!(trace.steps.len(), trace.plaintext.chars().count());
        assert_eq!(trace.key_stream.chars().count(), trace.steps.len());
    }

    #[test]
    fn test_decrypt_trace_matches_engine() {
        let ct = vigenere::encrypt("ПРОГРЕССИВНЫЙКЛЮЧ", "АБВ", &CYRILLIC);
        let trace = trace_vigenere_decrypt(&ct, "АБВ", &CYRILLIC);
        assert_eq!(trace.plaintext, "ПРОГРЕССИВНЫЙКЛЮЧ");
        assert_eq!(trace.ciphertext, ct);
    }

    #[test]
    fn test_step_triples() {
        let trace = trace_vigenere_encrypt("ЯЯ", "Б", &CYRILLIC);
        let first = trace.steps[0];
        assert_eq!(
            (first.plain_char, first.key_char, first.cipher_char),
            ('Я', 'Б', 'А')
        );
        assert_eq!(
            (first.plain_index, first.key_index, first.cipher_index),
            (32, 1, 0)
        );
        assert_eq!(trace.steps[1].key_char, 'В');
    }

    #[test]
    fn test_decrypt_step_fills_plain_side() {
        let trace = trace_vigenere_decrypt("RIJWT", "KEY", &LATIN);
        assert_eq!(trace.steps[4].cipher_char, 'T');
        assert_eq!(trace.steps[4].key_char, 'F');
        assert_eq!(trace.steps[4].plain_char, 'O');
    }

    #[test]
    fn test_empty_key_has_no_steps() {
        let trace = trace_vigenere_encrypt("ТЕКСТ", "", &CYRILLIC);
        assert!(trace.steps.is_empty());
        assert_eq!(trace.key_stream, "");
        assert_eq!(trace.ciphertext, "");
    }
}
