//! Entry points for a host UI: validate, normalize, then run a cipher.
//!
//! [`run`] returns the final text; [`trace`] returns the full step replay for
//! the same input. Both reject invalid input with the same errors as
//! [`validate`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use crate::alphabet::normalize;
use crate::error::{CipherLabError, CipherLabResult};
use crate::grille::{self, Grille};
use crate::trace::{
    trace_grille_decrypt, trace_grille_encrypt, trace_vigenere_decrypt, trace_vigenere_encrypt,
    GrilleDecryptTrace, GrilleEncryptTrace, VigenereDecryptTrace, VigenereEncryptTrace,
};
use crate::validation::{validate, TaskKind};
use crate::vigenere;

/// Encrypt or decrypt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Encrypt,
    Decrypt,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Encrypt => write!(f, "encrypt"),
            Action::Decrypt => write!(f, "decrypt"),
        }
    }
}

impl FromStr for Action {
    type Err = CipherLabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "encrypt" => Ok(Action::Encrypt),
            "decrypt" => Ok(Action::Decrypt),
            _ => Err(CipherLabError::UnknownAction(s.to_string())),
        }
    }
}

/// Runs `action` of `task` on `text`.
///
/// The key is ignored by the grille task.
///
/// # Errors
/// Returns the [`validate`] error if the text or key is empty after
/// normalization.
///
/// # Examples
///
/// ```
/// use cipherlab::lab::{run, Action};
/// use cipherlab::validation::TaskKind;
///
/// let out = run(TaskKind::Grille, Action::Encrypt, "abcd efgh ijkl mnop", "").unwrap();
/// assert_eq!(out, "AMIEFJNBKGCOPDHL");
/// ```
pub fn run(task: TaskKind, action: Action, text: &str, key: &str) -> CipherLabResult<String> {
    validate(task, text, key)?;
    let alphabet = task.alphabet();
    let text = normalize(text, alphabet);
    info!(%task, %action, letters = text.chars().count(), "running task");

    let out = match task {
        TaskKind::Grille => match action {
            Action::Encrypt => grille::encrypt(&text, &Grille::METHODOLOGY),
            Action::Decrypt => grille::decrypt(&text, &Grille::METHODOLOGY),
        },
        TaskKind::Vigenere => {
            let key = normalize(key, alphabet);
            match action {
                Action::Encrypt => vigenere::encrypt(&text, &key, alphabet),
                Action::Decrypt => vigenere::decrypt(&text, &key, alphabet),
            }
        }
    };
    debug!(letters = out.chars().count(), "task finished");
    Ok(out)
}

/// A trace of any task, tagged with its kind when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LabTrace {
    GrilleEncrypt(GrilleEncryptTrace),
    GrilleDecrypt(GrilleDecryptTrace),
    VigenereEncrypt(VigenereEncryptTrace),
    VigenereDecrypt(VigenereDecryptTrace),
}

impl LabTrace {
    /// Number of steps.
    pub fn len(&self) -> usize {
        match self {
            LabTrace::GrilleEncrypt(t) => t.steps.len(),
            LabTrace::GrilleDecrypt(t) => t.steps.len(),
            LabTrace::VigenereEncrypt(t) => t.steps.len(),
            LabTrace::VigenereDecrypt(t) => t.steps.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The text the traced operation produced.
    pub fn output(&self) -> &str {
        match self {
            LabTrace::GrilleEncrypt(t) => &t.ciphertext,
            LabTrace::GrilleDecrypt(t) => &t.plaintext,
            LabTrace::VigenereEncrypt(t) => &t.ciphertext,
            LabTrace::VigenereDecrypt(t) => &t.plaintext,
        }
    }
}

/// Traces `action` of `task` on `text`.
///
/// # Errors
/// Same as [`run`].
pub fn trace(task: TaskKind, action: Action, text: &str, key: &str) -> CipherLabResult<LabTrace> {
    validate(task, text, key)?;
    let alphabet = task.alphabet();
    info!(%task, %action, "tracing task");

    let traced = match (task, action) {
        (TaskKind::Grille, Action::Encrypt) => LabTrace::GrilleEncrypt(trace_grille_encrypt(text)),
        (TaskKind::Grille, Action::Decrypt) => LabTrace::GrilleDecrypt(trace_grille_decrypt(text)),
        (TaskKind::Vigenere, Action::Encrypt) => {
            LabTrace::VigenereEncrypt(trace_vigenere_encrypt(text, key, alphabet))
        }
        (TaskKind::Vigenere, Action::Decrypt) => {
            LabTrace::VigenereDecrypt(trace_vigenere_decrypt(text, key, alphabet))
        }
    };
    debug!(steps = traced.len(), "trace finished");
    Ok(traced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_grille_roundtrip() {
        let ct = run(TaskKind::Grille, Action::Encrypt, "Meet me at noon!", "").unwrap();
        let pt = run(TaskKind::Grille, Action::Decrypt, &ct, "").unwrap();
        assert_eq!(pt, "MEETMEATNOONXXXX");
    }

    #[test]
    fn test_run_vigenere_roundtrip() {
        let ct = run(TaskKind::Vigenere, Action::Encrypt, "Встречаемся в полдень", "Ключ").unwrap();
        let pt = run(TaskKind::Vigenere, Action::Decrypt, &ct, "ключ").unwrap();
        assert_eq!(pt, "ВСТРЕЧАЕМСЯВПОЛДЕНЬ");
    }

    #[test]
    fn test_run_rejects_invalid_input() {
        assert_eq!(
            run(TaskKind::Grille, Action::Encrypt, "!!!", ""),
            Err(CipherLabError::EmptyInput)
        );
        assert_eq!(
            run(TaskKind::Vigenere, Action::Decrypt, "Текст", "  "),
            Err(CipherLabError::EmptyKey)
        );
        assert_eq!(
            trace(TaskKind::Vigenere, Action::Encrypt, "", "ключ"),
            Err(CipherLabError::EmptyInput)
        );
    }

    #[test]
    fn test_trace_output_matches_run() {
        let cases = [
            (TaskKind::Grille, Action::Encrypt, "The grille turns four times", ""),
            (TaskKind::Grille, Action::Decrypt, "AMIEFJNBKGCOPDHL", ""),
            (TaskKind::Vigenere, Action::Encrypt, "Шифрование", "ключ"),
            (TaskKind::Vigenere, Action::Decrypt, "ЪФЯКЫЖШНЕС", "ключ"),
        ];
        for (task, action, text, key) in cases {
            let traced = trace(task, action, text, key).unwrap();
            let ran = run(task, action, text, key).unwrap();
            assert_eq!(traced.output(), ran, "{} {}", task, action);
            assert!(!traced.is_empty());
        }
    }

    #[test]
    fn test_trace_kind_tag() {
        let traced = trace(TaskKind::Grille, Action::Encrypt, "ABC", "").unwrap();
        assert!(matches!(traced, LabTrace::GrilleEncrypt(_)));
        assert_eq!(traced.len(), 16);
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("Encrypt".parse::<Action>(), Ok(Action::Encrypt));
        assert_eq!(
            "sign".parse::<Action>(),
            Err(CipherLabError::UnknownAction("sign".to_string()))
        );
    }
}
