//! Input checks run before any cipher is invoked.
//!
//! The checks reuse [`normalize`], so "valid text" means exactly the text the
//! engines will see.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::alphabet::{normalize, Alphabet, CYRILLIC, LATIN};
use crate::error::{CipherLabError, CipherLabResult, FileProblem};

/// Largest accepted upload, in bytes (2 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;

/// Accepted upload extension, compared case-insensitively.
pub const ACCEPTED_EXTENSION: &str = ".txt";

/// The two lab tasks. Each has a fixed alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Rotating grille over Latin letters.
    Grille,
    /// Progressive-key Vigenère over Cyrillic letters.
    Vigenere,
}

impl TaskKind {
    /// Alphabet the task's text (and key) are normalized to.
    pub fn alphabet(self) -> &'static Alphabet {
        match self {
            TaskKind::Grille => &LATIN,
            TaskKind::Vigenere => &CYRILLIC,
        }
    }

    /// `true` if the task needs a key.
    pub fn needs_key(self) -> bool {
        matches!(self, TaskKind::Vigenere)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Grille => write!(f, "grille"),
            TaskKind::Vigenere => write!(f, "vigenere"),
        }
    }
}

impl FromStr for TaskKind {
    type Err = CipherLabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grille" => Ok(TaskKind::Grille),
            "vigenere" => Ok(TaskKind::Vigenere),
            _ => Err(CipherLabError::UnknownTask(s.to_string())),
        }
    }
}

/// Checks that `text` (and, for Vigenère, `key`) still has letters after
/// normalization.
///
/// # Errors
/// - [`CipherLabError::EmptyInput`] if the text has no letter of the task's alphabet.
/// - [`CipherLabError::EmptyKey`] if a Vigenère key has no letter of the alphabet.
///
/// # Examples
///
/// ```
/// use cipherlab::error::CipherLabError;
/// use cipherlab::validation::{validate, TaskKind};
///
/// assert!(validate(TaskKind::Grille, "Hello", "").is_ok());
/// assert_eq!(validate(TaskKind::Grille, "  ", ""), Err(CipherLabError::EmptyInput));
/// assert_eq!(validate(TaskKind::Vigenere, "Привет", "123"), Err(CipherLabError::EmptyKey));
/// ```
pub fn validate(task: TaskKind, text: &str, key: &str) -> CipherLabResult<()> {
    let alphabet = task.alphabet();
    if normalize(text, alphabet).is_empty() {
        return Err(CipherLabError::EmptyInput);
    }
    if task.needs_key() && normalize(key, alphabet).is_empty() {
        return Err(CipherLabError::EmptyKey);
    }
    Ok(())
}

/// Checks an uploaded file's name and size before it is read.
///
/// # Errors
/// Returns [`CipherLabError::InvalidFile`] when the name does not end in
/// `.txt` or the file is larger than [`MAX_FILE_SIZE_BYTES`].
pub fn validate_file(file_name: &str, size_bytes: u64) -> CipherLabResult<()> {
    if !file_name.to_lowercase().ends_with(ACCEPTED_EXTENSION) {
        return Err(CipherLabError::InvalidFile(FileProblem::UnsupportedType));
    }
    if size_bytes > MAX_FILE_SIZE_BYTES {
        return Err(CipherLabError::InvalidFile(FileProblem::TooLarge {
            size: size_bytes,
            limit: MAX_FILE_SIZE_BYTES,
        }));
    }
    Ok(())
}
