//! Error types for the cipherlab library.

/// Reasons an uploaded text file is rejected before its contents are read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProblem {
    /// The file name does not end with the accepted extension.
    #[error("only .txt files are accepted")]
    UnsupportedType,
    /// The file is larger than the accepted limit.
    #[error("file is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
}

/// Errors produced by the cipherlab library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CipherLabError {
    /// The text contains no letters of the task's alphabet.
    #[error("enter a text or load a file")]
    EmptyInput,
    /// The Vigenère key contains no letters of the alphabet.
    #[error("enter a key")]
    EmptyKey,
    /// The uploaded file was rejected.
    #[error("invalid file: {0}")]
    InvalidFile(FileProblem),
    /// The grille does not have 4 holes whose rotations cover the 4x4 grid.
    #[error("grille must have 4 holes whose rotations cover every cell exactly once")]
    InvalidGrille,
    /// A task name did not match any known cipher.
    #[error("unknown task `{0}`, expected `grille` or `vigenere`")]
    UnknownTask(String),
    /// An action name was neither encrypt nor decrypt.
    #[error("unknown action `{0}`, expected `encrypt` or `decrypt`")]
    UnknownAction(String),
}

/// Result alias used throughout the crate.
pub type CipherLabResult<T> = Result<T, CipherLabError>;
