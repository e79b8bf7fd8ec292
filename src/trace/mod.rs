//! Step traces for visualizing the ciphers.
//!
//! A trace is computed eagerly and handed over as plain data: a `Vec` of
//! immutable steps plus the final texts. Consumers move through it with an
//! index of their own, or with a [`StepCursor`].

pub mod grille;
pub mod vigenere;

use std::fmt;

pub use grille::{
    trace_grille_decrypt, trace_grille_decrypt_with, trace_grille_encrypt,
    trace_grille_encrypt_with, GrilleDecryptStep, GrilleDecryptTrace, GrilleEncryptTrace,
    GrilleStep,
};
pub use vigenere::{
    trace_vigenere_decrypt, trace_vigenere_encrypt, VigenereDecryptTrace, VigenereEncryptTrace,
};

/// A position in a trace of `len` steps, clamped to `0..len`.
///
/// # Examples
///
/// ```
/// use cipherlab::trace::{trace_grille_encrypt, StepCursor};
///
/// let trace = trace_grille_encrypt("HELLO");
/// let mut cursor = StepCursor::new(trace.steps.len());
/// assert!(!cursor.back());
/// assert!(cursor.forward());
/// assert_eq!(cursor.current(&trace.steps).map(|s| s.letter), Some('E'));
/// assert_eq!(cursor.to_string(), "Step 2 of 16");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepCursor {
    index: usize,
    len: usize,
}

impl StepCursor {
    /// A cursor at the first of `len` steps.
    pub fn new(len: usize) -> Self {
        StepCursor { index: 0, len }
    }

    /// Current step index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of steps in the trace.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` for a trace without steps.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.len
    }

    /// The step under the cursor.
    pub fn current<'a, S>(&self, steps: &'a [S]) -> Option<&'a S> {
        steps.get(self.index)
    }

    /// Moves one step ahead. Returns `false` if already at the last step.
    pub fn forward(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Moves one step back. Returns `false` if already at the first step.
    pub fn back(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Jumps to `index`, clamped to the last step.
    pub fn seek(&mut self, index: usize) {
        self.index = index.min(self.len.saturating_sub(1));
    }

    pub fn seek_start(&mut self) {
        self.index = 0;
    }

    pub fn seek_end(&mut self) {
        self.index = self.len.saturating_sub(1);
    }
}

impl fmt::Display for StepCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len == 0 {
            return write!(f, "No steps");
        }
        write!(f, "Step {} of {}", self.index + 1, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_clamps_at_ends() {
        let mut cursor = StepCursor::new(3);
        assert!(cursor.is_first());
        assert!(!cursor.back());
        assert!(cursor.forward());
        assert!(cursor.forward());
        assert!(cursor.is_last());
        assert!(!cursor.forward());
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn test_cursor_seek() {
        let mut cursor = StepCursor::new(16);
        cursor.seek(7);
        assert_eq!(cursor.index(), 7);
        cursor.seek(100);
        assert_eq!(cursor.index(), 15);
        cursor.seek_start();
        assert_eq!(cursor.index(), 0);
        cursor.seek_end();
        assert_eq!(cursor.to_string(), "Step 16 of 16");
    }

    #[test]
    fn test_cursor_empty_trace() {
        let mut cursor = StepCursor::new(0);
        assert!(cursor.is_empty());
        assert!(!cursor.forward());
        assert!(!cursor.back());
        cursor.seek(5);
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.current::<u8>(&[]), None);
        assert_eq!(cursor.to_string(), "No steps");
    }

    #[test]
    fn test_cursor_reads_steps_backward() {
        let steps = ['a', 'b', 'c'];
        let mut cursor = StepCursor::new(steps.len());
        cursor.seek_end();
        let mut seen = vec![*cursor.current(&steps).unwrap()];
        while cursor.back() {
            seen.push(*cursor.current(&steps).unwrap());
        }
        assert_eq!(seen, vec!['c', 'b', 'a']);
    }
}
