//! Classroom ciphers with step-by-step traces.
//!
//! cipherlab implements two classical teaching ciphers and, for each, a
//! replay of every intermediate state so a learner can watch the algorithm
//! run one step at a time:
//!
//! - a **rotating grille** transposition over Latin letters, using a 4x4
//!   stencil with 4 holes turned 90° clockwise after every 4 letters;
//! - a **progressive-key Vigenère** substitution, whose key letters shift one
//!   position further along the alphabet on every pass over the key.
//!
//! No cryptographic security is claimed.
//!
//! # Architecture
//!
//! ```text
//! alphabet    (Latin / Cyrillic letters, normalize)
//!     ↓
//! grille      vigenere       (engines)
//!     ↓           ↓
//! trace::grille  trace::vigenere   (replays built on the engines' own loops)
//!     ↓
//! validation → lab           (what a host UI calls)
//! ```
//!
//! # Examples
//!
//! Encrypt with the classroom grille and watch the first write:
//!
//! ```
//! use cipherlab::grille::{self, Grille};
//! use cipherlab::trace::trace_grille_encrypt;
//!
//! let ciphertext = grille::encrypt("ABCDEFGHIJKLMNOP", &Grille::METHODOLOGY);
//! assert_eq!(ciphertext, "AMIEFJNBKGCOPDHL");
//!
//! let trace = trace_grille_encrypt("ABCDEFGHIJKLMNOP");
//! assert_eq!(trace.ciphertext, ciphertext);
//! assert_eq!(trace.steps[0].label, "Write 'A' (rotation 0, 90°×0)");
//! ```
//!
//! Progressive-key Vigenère over the Cyrillic alphabet:
//!
//! ```
//! use cipherlab::alphabet::{normalize, CYRILLIC};
//! use cipherlab::vigenere;
//!
//! let text = normalize("Привет, мир!", &CYRILLIC);
//! let ciphertext = vigenere::encrypt(&text, "КЛЮЧ", &CYRILLIC);
//! assert_eq!(vigenere::decrypt(&ciphertext, "КЛЮЧ", &CYRILLIC), "ПРИВЕТМИР");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod error;
pub mod grille;
pub mod lab;
pub mod trace;
pub mod validation;
pub mod vigenere;

pub use alphabet::{normalize, Alphabet, CYRILLIC, LATIN};
pub use error::{CipherLabError, CipherLabResult};
pub use grille::{Grille, GrilleCipher};
pub use lab::{Action, LabTrace};
pub use validation::{validate, TaskKind};
pub use vigenere::VigenereCipher;
