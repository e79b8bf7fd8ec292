//! Step-by-step replay of the grille cipher.
//!
//! Both traces drive [`GrilleCipher`]'s own block routines and record a
//! snapshot after every placement (encryption) or read (decryption).

use serde::Serialize;
use tracing::debug;

use crate::alphabet::{normalize, LATIN};
use crate::grille::{
    pad_to_blocks, Cell, Grid, Grille, GrilleCipher, WriteOrder, BLOCK_SIZE, HOLES_PER_ROTATION,
};

/// State after one letter has been written through the grille.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrilleStep {
    /// Absolute index over the whole text.
    pub step_index: usize,
    /// Rotation of the grille (0..=3), i.e. turned `90° × rotation`.
    pub rotation: usize,
    /// Grid of the current block after the write.
    pub grid: Grid,
    /// Cell just written.
    pub cell: Cell,
    /// Holes exposed by the current rotation.
    pub rotation_holes: [Cell; HOLES_PER_ROTATION],
    /// Every cell written so far in the block, in write order.
    pub filled_cells: Vec<Cell>,
    pub letter: char,
    pub label: String,
}

/// Full encryption replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrilleEncryptTrace {
    pub steps: Vec<GrilleStep>,
    pub ciphertext: String,
    /// Normalized plaintext including the `X` padding.
    pub plaintext: String,
}

/// State after one letter has been read through the grille.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrilleDecryptStep {
    pub step_index: usize,
    pub rotation: usize,
    /// Block grid, filled row by row from the ciphertext.
    pub grid: Grid,
    /// Cell just read.
    pub cell: Cell,
    pub rotation_holes: [Cell; HOLES_PER_ROTATION],
    /// Letter read, or `None` for a cell past the end of a short block.
    pub letter: Option<char>,
    /// Text decoded so far within the current block.
    pub read_chars: String,
    pub label: String,
}

/// Full decryption replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrilleDecryptTrace {
    pub steps: Vec<GrilleDecryptStep>,
    pub plaintext: String,
    /// Normalized ciphertext.
    pub ciphertext: String,
}

fn write_label(letter: char, rotation: usize) -> String {
    format!("Write '{}' (rotation {}, 90°×{})", letter, rotation, rotation)
}

fn read_label(letter: Option<char>, rotation: usize) -> String {
    match letter {
        Some(letter) => format!("Read '{}' (rotation {}, 90°×{})", letter, rotation, rotation),
        None => format!("Read empty cell (rotation {}, 90°×{})", rotation, rotation),
    }
}

/// Traces encryption of `text` with the classroom grille.
///
/// The text is normalized to Latin letters and padded to whole blocks.
///
/// # Examples
///
/// ```
/// use cipherlab::trace::trace_grille_encrypt;
///
/// let trace = trace_grille_encrypt("abc");
/// assert_eq!(trace.steps.len(), 16);
/// assert_eq!(trace.plaintext, "ABCXXXXXXXXXXXXX");
/// ```
pub fn trace_grille_encrypt(text: &str) -> GrilleEncryptTrace {
    trace_grille_encrypt_with(text, &Grille::METHODOLOGY)
}

/// Traces encryption of `text` with `grille`.
pub fn trace_grille_encrypt_with(text: &str, grille: &Grille) -> GrilleEncryptTrace {
    let cipher = GrilleCipher::new(grille);
    let order = *cipher.write_order();
    let padded = pad_to_blocks(&normalize(text, &LATIN).chars().collect::<Vec<_>>());
    debug!(chars = padded.len(), "trace grille encrypt");

    let mut steps = Vec::with_capacity(padded.len());
    let mut ciphertext = String::with_capacity(padded.len());
    for (block_index, block) in padded.chunks(BLOCK_SIZE).enumerate() {
        let block_start = block_index * BLOCK_SIZE;
        let grid = cipher.write_block(block, |k, cell, grid| {
            let rotation = WriteOrder::rotation_of(k);
            steps.push(GrilleStep {
                step_index: block_start + k,
                rotation,
                grid: *grid,
                cell,
                rotation_holes: order.rotation_holes(rotation),
                filled_cells: order.cells()[..=k].to_vec(),
                letter: block[k],
                label: write_label(block[k], rotation),
            });
        });
        ciphertext.extend(grid.row_major());
    }

    GrilleEncryptTrace {
        steps,
        ciphertext,
        plaintext: padded.into_iter().collect(),
    }
}

/// Traces decryption of `text` with the classroom grille.
///
/// The text is normalized to Latin letters. Padding is not removed.
pub fn trace_grille_decrypt(text: &str) -> GrilleDecryptTrace {
    trace_grille_decrypt_with(text, &Grille::METHODOLOGY)
}

/// Traces decryption of `text` with `grille`.
pub fn trace_grille_decrypt_with(text: &str, grille: &Grille) -> GrilleDecryptTrace {
    let cipher = GrilleCipher::new(grille);
    let order = *cipher.write_order();
    let ciphertext = normalize(text, &LATIN);
    let chars: Vec<char> = ciphertext.chars().collect();
    debug!(chars = chars.len(), "trace grille decrypt");

    let mut steps = Vec::with_capacity(chars.len().div_ceil(BLOCK_SIZE) * BLOCK_SIZE);
    let mut plaintext = String::with_capacity(ciphertext.len());
    for (block_index, block) in chars.chunks(BLOCK_SIZE).enumerate() {
        let block_start = block_index * BLOCK_SIZE;
        let grid = Grid::fill_row_major(block);
        let decoded = cipher.read_block(&grid, |k, cell, letter, so_far| {
            let rotation = WriteOrder::rotation_of(k);
            steps.push(GrilleDecryptStep {
                step_index: block_start + k,
                rotation,
                grid,
                cell,
                rotation_holes: order.rotation_holes(rotation),
                letter,
                read_chars: so_far.to_string(),
                label: read_label(letter, rotation),
            });
        });
        plaintext.push_str(&decoded);
    }

    GrilleDecryptTrace {
        steps,
        plaintext,
        ciphertext,
    }
}
