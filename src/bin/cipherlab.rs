use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use cipherlab::lab::{self, Action, LabTrace};
use cipherlab::trace::StepCursor;
use cipherlab::validation::{validate_file, TaskKind};
use cipherlab::vigenere::{Direction, LetterStep};

#[derive(Parser)]
#[command(name = "cipherlab")]
#[command(about = "Rotating-grille and progressive-key Vigenère teaching ciphers")]
#[command(version)]
struct Cli {
    /// Cipher: `grille` (Latin letters) or `vigenere` (Cyrillic letters)
    task: TaskKind,

    /// `encrypt` or `decrypt`
    action: Action,

    /// Input text
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    text: Option<String>,

    /// Read the input from a .txt file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Vigenère key
    #[arg(long, env = "CIPHERLAB_KEY", default_value = "", hide_env_values = true)]
    key: String,

    /// Print every intermediate step
    #[arg(long)]
    steps: bool,

    /// Output JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cipherlab=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cipherlab=warn"))
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let text = match &cli.file {
        Some(path) => read_text_file(path)?,
        None => cli.text.clone().unwrap_or_default(),
    };

    if cli.steps {
        let traced = lab::trace(cli.task, cli.action, &text, &cli.key)
            .with_context(|| format!("Failed to trace {} {}", cli.task, cli.action))?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&traced)?);
        } else {
            print_trace(&traced);
        }
    } else {
        let out = lab::run(cli.task, cli.action, &text, &cli.key)
            .with_context(|| format!("Failed to {} with {}", cli.action, cli.task))?;
        if cli.json {
            let value = serde_json::json!({
                "task": cli.task,
                "action": cli.action,
                "result": out,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            println!("{}", out);
        }
    }
    Ok(())
}

fn read_text_file(path: &Path) -> Result<String> {
    let meta =
        fs::metadata(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    validate_file(&name, meta.len())?;
    debug!(file = %path.display(), bytes = meta.len(), "reading input");
    fs::read_to_string(path).with_context(|| format!("Failed to read {} as UTF-8", path.display()))
}

fn print_trace(traced: &LabTrace) {
    let mut cursor = StepCursor::new(traced.len());
    if cursor.is_empty() {
        println!("{}", cursor);
        return;
    }
    loop {
        println!("── {} ──", cursor);
        match traced {
            LabTrace::GrilleEncrypt(t) => {
                if let Some(step) = cursor.current(&t.steps) {
                    println!("{}\n{}", step.label, step.grid);
                }
            }
            LabTrace::GrilleDecrypt(t) => {
                if let Some(step) = cursor.current(&t.steps) {
                    println!("{}\n{}\nread: {}", step.label, step.grid, step.read_chars);
                }
            }
            LabTrace::VigenereEncrypt(t) => {
                if let Some(step) = cursor.current(&t.steps) {
                    print_letter(step, Direction::Encrypt);
                }
            }
            LabTrace::VigenereDecrypt(t) => {
                if let Some(step) = cursor.current(&t.steps) {
                    print_letter(step, Direction::Decrypt);
                }
            }
        }
        if !cursor.forward() {
            break;
        }
    }

    match traced {
        LabTrace::GrilleEncrypt(t) => {
            println!("\nplaintext:  {}\nciphertext: {}", t.plaintext, t.ciphertext);
        }
        LabTrace::GrilleDecrypt(t) => {
            println!("\nciphertext: {}\nplaintext:  {}", t.ciphertext, t.plaintext);
        }
        LabTrace::VigenereEncrypt(t) => println!(
            "\nplaintext:  {}\nkey stream: {}\nciphertext: {}",
            t.plaintext, t.key_stream, t.ciphertext
        ),
        LabTrace::VigenereDecrypt(t) => println!(
            "\nciphertext: {}\nkey stream: {}\nplaintext:  {}",
            t.ciphertext, t.key_stream, t.plaintext
        ),
    }
}

fn print_letter(step: &LetterStep, direction: Direction) {
    match direction {
        Direction::Encrypt => println!(
            "{}({}) + {}({}) = {}({})",
            step.plain_char,
            step.plain_index,
            step.key_char,
            step.key_index,
            step.cipher_char,
            step.cipher_index
        ),
        Direction::Decrypt => println!(
            "{}({}) - {}({}) = {}({})",
            step.cipher_char,
            step.cipher_index,
            step.key_char,
            step.key_index,
            step.plain_char,
            step.plain_index
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cipherlab::error::{CipherLabError, FileProblem};
    use cipherlab::validation::MAX_FILE_SIZE_BYTES;
    use tempfile::TempDir;

    fn file_problem(err: &anyhow::Error) -> Option<FileProblem> {
        match err.downcast_ref::<CipherLabError>() {
            Some(CipherLabError::InvalidFile(problem)) => Some(problem.clone()),
            _ => None,
        }
    }

    #[test]
    fn test_read_text_file_accepts_txt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("message.TXT");
        fs::write(&path, "Hello, grille").unwrap();
        assert_eq!(read_text_file(&path).unwrap(), "Hello, grille");
    }

    #[test]
    fn test_read_text_file_rejects_other_extensions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("message.pdf");
        fs::write(&path, "Hello").unwrap();
        let err = read_text_file(&path).unwrap_err();
        assert_eq!(file_problem(&err), Some(FileProblem::UnsupportedType));
    }

    #[test]
    fn test_read_text_file_checks_size_before_reading() {
        // not UTF-8: reading it would fail with a different error
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.txt");
        fs::write(&path, vec![0xFFu8; MAX_FILE_SIZE_BYTES as usize + 1]).unwrap();
        let err = read_text_file(&path).unwrap_err();
        assert_eq!(
            file_problem(&err),
            Some(FileProblem::TooLarge {
                size: MAX_FILE_SIZE_BYTES + 1,
                limit: MAX_FILE_SIZE_BYTES,
            })
        );
    }

    #[test]
    fn test_read_text_file_at_limit_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("full.txt");
        fs::write(&path, vec![b'A'; MAX_FILE_SIZE_BYTES as usize]).unwrap();
        assert_eq!(read_text_file(&path).unwrap().len(), MAX_FILE_SIZE_BYTES as usize);
    }

    #[test]
    fn test_read_text_file_missing() {
        let dir = TempDir::new().unwrap();
        let err = read_text_file(&dir.path().join("absent.txt")).unwrap_err();
        assert!(file_problem(&err).is_none());
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
