use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::Transcript;

/// Where the transcript is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Interpret a command-line argument; `-` means standard input
    pub fn from_arg(arg: &Path) -> Self {
        if arg == Path::new("-") {
            Self::Stdin
        } else {
            Self::File(arg.to_path_buf())
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdin => None,
            Self::File(path) => Some(path),
        }
    }
}

/// Read a transcript from a file or standard input
pub fn read_transcript(source: &InputSource) -> Result<Transcript> {
    match source {
        InputSource::Stdin => read_transcript_from(std::io::stdin().lock())
            .context("Failed to read transcript from standard input"),
        InputSource::File(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {:?}", path))?;
            Ok(Transcript::from_text(&content))
        }
    }
}

/// Read a transcript from any UTF-8 reader
pub fn read_transcript_from(mut reader: impl Read) -> Result<Transcript> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .context("Transcript is not valid UTF-8 text")?;
    Ok(Transcript::from_text(&content))
}
