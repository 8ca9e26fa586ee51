use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Suffix appended to the input file stem for automatic output names
pub const OUTPUT_SUFFIX: &str = "-paracom";

/// Where the paragraphed transcript is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Derive an output path next to the input: `talk.txt` -> `talk-paracom.txt`
///
/// Inputs without an extension get `.txt`.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.file_stem().unwrap_or_default());
    name.push(OUTPUT_SUFFIX);
    name.push(".");
    name.push(input.extension().unwrap_or("txt".as_ref()));
    input.with_file_name(name)
}

/// Join lines into the output text, ending with a newline
pub fn render_lines(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Write the paragraphed transcript to its destination
pub fn write_output(target: &OutputTarget, lines: &[String]) -> Result<()> {
    let text = render_lines(lines);
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write to standard output")
        }
        OutputTarget::File(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write file: {:?}", path)),
    }
}
