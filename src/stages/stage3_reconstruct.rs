use crate::models::{BoundarySet, Transcript};

/// Rebuild the transcript with a blank line before every paragraph start
///
/// Line 1 never gets a blank line in front of it. Every original line is kept
/// verbatim and in order; the only change is the inserted empty lines.
pub fn reconstruct(transcript: &Transcript, boundaries: &BoundarySet) -> Vec<String> {
    let mut output = Vec::with_capacity(transcript.len() + boundaries.len());

    for (index, line) in transcript.numbered() {
        if index > 1 && boundaries.contains(&index) {
            output.push(String::new());
        }
        output.push(line.to_string());
    }

    output
}
