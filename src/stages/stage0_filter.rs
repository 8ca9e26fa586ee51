use crate::models::{CandidateLine, Transcript};

/// Select the lines the model is asked to judge
///
/// A line is skipped when its text, with leading whitespace removed, starts with
/// any of `skip_prefixes` (literal, case-sensitive). Skipped lines keep their
/// place in the transcript; they are simply never eligible to start a paragraph.
/// Blank lines are never candidates.
pub fn filter_candidates(transcript: &Transcript, skip_prefixes: &[String]) -> Vec<CandidateLine> {
    transcript
        .numbered()
        .filter(|(_, text)| !is_skipped(text, skip_prefixes))
        .map(|(index, text)| CandidateLine::new(index, text))
        .collect()
}

fn is_skipped(text: &str, skip_prefixes: &[String]) -> bool {
    let text = text.trim();
    text.is_empty()
        || skip_prefixes
            .iter()
            .any(|prefix| text.starts_with(prefix.as_str()))
}
