use crate::models::CandidateLine;

/// Default paragraph length the model is asked to aim for
pub const TARGET_PARAGRAPH_CHARS: usize = 400;

/// Build the boundary-detection prompt for a run of candidate lines
///
/// Lines are shown with their original transcript indices so the reply maps
/// straight back onto the transcript.
pub fn build_boundary_prompt(lines: &[CandidateLine], target_paragraph_chars: usize) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "Identify the starting lines of paragraphs in the following conversation transcript.\n",
    );
    prompt.push_str("Exclude lines that cover the same topic as the previous line.\n");
    prompt.push_str(&format!(
        "Ensure each paragraph has approximately {} characters and do not make paragraphs that are too short.\n",
        target_paragraph_chars
    ));
    prompt.push_str("No explanations needed.\n");
    prompt.push_str("Output a comma-separated list of line numbers.\n");
    prompt.push_str(
        "For example, if lines 15, 19, and 22 are suitable as the starting lines of paragraphs, output them as:\n",
    );
    prompt.push_str("15, 19, 22\n\n");
    prompt.push_str(&format_numbered_lines(lines));

    prompt
}

/// Render lines as `"<index>: <text>"`, one per line
fn format_numbered_lines(lines: &[CandidateLine]) -> String {
    lines
        .iter()
        .map(|line| format!("{}: {}", line.index, line.text))
        .collect::<Vec<_>>()
        .join("\n")
}
