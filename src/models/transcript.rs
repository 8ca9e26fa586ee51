use serde::{Deserialize, Serialize};

/// Plain-text conversation transcript held as an ordered list of lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Lines in order; addressed 1-based through [`Transcript::line`]
    pub lines: Vec<String>,
}

impl Transcript {
    /// Build a transcript from already-split lines, kept verbatim
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Build a transcript from raw text
    ///
    /// Trailing whitespace is stripped from every line and lines left empty are
    /// dropped, so any paragraphing already present in the input is discarded.
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    /// Get a line by its 1-based index
    pub fn line(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over `(index, text)` pairs with 1-based indices
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (i + 1, line.as_str()))
    }
}

/// A line eligible for boundary judgment, tagged with its transcript index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateLine {
    /// 1-based index into the original transcript
    pub index: usize,
    pub text: String,
}

impl CandidateLine {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_drops_blank_lines() {
        let transcript = Transcript::from_text("Hello  \n\n   \nWorld\r\nBye\n");

        assert_eq!(transcript.lines, vec!["Hello", "World", "Bye"]);
    }

    #[test]
    fn test_line_is_one_based() {
        let transcript = Transcript::new(vec!["A".to_string(), "B".to_string()]);

        assert_eq!(transcript.line(0), None);
        assert_eq!(transcript.line(1), Some("A"));
        assert_eq!(transcript.line(2), Some("B"));
        assert_eq!(transcript.line(3), None);
    }

    #[test]
    fn test_numbered() {
        let transcript = Transcript::from_text("x\ny");
        let numbered: Vec<_> = transcript.numbered().collect();

        assert_eq!(numbered, vec![(1, "x"), (2, "y")]);
    }
}
