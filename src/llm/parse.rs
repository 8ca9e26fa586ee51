use std::sync::LazyLock;

use regex::Regex;

static NUMBER_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\s*,\s*\d+)*,?$").expect("valid number list regex"));

static DECIMAL_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("valid decimal digit regex"));

/// Parse a model reply into the line numbers it lists
///
/// Accepts either a single comma-separated line (`"5, 23, 45"`) or one number
/// per line. Blank lines and markdown code fences are ignored. Returns `None`
/// when the reply is not a plain list of numbers. Non-ASCII decimal digits
/// (full-width, Arabic-Indic, ...) are read by their numeric value.
pub fn parse_line_numbers(response: &str) -> Option<Vec<usize>> {
    let response = fold_digits(response);
    let lines: Vec<&str> = response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("```"))
        .collect();

    let list_lines: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| NUMBER_LIST.is_match(line))
        .collect();
    if let [only] = list_lines.as_slice() {
        return split_numbers(only);
    }

    // One number per line
    if lines.is_empty() {
        return None;
    }
    let joined = lines.join(",");
    if NUMBER_LIST.is_match(&joined) {
        return split_numbers(&joined);
    }

    None
}

/// Replace every Unicode decimal digit with its ASCII equivalent
fn fold_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii() {
                return c;
            }
            digit_value(c)
                .and_then(|d| char::from_digit(d, 10))
                .unwrap_or(c)
        })
        .collect()
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Numeric value of a decimal digit character
///
/// Unicode decimal digits come in contiguous runs of ten starting at zero, so
/// the value is the character's offset within its run, modulo ten.
fn digit_value(c: char) -> Option<u32> {
    if !is_decimal_digit(c) {
        return None;
    }
    let mut offset = 0;
    let mut code = c as u32;
    while let Some(prev) = code.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        offset += 1;
        code -= 1;
    }
    Some(offset % 10)
}

fn split_numbers(list: &str) -> Option<Vec<usize>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect()
}
