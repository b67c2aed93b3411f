// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing of free-text customer replies.
//!
//! Replies arrive from phone keyboards: mixed case, stray punctuation,
//! accents that may or may not be typed. Everything here is lenient about
//! presentation and strict about meaning.

/// Lowercase, trim, fold Spanish accents and drop trailing punctuation.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            other => other,
        })
        .collect();
    let trimmed = folded.trim_end_matches(['.', ')', '!', '?', ' ']);
    let trimmed = trimmed.trim_start_matches(['¿', '¡', ' ']);
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pick the option whose keyword list contains the normalized reply.
///
/// Keywords must be given already normalized (lowercase, no accents).
pub fn choose<T: Copy>(text: &str, options: &[(T, &[&str])]) -> Option<T> {
    let reply = normalize(text);
    options
        .iter()
        .find(|(_, keywords)| keywords.contains(&reply.as_str()))
        .map(|(value, _)| *value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

pub fn yes_no(text: &str) -> Option<YesNo> {
    choose(
        text,
        &[
            (YesNo::Yes, &["1", "si", "s", "yes", "y", "correcto", "confirmo", "ok"]),
            (YesNo::No, &["2", "no", "n"]),
        ],
    )
}

/// Parse a positive, finite quantity such as `150`, `$1,500.50`, `85%` or `120 lts`.
pub fn parse_amount(text: &str) -> Option<f64> {
    let reply = normalize(text);
    let mut s = reply.as_str().trim_start_matches('$').trim();
    for unit in ["litros", "lts", "lt", "l", "%", "pesos", "mxn"] {
        if let Some(rest) = s.strip_suffix(unit) {
            s = rest.trim_end();
            break;
        }
    }
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    let value: f64 = cleaned.parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Parse a whole positive count.
pub fn parse_count(text: &str) -> Option<u32> {
    normalize(text).parse::<u32>().ok().filter(|n| *n > 0)
}

/// A name given as "PATERNAL MATERNAL GIVEN NAMES".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName {
    pub paternal_surname: String,
    pub maternal_surname: String,
    pub given_name: String,
}

/// Split a full name. Two words are read as surname and given name.
pub fn parse_full_name(text: &str) -> Option<FullName> {
    let words: Vec<&str> = text.split_whitespace().collect();
    match words.as_slice() {
        [] | [_] => None,
        [paternal, given] => Some(FullName {
            paternal_surname: (*paternal).to_string(),
            maternal_surname: String::new(),
            given_name: (*given).to_string(),
        }),
        [paternal, maternal, given @ ..] => Some(FullName {
            paternal_surname: (*paternal).to_string(),
            maternal_surname: (*maternal).to_string(),
            given_name: given.join(" "),
        }),
    }
}
