//! Cleaning of raw scraped decree text.
//!
//! The participation platform export mixes the decree with navigation
//! chrome, prints the sequence number and the contribution count on lines
//! of their own, and sometimes flattens several provisions onto one line.
//! [`clean_decree_text`] turns that into the one-unit-per-line shape the
//! parser expects.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use crate::config::DEFAULT_CHROME_PATTERNS;

#[allow(clippy::expect_used)] // Static regexes that are guaranteed to be valid
static DEFAULT_CHROME: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DEFAULT_CHROME_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
});

/// A lone integer line followed by another lone integer line.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SPLIT_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ ]*(\d+)[ ]*\n[ ]*(\d+)[ ]*$").expect("valid regex"));

/// Heading flattened onto the end of the previous sentence.
///
/// Only a sentence terminator marks a real heading; a keyword mid-sentence
/// ("no CAPÍTULO III às concessões") is a cross-reference.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HEADING_AFTER_TERMINATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([.;:])[ ]*((?:TÍTULO|CAPÍTULO|SEÇÃO|Seção)\s+[IVXLCDM]+\b)")
        .expect("valid regex")
});

/// Sequence/count pair plus structural marker embedded mid-line.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static INLINE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\S)[ ]+(\d+)[ ]+(\d+)[ ]+(Art\.|Artigo|§|Parágrafo único|[IVXLCDM]+\s*\.?\s*[-–—]|[a-z]\))",
    )
    .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ ]{2,}").expect("valid regex"));

/// Options for [`clean_decree_text`].
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Blocks of site chrome removed before structuring.
    pub chrome_patterns: Vec<Regex>,
}

impl CleanOptions {
    /// Options that keep all text (no chrome removal).
    #[must_use]
    pub fn without_chrome() -> Self {
        Self {
            chrome_patterns: Vec::new(),
        }
    }

    /// Add a chrome pattern.
    #[must_use]
    pub fn with_chrome_pattern(mut self, pattern: Regex) -> Self {
        self.chrome_patterns.push(pattern);
        self
    }
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            chrome_patterns: DEFAULT_CHROME.clone(),
        }
    }
}

/// Replace whitespace variants with plain spaces and drop control characters.
fn normalize_whitespace(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\r' => None,
            c if c.is_whitespace() => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Insert line breaks before headings and embedded numbered pairs.
fn insert_breaks(text: &str) -> String {
    let text = HEADING_AFTER_TERMINATOR.replace_all(text, "${1}\n${2}");
    INLINE_PAIR
        .replace_all(&text, "${1}\n${2} ${3} ${4}")
        .into_owned()
}

/// Collapse space runs, trim lines and drop blank lines.
fn collapse_lines(text: &str) -> String {
    text.lines()
        .map(|line| SPACE_RUN.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Clean raw decree text for the structural parser.
///
/// Steps, in order: NFC normalisation, whitespace/control cleanup, chrome
/// removal, rejoining of split sequence/count pairs, line-break insertion
/// before structural markers, and whitespace collapsing.
///
/// # Examples
/// ```
/// use consulta_decreto::clean::{clean_decree_text, CleanOptions};
///
/// let raw = "CAPÍTULO I\n1\n 6\n\tArt. 1º Texto.\r\n";
/// assert_eq!(
///     clean_decree_text(raw, &CleanOptions::default()),
///     "CAPÍTULO I\n1 6\nArt. 1º Texto."
/// );
/// ```
#[must_use]
pub fn clean_decree_text(raw: &str, options: &CleanOptions) -> String {
    let normalized: String = raw.nfc().collect();
    let mut text = normalize_whitespace(&normalized);

    for pattern in &options.chrome_patterns {
        let stripped = pattern.replace_all(&text, "");
        if stripped.len() != text.len() {
            tracing::debug!(pattern = %pattern.as_str(), "Removed site chrome");
            text = stripped.into_owned();
        }
    }

    let text = SPLIT_PAIR.replace_all(&text, "${1} ${2}");
    let text = insert_breaks(&text);
    let cleaned = collapse_lines(&text);

    tracing::debug!(
        raw_chars = raw.chars().count(),
        cleaned_chars = cleaned.chars().count(),
        "Cleaned decree text"
    );

    cleaned
}
