//! Line and body classification.
//!
//! Two closed, first-match-wins classifications: [`classify_line`] decides
//! what a whole line is, [`classify_body`] decides which structural slot
//! the body of a numbered line fills.

use regex::Regex;
use std::sync::LazyLock;

/// Título heading: keyword, roman numeral, optional caption without digits.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^T[ÍI]TULO\s+([IVXLCDM]+)(?:\s*[-–—][^0-9]*|\s+[^0-9]*)?$")
        .expect("valid regex")
});

/// Capítulo heading.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CHAPTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^CAP[ÍI]TULO\s+([IVXLCDM]+)(?:\s*[-–—][^0-9]*|\s+[^0-9]*)?$")
        .expect("valid regex")
});

/// Seção heading: roman numeral with optional caption, or a free caption.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SECTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^SE[ÇC][ÃA]O\s+(?:[IVXLCDM]+(?:\s*[-–—][^0-9]*|\s+[^0-9]*)?|\p{L}[\p{L}\s,\-–—]*)$",
    )
    .expect("valid regex")
});

/// Well-formed roman numeral, any case.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ROMAN_NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^M{0,3}(?:CM|CD|D?C{0,3})(?:XC|XL|L?X{0,3})(?:IX|IV|V?I{0,3})$")
        .expect("valid regex")
});

/// Sequence number, contribution count, optional body.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBERED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(\d+)(?:\s+(.*))?$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ARTICLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:Art\.|Artigo)\s*(\d+)([º°]?)(-[A-Z]\b)?").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PARAGRAPH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:§\s*\d+[º°]?|(?i:Parágrafo\s+único))").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([IVXLCDM]+)\s*\.?\s*[-–—]").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUBITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z])\)").expect("valid regex"));

/// Lines that start like structure but may have failed to match.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static STRUCTURAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?i:T[ÍI]TULO|CAP[ÍI]TULO|SE[ÇC][ÃA]O)\b|(?i:Art\.)|§)").expect("valid regex")
});

/// Classification of a whole input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Título heading; carries the trimmed line as label.
    Title(&'a str),

    /// Capítulo heading.
    Chapter(&'a str),

    /// Seção heading.
    Section(&'a str),

    /// Numbered item; `body` is `None` when the pair stands alone.
    NumberedItem {
        sequence_number: u32,
        contribution_count: u32,
        body: Option<&'a str>,
    },

    /// Blank lines, chrome and free prose.
    Ignored,
}

/// Classification of a numbered item's body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyKind<'a> {
    /// Normalised article label, e.g. `Art. 1º`.
    Article(String),

    /// Paragraph marker as printed, e.g. `§ 1º`.
    Paragraph(&'a str),

    /// Roman numeral of an inciso.
    Item(&'a str),

    /// Letter of an alínea.
    SubItem(&'a str),

    /// No recognisable marker.
    Unclassified,
}

/// Classify one line of cleaned decree text.
///
/// # Examples
/// ```
/// use consulta_decreto::parser::{classify_line, LineKind};
///
/// assert_eq!(classify_line("TÍTULO I"), LineKind::Title("TÍTULO I"));
/// assert_eq!(
///     classify_line("3 45 I - ação"),
///     LineKind::NumberedItem { sequence_number: 3, contribution_count: 45, body: Some("I - ação") }
/// );
/// assert_eq!(classify_line("Desde já agradecemos a sua participação!"), LineKind::Ignored);
/// ```
#[must_use]
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Ignored;
    }

    if is_heading(&TITLE_PATTERN, line) {
        return LineKind::Title(line);
    }
    if is_heading(&CHAPTER_PATTERN, line) {
        return LineKind::Chapter(line);
    }
    if SECTION_PATTERN.is_match(line) {
        return LineKind::Section(line);
    }

    classify_numbered(line).unwrap_or(LineKind::Ignored)
}

/// Heading match whose numeral is a real roman numeral ("Título civil" is prose).
fn is_heading(pattern: &Regex, line: &str) -> bool {
    pattern
        .captures(line)
        .and_then(|c| c.get(1))
        .is_some_and(|numeral| ROMAN_NUMERAL.is_match(numeral.as_str()))
}

/// Match the numbered-item shape; both integers must fit in `u32`.
fn classify_numbered(line: &str) -> Option<LineKind<'_>> {
    let captures = NUMBERED_PATTERN.captures(line)?;
    let sequence_number = captures.get(1)?.as_str().parse::<u32>().ok()?;
    let contribution_count = captures.get(2)?.as_str().parse::<u32>().ok()?;
    let body = captures
        .get(3)
        .map(|m| m.as_str().trim())
        .filter(|b| !b.is_empty());

    Some(LineKind::NumberedItem {
        sequence_number,
        contribution_count,
        body,
    })
}

/// Classify the body text of a numbered item by its leading token.
///
/// # Examples
/// ```
/// use consulta_decreto::parser::{classify_body, BodyKind};
///
/// assert_eq!(classify_body("Art. 2º Para os fins"), BodyKind::Article("Art. 2º".to_string()));
/// assert_eq!(classify_body("XIV - prestador"), BodyKind::Item("XIV"));
/// assert_eq!(classify_body("a) do titular"), BodyKind::SubItem("a"));
/// ```
#[must_use]
pub fn classify_body(body: &str) -> BodyKind<'_> {
    let body = body.trim();

    if let Some(captures) = ARTICLE_PATTERN.captures(body) {
        let number = captures.get(1).map_or("", |m| m.as_str());
        let ordinal = captures.get(2).map_or("", |m| m.as_str());
        let suffix = captures.get(3).map_or("", |m| m.as_str());
        return BodyKind::Article(format!("Art. {number}{ordinal}{suffix}"));
    }

    if let Some(m) = PARAGRAPH_PATTERN.find(body) {
        return BodyKind::Paragraph(m.as_str().trim());
    }

    if let Some(roman) = ITEM_PATTERN.captures(body).and_then(|c| c.get(1)) {
        return BodyKind::Item(roman.as_str());
    }

    if let Some(letter) = SUBITEM_PATTERN.captures(body).and_then(|c| c.get(1)) {
        return BodyKind::SubItem(letter.as_str());
    }

    BodyKind::Unclassified
}

/// Whether an ignored line begins with a structural keyword.
///
/// Such lines are most likely headings or articles whose shape the
/// classifier did not anticipate.
#[must_use]
pub fn looks_structural(line: &str) -> bool {
    STRUCTURAL_PREFIX.is_match(line.trim())
}
