//! Core data types for the decree parser.
//!
//! A decree is flattened into an ordered sequence of [`ProvisionRecord`]s,
//! one per numbered line, each carrying its full structural path.

use serde::{Deserialize, Serialize};

/// Which structural slot a numbered line newly set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionKind {
    /// Artigo (`Art. N`).
    Article,

    /// Parágrafo (`§ N` or `Parágrafo único`).
    Paragraph,

    /// Inciso (roman numeral followed by a dash).
    Item,

    /// Alínea (lowercase letter followed by a parenthesis).
    SubItem,

    /// Numbered line without a recognisable legal marker.
    Unclassified,
}

impl ProvisionKind {
    /// Every kind, in hierarchy order.
    pub const ALL: [Self; 5] = [
        Self::Article,
        Self::Paragraph,
        Self::Item,
        Self::SubItem,
        Self::Unclassified,
    ];

    /// Get the Portuguese name of the structural kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "artigo",
            Self::Paragraph => "parágrafo",
            Self::Item => "inciso",
            Self::SubItem => "alínea",
            Self::Unclassified => "sem classificação",
        }
    }
}

/// One addressable line of the decree.
///
/// Exactly one of `article`/`paragraph`/`item`/`subitem` is newly set by
/// the line itself (see `kind`); the others carry the enclosing context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionRecord {
    /// Enclosing Título heading, empty for preamble text.
    pub title: String,

    /// Enclosing Capítulo heading.
    pub chapter: String,

    /// Enclosing Seção heading.
    pub section: String,

    /// Article label (`Art. 2º`), own or inherited.
    pub article: String,

    /// Paragraph marker (`§ 1º`, `Parágrafo único`).
    pub paragraph: String,

    /// Item roman numeral (`XIV`), own or inherited by a sub-item.
    pub item: String,

    /// Sub-item letter (`a`).
    pub subitem: String,

    /// The decree's own running counter; join key for contributions.
    pub sequence_number: u32,

    /// Number of contributions printed next to the line.
    pub contribution_count: u32,

    /// Trimmed body text, including its structural marker.
    pub text: String,

    /// Which slot this line newly set.
    pub kind: ProvisionKind,
}

impl ProvisionRecord {
    /// Values in [`crate::config::COLUMN_HEADERS`] order.
    #[must_use]
    pub fn to_row(&self) -> [String; 10] {
        [
            self.title.clone(),
            self.chapter.clone(),
            self.section.clone(),
            self.article.clone(),
            self.paragraph.clone(),
            self.item.clone(),
            self.subitem.clone(),
            self.sequence_number.to_string(),
            self.contribution_count.to_string(),
            self.text.clone(),
        ]
    }

    /// Human-readable address, e.g. `Art. 2º, XIV, a`.
    ///
    /// # Examples
    /// ```
    /// use consulta_decreto::types::{ProvisionKind, ProvisionRecord};
    ///
    /// let record = ProvisionRecord {
    ///     title: "TÍTULO I".to_string(),
    ///     chapter: "CAPÍTULO II".to_string(),
    ///     section: String::new(),
    ///     article: "Art. 2º".to_string(),
    ///     paragraph: String::new(),
    ///     item: "XIV".to_string(),
    ///     subitem: "a".to_string(),
    ///     sequence_number: 17,
    ///     contribution_count: 7,
    ///     text: "a) do titular".to_string(),
    ///     kind: ProvisionKind::SubItem,
    /// };
    /// assert_eq!(record.address(), "Art. 2º, XIV, a");
    /// ```
    #[must_use]
    pub fn address(&self) -> String {
        [&self.article, &self.paragraph, &self.item, &self.subitem]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One citizen contribution exported from the consultation platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Platform identifier (e.g., "CP-917373").
    pub id: String,

    /// Sequence number of the decree line the contribution targets.
    pub sequence_number: u32,

    /// Contributor name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Submitted text.
    #[serde(default)]
    pub text: String,

    /// Analysis outcome (e.g., "Acolhida Total").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
