//! Structural context carried through a parse.

/// Most recently seen heading of each kind.
///
/// Transitions consume the state and return the next one. Setting a level
/// clears every level below it and never touches the levels above.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    pub current_title: String,
    pub current_chapter: String,
    pub current_section: String,
    pub current_article: String,
    pub current_item_context: String,
}

impl ParserState {
    /// Create an empty state (preamble context).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a new Título; clears chapter, section, article and item.
    #[must_use]
    pub fn with_title(self, label: impl Into<String>) -> Self {
        Self {
            current_title: label.into(),
            ..Self::default()
        }
    }

    /// Enter a new Capítulo; clears section, article and item.
    #[must_use]
    pub fn with_chapter(self, label: impl Into<String>) -> Self {
        Self {
            current_chapter: label.into(),
            current_section: String::new(),
            current_article: String::new(),
            current_item_context: String::new(),
            ..self
        }
    }

    /// Enter a new Seção; clears article and item.
    #[must_use]
    pub fn with_section(self, label: impl Into<String>) -> Self {
        Self {
            current_section: label.into(),
            current_article: String::new(),
            current_item_context: String::new(),
            ..self
        }
    }

    /// Enter a new article; clears the item context.
    #[must_use]
    pub fn with_article(self, label: impl Into<String>) -> Self {
        Self {
            current_article: label.into(),
            current_item_context: String::new(),
            ..self
        }
    }

    /// Remember the latest inciso for the alíneas that follow it.
    #[must_use]
    pub fn with_item(self, label: impl Into<String>) -> Self {
        Self {
            current_item_context: label.into(),
            ..self
        }
    }
}
