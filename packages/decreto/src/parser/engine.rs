//! Single forward pass over cleaned decree text.

use super::classify::{classify_body, classify_line, looks_structural, BodyKind, LineKind};
use super::state::ParserState;
use crate::error::{DecretoError, Result};
use crate::types::{ProvisionKind, ProvisionRecord};

/// A line that was dropped although it starts like a structural element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspiciousLine {
    /// 1-based line number in the parsed text.
    pub line_number: usize,

    /// The trimmed line.
    pub text: String,
}

/// A structural line dropped because the line before it was taken as the
/// body of a numbers-only pair.
///
/// Typical of stray prose between a pair and its real body: the prose
/// becomes an unclassified record and the provision itself is lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplacedBody {
    /// Sequence number of the pair that took the preceding line.
    pub sequence_number: u32,

    /// 1-based line number of the dropped line.
    pub line_number: usize,

    /// The dropped line.
    pub text: String,
}

/// Records produced by a parse, with diagnostics about dropped lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Provision records in document order.
    pub records: Vec<ProvisionRecord>,

    /// Non-empty lines that matched no category.
    pub ignored_lines: usize,

    /// Ignored lines that look like headings or articles.
    pub suspicious_lines: Vec<SuspiciousLine>,

    /// Structural lines that followed an unclassified pair body.
    pub displaced_bodies: Vec<DisplacedBody>,
}

impl ParseReport {
    /// Number of records of each kind, in hierarchy order, skipping zeros.
    #[must_use]
    pub fn count_by_kind(&self) -> Vec<(ProvisionKind, usize)> {
        ProvisionKind::ALL
            .into_iter()
            .map(|kind| (kind, self.records.iter().filter(|r| r.kind == kind).count()))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

/// Sequence number and contribution count waiting for their body line.
#[derive(Debug, Clone, Copy)]
struct PendingPair {
    sequence_number: u32,
    contribution_count: u32,
}

/// Owns the state of one parse; discarded when the parse returns.
#[derive(Debug, Default)]
struct DecreeParser {
    state: ParserState,
    pending: Option<PendingPair>,
    /// Sequence number of the last pair whose next-line body had no marker.
    unmarked_body: Option<u32>,
    report: ParseReport,
}

impl DecreeParser {
    fn feed_line(&mut self, line_number: usize, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        let unmarked_body = self.unmarked_body.take();

        match classify_line(line) {
            LineKind::Title(label) => {
                self.flush_pending();
                self.state = std::mem::take(&mut self.state).with_title(label);
            }
            LineKind::Chapter(label) => {
                self.flush_pending();
                self.state = std::mem::take(&mut self.state).with_chapter(label);
            }
            LineKind::Section(label) => {
                self.flush_pending();
                self.state = std::mem::take(&mut self.state).with_section(label);
            }
            LineKind::NumberedItem {
                sequence_number,
                contribution_count,
                body,
            } => {
                self.flush_pending();
                match body {
                    Some(body) => {
                        self.emit(sequence_number, contribution_count, body);
                    }
                    None => {
                        self.pending = Some(PendingPair {
                            sequence_number,
                            contribution_count,
                        });
                    }
                }
            }
            LineKind::Ignored => self.handle_unmatched(line_number, line.trim(), unmarked_body),
        }
    }

    /// A line that is neither heading nor pair: body of a pending pair, or dropped.
    fn handle_unmatched(&mut self, line_number: usize, line: &str, unmarked_body: Option<u32>) {
        if let Some(pair) = self.pending.take() {
            let kind = self.emit(pair.sequence_number, pair.contribution_count, line);
            if kind == ProvisionKind::Unclassified {
                self.unmarked_body = Some(pair.sequence_number);
            }
            return;
        }

        self.report.ignored_lines += 1;

        if let Some(sequence_number) = unmarked_body {
            if !matches!(classify_body(line), BodyKind::Unclassified) {
                tracing::warn!(
                    sequence_number,
                    line_number,
                    line = %line,
                    "Structural line follows an unclassified pair body, skipping"
                );
                self.report.displaced_bodies.push(DisplacedBody {
                    sequence_number,
                    line_number,
                    text: line.to_string(),
                });
            }
        }

        if looks_structural(line) {
            tracing::warn!(
                line_number,
                line = %line,
                "Structural-looking line did not match any pattern, skipping"
            );
            self.report.suspicious_lines.push(SuspiciousLine {
                line_number,
                text: line.to_string(),
            });
        }
    }

    /// Emit a pair whose body never arrived, with empty text.
    fn flush_pending(&mut self) {
        if let Some(pair) = self.pending.take() {
            tracing::debug!(
                sequence_number = pair.sequence_number,
                "Numbered pair without body text"
            );
            self.emit(pair.sequence_number, pair.contribution_count, "");
        }
    }

    fn emit(&mut self, sequence_number: u32, contribution_count: u32, body: &str) -> ProvisionKind {
        let text = body.trim().to_string();
        let mut record = ProvisionRecord {
            title: self.state.current_title.clone(),
            chapter: self.state.current_chapter.clone(),
            section: self.state.current_section.clone(),
            article: self.state.current_article.clone(),
            paragraph: String::new(),
            item: String::new(),
            subitem: String::new(),
            sequence_number,
            contribution_count,
            text: String::new(),
            kind: ProvisionKind::Unclassified,
        };

        match classify_body(&text) {
            BodyKind::Article(label) => {
                record.article.clone_from(&label);
                record.kind = ProvisionKind::Article;
                self.state = std::mem::take(&mut self.state).with_article(label);
            }
            BodyKind::Paragraph(marker) => {
                record.paragraph = marker.to_string();
                record.kind = ProvisionKind::Paragraph;
            }
            BodyKind::Item(roman) => {
                record.item = roman.to_string();
                record.kind = ProvisionKind::Item;
                self.state = std::mem::take(&mut self.state).with_item(roman);
            }
            BodyKind::SubItem(letter) => {
                record.item.clone_from(&self.state.current_item_context);
                record.subitem = letter.to_string();
                record.kind = ProvisionKind::SubItem;
            }
            BodyKind::Unclassified => {
                record.item.clone_from(&self.state.current_item_context);
            }
        }

        record.text = text;
        let kind = record.kind;
        self.report.records.push(record);
        kind
    }

    fn finish(mut self) -> ParseReport {
        self.flush_pending();
        self.report
    }
}

/// Parse cleaned decree text into provision records with diagnostics.
///
/// # Errors
/// Returns [`DecretoError::EmptyInput`] when `text` is empty or whitespace
/// only. Unrecognised lines never produce an error.
pub fn parse_decree_report(text: &str) -> Result<ParseReport> {
    if text.trim().is_empty() {
        return Err(DecretoError::EmptyInput);
    }

    let mut parser = DecreeParser::default();
    for (index, line) in text.lines().enumerate() {
        parser.feed_line(index + 1, line);
    }
    let report = parser.finish();

    tracing::debug!(
        records = report.records.len(),
        ignored = report.ignored_lines,
        suspicious = report.suspicious_lines.len(),
        displaced = report.displaced_bodies.len(),
        "Parsed decree"
    );

    Ok(report)
}

/// Parse cleaned decree text into provision records.
///
/// The output preserves source line order and is never reordered,
/// deduplicated or merged.
///
/// # Errors
/// Returns [`DecretoError::EmptyInput`] when `text` is empty or whitespace
/// only.
///
/// # Examples
/// ```
/// use consulta_decreto::parse_decree;
///
/// let records = parse_decree("TÍTULO I\nCAPÍTULO I\n1 6\nArt. 1º Texto.").unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].article, "Art. 1º");
/// assert_eq!(records[0].contribution_count, 6);
/// ```
pub fn parse_decree(text: &str) -> Result<Vec<ProvisionRecord>> {
    parse_decree_report(text).map(|report| report.records)
}
