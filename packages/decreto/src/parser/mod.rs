//! Structural parser for decree text.
//!
//! Turns cleaned decree text into an ordered sequence of provision records,
//! each tagged with its Título > Capítulo > Seção > Art. > § / inciso /
//! alínea path. Each line is classified once ([`classify_line`]); numbered
//! lines have their body classified a second time ([`classify_body`]).
//! Structural context lives in a [`ParserState`] owned by a single parse.

mod classify;
mod engine;
mod state;

pub use classify::{classify_body, classify_line, looks_structural, BodyKind, LineKind};
pub use engine::{
    parse_decree, parse_decree_report, DisplacedBody, ParseReport, SuspiciousLine,
};
pub use state::ParserState;
