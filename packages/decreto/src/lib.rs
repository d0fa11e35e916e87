//! Consulta Decreto - Structure public-consultation decree text.
//!
//! Decrees published for public consultation print, before every
//! commentable provision, a sequence number and the number of contributions
//! it received. This crate turns that text into flat provision records that
//! carry their full structural address (título, capítulo, seção, artigo,
//! parágrafo, inciso, alínea), and can attach contribution records to them.
//!
//! # Example
//!
//! ```
//! use consulta_decreto::parse_decree;
//!
//! let text = "TÍTULO I\nCAPÍTULO II\n2 20 Art. 2º Para os fins:\n3 45 I - ação;";
//! let records = parse_decree(text).unwrap();
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].article, "Art. 2º");
//! assert_eq!(records[1].item, "I");
//! assert_eq!(records[1].contribution_count, 45);
//! ```
//!
//! # Architecture
//!
//! - [`parser`]: Line classification, parser state and the parse loop
//! - [`clean`]: Raw platform dump cleanup
//! - [`source`]: Decree loading from JSON exports and text files
//! - [`contributions`]: Contribution join by sequence number
//! - [`output`]: Console table, CSV, JSON and YAML output
//! - [`config`]: Constants, output formats and path validation
//! - [`types`]: Provision and contribution records
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod clean;
pub mod cli;
pub mod config;
pub mod contributions;
pub mod error;
pub mod output;
pub mod parser;
pub mod source;
pub mod types;

// Re-export main functions
pub use clean::{clean_decree_text, CleanOptions};
pub use parser::{parse_decree, parse_decree_report, ParseReport};

// Re-export commonly used items
pub use error::{DecretoError, Result};
pub use types::{Contribution, ProvisionKind, ProvisionRecord};
