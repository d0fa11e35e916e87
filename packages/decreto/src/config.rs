//! Configuration constants and validation functions.

use std::path::Path;

use clap::ValueEnum;

use crate::error::{DecretoError, Result};

/// JSON key holding the decree text in exported decree files.
pub const DEFAULT_CONTENT_KEY: &str = "conteudo_decreto";

/// Maximum display width of a console table column.
pub const CONSOLE_COLUMN_WIDTH: usize = 70;

/// Marker appended to truncated console cells.
pub const TRUNCATION_MARKER: &str = "...";

/// Column headers of the provision table, in output order.
///
/// Kept in Portuguese so exported spreadsheets line up with the
/// consultation team's existing analysis sheets.
pub const COLUMN_HEADERS: [&str; 10] = [
    "Título",
    "Capítulo",
    "Seção",
    "Art.",
    "Parágrafo",
    "Inciso",
    "Alínea",
    "Número do Item",
    "Quantidade de Contribuições",
    "Texto do Item",
];

/// Site chrome removed from raw participation-platform dumps.
///
/// Header: from the government banner down to the breadcrumb line.
/// Consultation card: from the agency line down to the "click the balloon"
/// instruction that precedes the decree body.
/// Footer: everything from the closing call to participate.
pub const DEFAULT_CHROME_PATTERNS: [&str; 3] = [
    r"(?s)Presidência da República.*?Página Inicial / Órgãos Públicos[^\n]*",
    r"(?s)Órgão:.*?Clique no balão[^\n]*",
    r"(?s)\nParticipe!\n.*\z",
];

/// Output format for the provision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned console table.
    Table,
    /// Comma-separated values.
    Csv,
    /// Pretty-printed JSON array.
    Json,
    /// YAML sequence.
    Yaml,
}

impl OutputFormat {
    /// Infer the format from a file extension.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use consulta_decreto::config::OutputFormat;
    ///
    /// assert_eq!(
    ///     OutputFormat::from_path(Path::new("analise.csv")).ok(),
    ///     Some(OutputFormat::Csv)
    /// );
    /// assert!(OutputFormat::from_path(Path::new("analise.xlsx")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(DecretoError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Validate that an output file can be created at `path`.
///
/// The parent directory must exist and the path must not be a directory.
pub fn validate_output_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(DecretoError::InvalidOutputPath {
            path: path.display().to_string(),
            reason: "path is a directory".to_string(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(DecretoError::InvalidOutputPath {
                path: path.display().to_string(),
                reason: format!("directory does not exist: {}", parent.display()),
            });
        }
    }

    Ok(())
}
