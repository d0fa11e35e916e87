//! File writers for provision tables and join reports.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::table::render_table;
use crate::config::{validate_output_path, OutputFormat, COLUMN_HEADERS, CONSOLE_COLUMN_WIDTH};
use crate::contributions::JoinReport;
use crate::error::{DecretoError, Result};
use crate::types::ProvisionRecord;

/// Join report wrapped with provenance for export.
#[derive(Debug, Serialize)]
struct JoinDocument<'a> {
    source: &'a str,
    generated_at: String,
    provision_count: usize,
    orphan_count: usize,
    mismatch_count: usize,
    #[serde(flatten)]
    report: &'a JoinReport,
}

/// Render records as CSV with a header row.
pub fn render_csv(records: &[ProvisionRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(COLUMN_HEADERS)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DecretoError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| DecretoError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Indent YAML sequences under their parent key.
///
/// serde_yaml_ng places sequence items (`- `) at the same indent as their
/// parent key; items are moved two spaces in so the output passes
/// `indent-sequences: true` linting. A document that is itself a sequence
/// keeps its root items at column 0.
fn indent_yaml_sequences(yaml: &str) -> String {
    let root_is_sequence = yaml.trim_start().starts_with("- ");
    let mut result: Vec<String> = Vec::new();
    let mut seq_indents: Vec<usize> = Vec::new();

    for line in yaml.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            result.push(line.to_string());
            continue;
        }

        let indent = line.len() - trimmed.len();

        // Pop sequences we've exited
        while let Some(&seq_indent) = seq_indents.last() {
            if indent < seq_indent || (indent == seq_indent && !trimmed.starts_with("- ")) {
                seq_indents.pop();
            } else {
                break;
            }
        }

        if trimmed.starts_with("- ") {
            let is_continuation = seq_indents.last().is_some_and(|&si| si == indent);
            if !is_continuation {
                seq_indents.push(indent);
            }
        }

        let mut depth = seq_indents.len();
        if root_is_sequence && seq_indents.first() == Some(&0) {
            depth -= 1;
        }

        let extra = depth * 2;
        if extra > 0 {
            result.push(format!("{}{}", " ".repeat(indent + extra), trimmed));
        } else {
            result.push(line.to_string());
        }
    }

    let mut joined = result.join("\n");
    joined.push('\n');
    joined
}

/// Serialize any value to YAML with indented sequences.
pub fn generate_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(value)?;
    Ok(indent_yaml_sequences(&yaml))
}

/// Render records in the given format.
pub fn render_records(records: &[ProvisionRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(records, CONSOLE_COLUMN_WIDTH)),
        OutputFormat::Csv => render_csv(records),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Yaml => generate_yaml(records),
    }
}

/// Save records to `path`.
///
/// Without an explicit `format` the format is inferred from the extension.
/// Returns the path written.
pub fn save_records(
    records: &[ProvisionRecord],
    path: &Path,
    format: Option<OutputFormat>,
) -> Result<PathBuf> {
    validate_output_path(path)?;
    let format = match format {
        Some(format) => format,
        None => OutputFormat::from_path(path)?,
    };

    let content = render_records(records, format)?;
    fs::write(path, content)?;
    tracing::debug!(path = %path.display(), records = records.len(), "Saved records");

    Ok(path.to_path_buf())
}

/// Save a join report as JSON or YAML, chosen by extension.
pub fn save_join_report(report: &JoinReport, source: &str, path: &Path) -> Result<PathBuf> {
    validate_output_path(path)?;

    let document = JoinDocument {
        source,
        generated_at: chrono::Local::now().to_rfc3339(),
        provision_count: report.provisions.len(),
        orphan_count: report.orphans.len(),
        mismatch_count: report.mismatches.len(),
        report,
    };

    let content = match OutputFormat::from_path(path)? {
        OutputFormat::Json => serde_json::to_string_pretty(&document)?,
        OutputFormat::Yaml => generate_yaml(&document)?,
        OutputFormat::Csv | OutputFormat::Table => {
            return Err(DecretoError::UnsupportedFormat(path.display().to_string()));
        }
    };

    fs::write(path, content)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contributions::join_contributions;
    use crate::types::{Contribution, ProvisionKind};

    fn record(sequence_number: u32, text: &str) -> ProvisionRecord {
        ProvisionRecord {
            title: "TÍTULO I".to_string(),
            chapter: String::new(),
            section: String::new(),
            article: "Art. 1º".to_string(),
            paragraph: String::new(),
            item: String::new(),
            subitem: String::new(),
            sequence_number,
            contribution_count: 6,
            text: text.to_string(),
            kind: ProvisionKind::Article,
        }
    }

    #[test]
    fn test_render_csv_quotes_fields() {
        let csv = render_csv(&[record(1, "diz \"sim\"\nna linha")]).unwrap();
        assert!(csv.ends_with(",1,6,\"diz \"\"sim\"\"\nna linha\"\n"));
    }

    #[test]
    fn test_render_csv() {
        let csv = render_csv(&[record(1, "Art. 1º Este Decreto, em vigor.")]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Título,Capítulo,Seção,Art.,"));
        assert_eq!(
            lines[1],
            "TÍTULO I,,,Art. 1º,,,,1,6,\"Art. 1º Este Decreto, em vigor.\""
        );
    }

    #[test]
    fn test_render_json_array() {
        let json = render_records(&[record(1, "a"), record(2, "b")], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[1]["sequence_number"], 2);
        assert_eq!(value[0]["kind"], "article");
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render_records(&[record(1, "a")], OutputFormat::Yaml).unwrap();
        assert!(yaml.starts_with("- title: TÍTULO I"));
        assert!(yaml.contains("  sequence_number: 1"));
    }

    #[test]
    fn test_indent_yaml_nested_sequence() {
        let yaml = "provisions:\n- id: 1\n  contributions:\n  - id: CP-1\nsource: x\n";
        assert_eq!(
            indent_yaml_sequences(yaml),
            "provisions:\n  - id: 1\n    contributions:\n      - id: CP-1\nsource: x\n"
        );
    }

    #[test]
    fn test_save_records_infers_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analise.csv");
        let written = save_records(&[record(1, "a")], &path, None).unwrap();
        assert_eq!(written, path);
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Título,"));
    }

    #[test]
    fn test_save_records_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analise.xlsx");
        assert!(matches!(
            save_records(&[record(1, "a")], &path, None),
            Err(DecretoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_save_join_report_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relatorio.json");
        let contributions = vec![Contribution {
            id: "CP-1".to_string(),
            sequence_number: 1,
            author: Some("Maria".to_string()),
            text: "Rever".to_string(),
            status: None,
        }];
        let report = join_contributions(&[record(1, "a")], &contributions);
        save_join_report(&report, "decreto.json", &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["source"], "decreto.json");
        assert_eq!(value["provision_count"], 1);
        assert_eq!(value["mismatch_count"], 1);
        assert_eq!(value["provisions"][0]["contributions"][0]["author"], "Maria");
    }

    #[test]
    fn test_save_join_report_rejects_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relatorio.csv");
        let report = join_contributions(&[], &[]);
        assert!(save_join_report(&report, "x", &path).is_err());
    }
}
