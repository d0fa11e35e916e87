//! End-to-end tests for the decree pipeline.
//!
//! Runs loading, cleaning, parsing, joining and export over a raw dump of
//! a sanitation decree consultation.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use consulta_decreto::config::{OutputFormat, DEFAULT_CONTENT_KEY};
use consulta_decreto::contributions::{join_contributions, load_contributions};
use consulta_decreto::output::{render_records, save_join_report, save_records};
use consulta_decreto::source::load_decree;
use consulta_decreto::{
    clean_decree_text, parse_decree, parse_decree_report, CleanOptions, ParseReport,
    ProvisionKind, ProvisionRecord,
};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("decreto")
        .join(name)
}

/// Load, clean and parse the decree fixture.
fn run_pipeline() -> ParseReport {
    let raw = load_decree(&fixture_path("decreto.json"), DEFAULT_CONTENT_KEY)
        .unwrap_or_else(|e| panic!("Failed to load decree fixture: {e}"));
    let cleaned = clean_decree_text(&raw, &CleanOptions::default());
    parse_decree_report(&cleaned).unwrap_or_else(|e| panic!("Failed to parse decree: {e}"))
}

#[allow(clippy::too_many_arguments)]
fn expected(
    title: &str,
    chapter: &str,
    section: &str,
    article: &str,
    paragraph: &str,
    item: &str,
    subitem: &str,
    numbers: (u32, u32),
    text: &str,
    kind: ProvisionKind,
) -> ProvisionRecord {
    ProvisionRecord {
        title: title.to_string(),
        chapter: chapter.to_string(),
        section: section.to_string(),
        article: article.to_string(),
        paragraph: paragraph.to_string(),
        item: item.to_string(),
        subitem: subitem.to_string(),
        sequence_number: numbers.0,
        contribution_count: numbers.1,
        text: text.to_string(),
        kind,
    }
}

#[test]
fn test_pipeline_record_count_and_order() {
    let report = run_pipeline();
    let numbers: Vec<u32> = report.records.iter().map(|r| r.sequence_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 270]);
}

#[test]
fn test_pipeline_full_records() {
    let report = run_pipeline();
    let t1 = "TÍTULO I";
    let t2 = "TÍTULO II";

    let expected_records = vec![
        expected(
            t1,
            "CAPÍTULO I",
            "",
            "Art. 1º",
            "",
            "",
            "",
            (1, 6),
            "Art. 1º Este Decreto estabelece normas para a execução da Lei nº 11.445, de 5 de janeiro de 2007.",
            ProvisionKind::Article,
        ),
        expected(
            t1,
            "CAPÍTULO II",
            "",
            "Art. 2º",
            "",
            "",
            "",
            (2, 20),
            "Art. 2º Para os fins deste Decreto, considera-se:",
            ProvisionKind::Article,
        ),
        expected(
            t1,
            "CAPÍTULO II",
            "",
            "Art. 2º",
            "",
            "I",
            "",
            (3, 45),
            "I - saneamento básico: conjunto de serviços públicos, infraestruturas e instalações operacionais;",
            ProvisionKind::Item,
        ),
        expected(
            t1,
            "CAPÍTULO II",
            "",
            "Art. 2º",
            "",
            "I",
            "a",
            (4, 12),
            "a) abastecimento de água potável;",
            ProvisionKind::SubItem,
        ),
        expected(
            t1,
            "CAPÍTULO II",
            "",
            "Art. 2º",
            "",
            "I",
            "b",
            (5, 3),
            "b) esgotamento sanitário;",
            ProvisionKind::SubItem,
        ),
        expected(
            t1,
            "CAPÍTULO II",
            "",
            "Art. 2º",
            "",
            "II",
            "",
            (6, 7),
            "II - universalização: ampliação progressiva do acesso;",
            ProvisionKind::Item,
        ),
        expected(
            t1,
            "CAPÍTULO II",
            "",
            "Art. 2º",
            "Parágrafo único",
            "",
            "",
            (7, 2),
            "Parágrafo único. Aplicam-se subsidiariamente as normas técnicas.",
            ProvisionKind::Paragraph,
        ),
        expected(
            t2,
            "CAPÍTULO I",
            "Seção I",
            "Art. 3º",
            "",
            "",
            "",
            (8, 9),
            "Art. 3º A regulação será exercida por entidade com independência decisória.",
            ProvisionKind::Article,
        ),
        expected(
            t2,
            "CAPÍTULO I",
            "Seção I",
            "Art. 3º",
            "§ 1º",
            "",
            "",
            (9, 4),
            "§ 1º A entidade reguladora publicará relatório anual.",
            ProvisionKind::Paragraph,
        ),
        expected(
            t2,
            "CAPÍTULO I",
            "Seção II",
            "Art. 3º-A",
            "",
            "",
            "",
            (10, 0),
            "Art. 3º-A A fiscalização observará o disposto em regulamento.",
            ProvisionKind::Article,
        ),
        expected(
            t2,
            "CAPÍTULO I",
            "Seção II",
            "Art. 3º-A",
            "",
            "",
            "",
            (270, 25),
            "OBS: CONTRIBUIÇÕES ADICIONAIS - USE ESTE ESPAÇO PARA SUGESTÕES GERAIS",
            ProvisionKind::Unclassified,
        ),
    ];

    assert_eq!(report.records, expected_records);
}

#[test]
fn test_pipeline_diagnostics() {
    let report = run_pipeline();
    assert_eq!(report.ignored_lines, 11);
    assert_eq!(report.suspicious_lines.len(), 1);
    assert_eq!(report.suspicious_lines[0].line_number, 34);
    assert_eq!(
        report.suspicious_lines[0].text,
        "CAPÍTULO 3 (numeração provisória)"
    );
    assert!(report.displaced_bodies.is_empty());
}

#[test]
fn test_pipeline_is_deterministic() {
    let raw = load_decree(&fixture_path("decreto.json"), DEFAULT_CONTENT_KEY).unwrap();
    let cleaned = clean_decree_text(&raw, &CleanOptions::default());
    assert_eq!(parse_decree(&cleaned).unwrap(), parse_decree(&cleaned).unwrap());
}

#[test]
fn test_pipeline_join() {
    let report = run_pipeline();
    let contributions = load_contributions(&fixture_path("contribuicoes.json")).unwrap();
    let joined = join_contributions(&report.records, &contributions);

    assert_eq!(joined.provisions.len(), 11);
    assert_eq!(joined.matched_count(), 7);

    let orphan_ids: Vec<&str> = joined.orphans.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(orphan_ids, vec!["CP-917306"]);

    let item_ids: Vec<&str> = joined.provisions[2]
        .contributions
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(item_ids, vec!["CP-917302", "CP-917304"]);

    // Alínea b) and the zero-count article agree with the submissions
    assert_eq!(joined.mismatches.len(), 9);
    assert!(joined
        .mismatches
        .iter()
        .all(|m| m.sequence_number != 5 && m.sequence_number != 10));
}

#[test]
fn test_pipeline_exports() {
    let report = run_pipeline();
    let dir = tempfile::tempdir().unwrap();

    let csv_path = save_records(&report.records, &dir.path().join("analise.csv"), None).unwrap();
    let csv = fs::read_to_string(csv_path).unwrap();
    assert_eq!(csv.lines().count(), 12);
    assert!(csv.contains("TÍTULO I,CAPÍTULO II,,Art. 2º,,I,a,4,12,a) abastecimento de água potável;"));

    let yaml_path =
        save_records(&report.records, &dir.path().join("analise.yaml"), None).unwrap();
    let yaml = fs::read_to_string(yaml_path).unwrap();
    assert!(yaml.starts_with("- title: TÍTULO I\n"));
    assert!(yaml.contains("  kind: sub_item\n"));

    let contributions = load_contributions(&fixture_path("contribuicoes.json")).unwrap();
    let joined = join_contributions(&report.records, &contributions);
    let report_path = save_join_report(
        &joined,
        "decreto.json",
        &dir.path().join("relatorio.json"),
    )
    .unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(report_path).unwrap()).unwrap();
    assert_eq!(value["provision_count"], 11);
    assert_eq!(value["orphan_count"], 1);
    assert_eq!(value["provisions"][4]["contributions"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_pipeline_console_table() {
    let report = run_pipeline();
    let table = render_records(&report.records, OutputFormat::Table).unwrap();
    assert_eq!(table.lines().count(), 13);
    assert!(table.lines().all(|line| !line.is_empty()));
}

#[test]
fn test_raw_mode_skips_cleaning() {
    // Without cleaning the split pairs stay on separate lines and are ignored
    let raw = load_decree(&fixture_path("decreto.json"), DEFAULT_CONTENT_KEY).unwrap();
    let report = parse_decree_report(&raw).unwrap();
    assert!(report.records.is_empty());
}
