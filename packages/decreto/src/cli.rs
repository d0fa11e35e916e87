//! Command-line interface for the decree parser.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use console::style;
use regex::Regex;

use crate::clean::{clean_decree_text, CleanOptions};
use crate::config::{OutputFormat, DEFAULT_CONTENT_KEY};
use crate::contributions::{join_contributions, load_contributions};
use crate::error::Result;
use crate::output::{render_records, save_join_report, save_records};
use crate::parser::{parse_decree_report, ParseReport};
use crate::source::load_decree;

/// Consulta Decreto - Structure public-consultation decree text into provision tables.
#[derive(Parser)]
#[command(name = "consulta-decreto")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// How the decree is read and cleaned.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Decree file (.json export or plain text)
    pub input: PathBuf,

    /// JSON key holding the decree text
    #[arg(short, long, default_value = DEFAULT_CONTENT_KEY)]
    pub key: String,

    /// Skip cleaning; the input is already one unit per line
    #[arg(long)]
    pub raw: bool,

    /// Extra site chrome to remove, as a regex (repeatable)
    #[arg(long = "chrome", value_name = "REGEX", value_parser = Regex::new)]
    pub chrome: Vec<Regex>,

    /// Do not remove the built-in participation-platform chrome
    #[arg(long)]
    pub no_default_chrome: bool,
}

impl InputArgs {
    fn clean_options(&self) -> CleanOptions {
        let base = if self.no_default_chrome {
            CleanOptions::without_chrome()
        } else {
            CleanOptions::default()
        };
        self.chrome
            .iter()
            .cloned()
            .fold(base, CleanOptions::with_chrome_pattern)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a decree into one row per numbered provision.
    Parse {
        #[command(flatten)]
        source: InputArgs,

        /// Output format (default: console table, or inferred from --output)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write the result to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a decree and attach contribution records to its provisions.
    Join {
        #[command(flatten)]
        source: InputArgs,

        /// JSON array of contributions
        contributions: PathBuf,

        /// Save the join report (.json, .yaml or .yml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            source,
            format,
            output,
        } => parse_command(&source, format, output.as_deref()),
        Commands::Join {
            source,
            contributions,
            output,
        } => join_command(&source, &contributions, output.as_deref()),
    }
}

/// Load, optionally clean, and parse the decree described by `source`.
fn load_and_parse(source: &InputArgs) -> Result<ParseReport> {
    let text = load_decree(&source.input, &source.key)?;
    let text = if source.raw {
        text
    } else {
        clean_decree_text(&text, &source.clean_options())
    };
    let report = parse_decree_report(&text)?;

    for line in &report.suspicious_lines {
        eprintln!(
            "{} line {} looks structural but was not recognised: {}",
            style("warning:").yellow().bold(),
            line.line_number,
            line.text
        );
    }
    for displaced in &report.displaced_bodies {
        eprintln!(
            "{} line {} was dropped; item {} took the preceding line as its text: {}",
            style("warning:").yellow().bold(),
            displaced.line_number,
            displaced.sequence_number,
            displaced.text
        );
    }

    Ok(report)
}

/// Execute the parse command.
fn parse_command(
    source: &InputArgs,
    format: Option<OutputFormat>,
    output: Option<&Path>,
) -> Result<()> {
    let report = load_and_parse(source)?;

    let Some(output_path) = output else {
        let rendered = render_records(&report.records, format.unwrap_or(OutputFormat::Table))?;
        println!("{rendered}");
        return Ok(());
    };

    let written = save_records(&report.records, output_path, format)?;

    println!(
        "{} {} provisions from {}",
        style("Parsed").bold(),
        style(report.records.len()).cyan(),
        style(source.input.display()).green()
    );
    for (kind, count) in report.count_by_kind() {
        println!("  {}: {count}", kind.as_str());
    }
    if report.ignored_lines > 0 {
        println!("  Ignored lines: {}", report.ignored_lines);
    }
    if !report.suspicious_lines.is_empty() {
        println!(
            "  Suspicious lines: {}",
            style(report.suspicious_lines.len()).yellow().bold()
        );
    }
    println!();
    println!("{} {}", style("Saved to:").green().bold(), written.display());

    Ok(())
}

/// Execute the join command.
fn join_command(source: &InputArgs, contributions_path: &Path, output: Option<&Path>) -> Result<()> {
    let report = load_and_parse(source)?;
    let contributions = load_contributions(contributions_path)?;
    let joined = join_contributions(&report.records, &contributions);

    println!(
        "{} {} contributions onto {} provisions",
        style("Joined").bold(),
        style(joined.matched_count()).cyan(),
        style(joined.provisions.len()).cyan()
    );
    println!("  Contributions read: {}", contributions.len());
    if !joined.orphans.is_empty() {
        println!(
            "  Orphan contributions: {}",
            style(joined.orphans.len()).yellow().bold()
        );
    }
    for mismatch in &joined.mismatches {
        println!(
            "  Item {} ({}): declares {} contributions, found {}",
            style(mismatch.sequence_number).yellow(),
            mismatch.address,
            mismatch.declared,
            mismatch.found
        );
    }

    if let Some(output_path) = output {
        let written =
            save_join_report(&joined, &source.input.display().to_string(), output_path)?;
        println!();
        println!("{} {}", style("Saved to:").green().bold(), written.display());
    }

    Ok(())
}
