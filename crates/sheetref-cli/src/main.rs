//! sheetref CLI - A1 range inspection tool

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use sheetref_core::{
    column_to_letters, letters_to_column, A1Format, BatchGetResponse, QuoteStyle, SheetRange,
    ValueRange,
};
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sheetref")]
#[command(author, version, about = "Parse, normalize and inspect A1 sheet ranges")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the parts and geometry of a range
    Parse {
        /// Range in A1 notation (e.g. "Sheet1!B2:D10")
        range: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a column number to letters, or letters to a number
    #[command(alias = "col")]
    Column {
        /// Column number (e.g. 28) or letters (e.g. AB)
        value: String,
    },

    /// Rewrite ranges in canonical A1 form
    Normalize {
        /// Ranges to normalize (default: one per line from stdin)
        ranges: Vec<String>,

        /// Sheet title quoting
        #[arg(short, long, value_enum, default_value = "never")]
        quote: QuoteArg,

        /// Write single-cell ranges as one anchor
        #[arg(short, long)]
        collapse: bool,
    },

    /// Print the values of a saved batch read response
    Values {
        /// JSON response file ("-" for stdin)
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum QuoteArg {
    Never,
    WhenNeeded,
    Always,
}

impl From<QuoteArg> for QuoteStyle {
    fn from(arg: QuoteArg) -> Self {
        match arg {
            QuoteArg::Never => QuoteStyle::Never,
            QuoteArg::WhenNeeded => QuoteStyle::WhenNeeded,
            QuoteArg::Always => QuoteStyle::Always,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { range, json } => show_range(&range, json),
        Commands::Column { value } => convert_column(&value),
        Commands::Normalize {
            ranges,
            quote,
            collapse,
        } => normalize(
            ranges,
            &A1Format {
                quote_titles: quote.into(),
                collapse_single_cell: collapse,
            },
        ),
        Commands::Values { input } => show_values(&input),
    }
}

fn show_range(input: &str, json: bool) -> Result<()> {
    let range = SheetRange::parse(input).with_context(|| format!("Failed to parse '{}'", input))?;

    if json {
        let geometry = if range.is_bounded() {
            serde_json::json!({
                "minimum_row": range.minimum_row()?,
                "maximum_row": range.maximum_row()?,
                "minimum_column": range.minimum_column()?,
                "maximum_column": range.maximum_column()?,
                "row_count": range.row_count()?,
                "column_count": range.column_count()?,
            })
        } else {
            Value::Null
        };
        let output = serde_json::json!({
            "range": range,
            "a1": range.a1(),
            "geometry": geometry,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Sheet: {}", range.sheet_title());
    println!("First: {}", or_open(&range.first().to_string()));
    println!("Second: {}", or_open(&range.second().to_string()));

    match (range.minimum_row(), range.maximum_row()) {
        (Ok(min), Ok(max)) => println!("Rows: {}..{} (count {})", min, max, max - min),
        _ => println!("Rows: open"),
    }
    match (range.minimum_column(), range.maximum_column()) {
        (Ok(min), Ok(max)) => println!(
            "Columns: {}..{} (count {})",
            column_to_letters(min),
            column_to_letters(max),
            max - min
        ),
        _ => println!("Columns: open"),
    }

    println!("A1: {}", range.a1());
    Ok(())
}

fn or_open(token: &str) -> &str {
    if token.is_empty() {
        "(open)"
    } else {
        token
    }
}

fn convert_column(value: &str) -> Result<()> {
    println!("{}", column_text(value)?);
    Ok(())
}

/// Letters for a column number, or the number for column letters
fn column_text(value: &str) -> Result<String> {
    if value.is_empty() {
        bail!("Column value is empty");
    }
    if value.chars().all(|c| c.is_ascii_digit()) {
        let column: u32 = value
            .parse()
            .with_context(|| format!("Column number '{}' is out of range", value))?;
        if column == 0 {
            bail!("Column numbers start at 1");
        }
        Ok(column_to_letters(column))
    } else {
        let column = letters_to_column(value)
            .with_context(|| format!("Failed to read column letters '{}'", value))?;
        Ok(column.to_string())
    }
}

fn normalize(ranges: Vec<String>, format: &A1Format) -> Result<()> {
    let inputs = if ranges.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("Failed to read from stdin")?
    } else {
        ranges
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0;

    for line in inputs {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match SheetRange::parse(line) {
            Ok(range) => writeln!(out, "{}", range.a1_with(format))
                .context("Failed to write to stdout")?,
            Err(e) => {
                eprintln!("Warning: {}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} range(s) could not be parsed", failures);
    }
    Ok(())
}

fn show_values(input: &Path) -> Result<()> {
    let text = if input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read '{}'", input.display()))?
    };

    let response: BatchGetResponse<Value> =
        serde_json::from_str(&text).context("Failed to decode batch response")?;
    let ranges = response
        .into_value_ranges()
        .context("Response contains a malformed range")?;

    for (i, value_range) in ranges.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_value_range(value_range);
    }

    Ok(())
}

fn print_value_range(value_range: &ValueRange<Value>) {
    println!("{}", value_range.range().a1());

    match value_range.dense() {
        Ok(grid) => {
            for row in grid {
                let cells: Vec<String> = row.into_iter().map(value_to_text).collect();
                println!("{}", cells.join("\t"));
            }
        }
        Err(e) => {
            eprintln!("Warning: {}, printing values as sent", e);
            for row in value_range.raw_values() {
                let cells: Vec<String> = row.iter().map(|v| value_to_text(Some(v))).collect();
                println!("{}", cells.join("\t"));
            }
        }
    }
}

/// Render a cell for tab-separated output
fn value_to_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.replace(['\t', '\n'], " "),
        Some(other) => other.to_string(),
    }
}
