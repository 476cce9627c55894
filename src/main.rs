// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use kr_regnum::{
    config::env_bool, format_input, load_csv, logging, mask_input, validate, write_csv, BatchReport,
    IdKind,
};

#[derive(Parser, Debug)]
#[command(name = "kr-regnum", version, about = "Korean registration number checker")]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate one identifier
    Check {
        /// rrn, brn or crn
        kind: IdKind,
        value: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the hyphenated form of an identifier
    Format {
        kind: IdKind,
        value: String,
        /// Hide trailing digits
        #[arg(long)]
        mask: bool,
    },
    /// Validate a CSV file with a `kind,value` header
    Batch {
        path: PathBuf,
        /// Print entries and summary as JSON
        #[arg(long)]
        json: bool,
        /// Write per-row results to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Interactive checker (default)
    Tui,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    logging::init_tracing(level, env_bool("REGNUM_LOG_JSON", false));

    let mut out = io::stdout().lock();
    let ok = match cli.command.unwrap_or(Command::Tui) {
        Command::Check { kind, value, json } => run_check(kind, &value, json, &mut out)?,
        Command::Format { kind, value, mask } => {
            run_format(kind, &value, mask, &mut out, &mut io::stderr())?
        }
        Command::Batch { path, json, output } => run_batch(&path, json, output, &mut out)?,
        Command::Tui => {
            drop(out);
            return run_ui_mode();
        }
    };

    Ok(exit_for(ok))
}

/// Print the result of one validation; `true` when the identifier is valid
fn run_check(kind: IdKind, value: &str, json: bool, out: &mut impl Write) -> Result<bool> {
    let result = validate(kind, value);

    if json {
        serde_json::to_writer_pretty(&mut *out, &result)?;
        writeln!(out)?;
    } else {
        let mark = if result.is_valid { "✓" } else { "✗" };
        writeln!(out, "{} {}", mark, result.message)?;

        if let Some(details) = &result.details {
            writeln!(out, "  checksum: {}", if details.checksum_passed { "passed" } else { "failed" })?;
            if let Some(business_type) = details.business_type {
                writeln!(out, "  type:     {} ({})", business_type.as_str(), business_type.label())?;
            }
            if let Some(info) = &details.resident {
                let birth = info
                    .birth_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "invalid date".to_string());
                writeln!(out, "  birth:    {}", birth)?;
                writeln!(out, "  gender:   {}", info.gender.label())?;
                writeln!(out, "  foreign:  {}", info.foreigner)?;
            }
            if let Some(info) = &details.corporate {
                writeln!(out, "  office:   {}", info.registry_office)?;
                writeln!(out, "  kind:     {}", info.kind_code)?;
            }
        }
    }

    Ok(result.is_valid)
}

/// `false` when the digit count is wrong; the check digit is not verified
fn run_format(
    kind: IdKind,
    value: &str,
    mask: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<bool> {
    let rendered = if mask {
        mask_input(kind, value)
    } else {
        format_input(kind, value)
    };

    match rendered {
        Ok(text) => {
            writeln!(out, "{}", text)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(err, "✗ {}", e)?;
            Ok(false)
        }
    }
}

/// `true` only when every row is valid
fn run_batch(
    path: &Path,
    json: bool,
    output: Option<PathBuf>,
    out: &mut impl Write,
) -> Result<bool> {
    let records = load_csv(path)?;
    let report = BatchReport::build(&records);

    if let Some(out_path) = output {
        let file = File::create(&out_path)
            .with_context(|| format!("Failed to create {}", out_path.display()))?;
        write_csv(file, &report.entries)?;
        info!(path = %out_path.display(), "wrote batch results");
    }

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        for entry in report.entries.iter().filter(|e| !e.result.is_valid) {
            writeln!(
                out,
                "  line {:>4} [{}] {}",
                entry.line,
                entry.kind.map(|k| k.code()).unwrap_or("?"),
                entry.result.message
            )?;
        }
        writeln!(out, "{}", report.summary.summary())?;
    }

    Ok(report.summary.invalid() == 0)
}

fn exit_for(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<ExitCode> {
    let mut app = ui::App::new(IdKind::Business);
    ui::run_ui(&mut app)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<ExitCode> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: kr-regnum check <KIND> <VALUE>");
    Ok(ExitCode::FAILURE)
}
