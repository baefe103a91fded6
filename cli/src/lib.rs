//! demopack CLI (made by FontLab https://www.fontlab.com/)

use std::env;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use tempfile::NamedTempFile;
use tracing::Level;

use demopack_core::bundle::{bundle, BundleOptions, FileRecord, RecordOrder};
use demopack_core::discovery::DEFAULT_SUFFIX;
use demopack_core::output::{
    validate_var_name, write_assignment, write_json, write_ndjson, DEFAULT_VAR_NAME,
};

/// Environment variable consulted for the log level when no `-v` is given.
pub const LOG_ENV: &str = "DEMOPACK_LOG";

/// CLI entrypoint for demopack.
#[derive(Debug, Parser)]
#[command(
    name = "demopack",
    about = "Bundle demo scripts into a generated base64 manifest (made by FontLab https://www.fontlab.com/)"
)]
pub struct Cli {
    /// Directory to scan for scripts
    #[arg(value_hint = ValueHint::DirPath, default_value = "demos")]
    root: PathBuf,

    /// Only include files whose name ends with this suffix
    #[arg(short = 's', long = "suffix", default_value = DEFAULT_SUFFIX)]
    suffix: String,

    /// Name of the generated JavaScript variable
    #[arg(long = "var", default_value = DEFAULT_VAR_NAME)]
    var_name: String,

    /// Write to this file instead of stdout
    #[arg(short = 'o', long = "output", value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Emit a bare JSON array instead of a variable assignment
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON, one record per line
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Keep filesystem traversal order instead of sorting by name
    #[arg(long = "traversal-order", action = ArgAction::SetTrue)]
    traversal_order: bool,

    /// Follow symlinks while walking the root
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Assignment,
    Json,
    Ndjson,
}

impl Cli {
    fn format(&self) -> OutputFormat {
        if self.ndjson {
            OutputFormat::Ndjson
        } else if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Assignment
        }
    }

    fn bundle_options(&self) -> BundleOptions {
        BundleOptions {
            suffix: self.suffix.clone(),
            follow_symlinks: self.follow_symlinks,
            order: if self.traversal_order {
                RecordOrder::Traversal
            } else {
                RecordOrder::Sorted
            },
            exclude: self.output.iter().cloned().collect(),
        }
    }
}

/// Parse CLI args and run the bundler.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(log_level(cli.verbose, env::var(LOG_ENV).ok().as_deref()));
    run_bundle(&cli)
}

fn run_bundle(cli: &Cli) -> Result<()> {
    let format = cli.format();
    if format == OutputFormat::Assignment {
        validate_var_name(&cli.var_name)?;
    }

    let records = bundle(&cli.root, &cli.bundle_options())?;

    match &cli.output {
        Some(path) => {
            write_output_file(path, &records, format, &cli.var_name)?;
            tracing::info!(output = %path.display(), "wrote bundle");
        }
        None => {
            let stdout = io::stdout();
            emit(&records, format, &cli.var_name, stdout.lock())?;
        }
    }

    Ok(())
}

/// Write into a sibling temp file and rename it over `path` once complete,
/// so a failed run leaves any previous output untouched.
fn write_output_file(
    path: &Path,
    records: &[FileRecord],
    format: OutputFormat,
    var_name: &str,
) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    emit(records, format, var_name, BufWriter::new(tmp.as_file_mut()))
        .with_context(|| format!("failed to write {}", path.display()))?;
    // Temp files are created owner-only; the generated file is meant to be served.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }
    tmp.persist(path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

fn emit(records: &[FileRecord], format: OutputFormat, var_name: &str, w: impl Write) -> Result<()> {
    match format {
        OutputFormat::Assignment => write_assignment(records, var_name, w),
        OutputFormat::Json => write_json(records, w),
        OutputFormat::Ndjson => write_ndjson(records, w),
    }
}

/// Pick the log level: `-v` flags win, then the environment, then WARN.
fn log_level(verbose: u8, env_level: Option<&str>) -> Level {
    match verbose {
        0 => env_level
            .and_then(|raw| raw.trim().parse::<Level>().ok())
            .unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_logging(level: Level) {
    // Logs go to stderr; stdout carries the generated file.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
