//! The closed type hierarchy suppressor CLI.
//!
//! Provides the `cthc` command with the following subcommands:
//!
//! - `cthc check <snapshot>` - Report which diagnostics of a compilation
//!   snapshot are suppressed
//! - `cthc classify <snapshot> <type>` - Print the leaves of a closed hierarchy
//! - `cthc descriptors` - List the supported suppressions
//!
//! Logging goes to stderr and is controlled by `CTH_LOG` (default `warn`).

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use cth_analysis::{
    all_descriptors, classify, default_suppressors, render_suppression, report_suppressions,
    CancellationToken, DiagnosticSuppressor, SwitchExpressionSuppressor, SwitchStatementSuppressor,
};
use cth_common::{LineIndex, Suppression};
use cth_host::{AnalyzerConfig, MemoryHost, TypeQueries};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "cthc", version, about = "Closed type hierarchy switch suppressor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every diagnostic of a snapshot and print the suppressions
    Check {
        /// Path to the JSON compilation snapshot
        snapshot: PathBuf,

        /// TOML analyzer configuration consulted after per-file options
        #[arg(long)]
        config: Option<PathBuf>,

        /// Treat abstract records as hierarchy roots regardless of configuration
        #[arg(long = "allow-record-hierarchies")]
        allow_record_hierarchies: bool,

        /// Output suppressions as JSON (one object per line)
        #[arg(long)]
        json: bool,

        /// Disable colorized output
        #[arg(long = "no-color")]
        no_color: bool,
    },
    /// Print the leaf types of a closed hierarchy
    Classify {
        /// Path to the JSON compilation snapshot
        snapshot: PathBuf,

        /// Qualified name of the root type (e.g. `Shape` or `Outer.Shape`)
        root: String,

        /// Treat abstract records as hierarchy roots
        #[arg(long = "allow-record-hierarchies")]
        allow_record_hierarchies: bool,
    },
    /// List the diagnostics that can be suppressed
    Descriptors {
        /// Output descriptors as JSON (one object per line)
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let (result, json) = match cli.command {
        Commands::Check {
            snapshot,
            config,
            allow_record_hierarchies,
            json,
            no_color,
        } => {
            let opts = CheckOptions {
                config,
                allow_record_hierarchies,
                json,
                color: !no_color && !json,
            };
            (check(&snapshot, &opts), json)
        }
        Commands::Classify {
            snapshot,
            root,
            allow_record_hierarchies,
        } => (classify_root(&snapshot, &root, allow_record_hierarchies), false),
        Commands::Descriptors { json } => {
            descriptors(json);
            (Ok(()), json)
        }
    };

    if let Err(e) = result {
        if json {
            let msg = serde_json::json!({ "severity": "error", "message": e });
            eprintln!("{}", msg);
        } else {
            eprintln!("error: {}", e);
        }
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("CTH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

struct CheckOptions {
    config: Option<PathBuf>,
    allow_record_hierarchies: bool,
    json: bool,
    color: bool,
}

/// One suppression as printed by `check --json`.
#[derive(Serialize)]
struct SuppressionRecord<'a> {
    code: &'a str,
    suppressed: &'a str,
    file: &'a str,
    line: u32,
    column: u32,
    start: u32,
    end: u32,
    justification: &'a str,
}

fn load_snapshot(path: &Path) -> Result<MemoryHost, String> {
    MemoryHost::from_file(path).map_err(|e| e.to_string())
}

fn suppressors(allow_record_hierarchies: bool) -> Vec<Box<dyn DiagnosticSuppressor>> {
    if !allow_record_hierarchies {
        return default_suppressors();
    }
    vec![
        Box::new(SwitchExpressionSuppressor::new().with_record_hierarchies()),
        Box::new(SwitchStatementSuppressor::new().with_record_hierarchies()),
    ]
}

/// Load the snapshot, evaluate its diagnostics and print the suppressions.
fn check(snapshot: &Path, opts: &CheckOptions) -> Result<(), String> {
    let mut host = load_snapshot(snapshot)?;
    if let Some(config) = &opts.config {
        let config = AnalyzerConfig::from_file(config).map_err(|e| e.to_string())?;
        host = host.with_config(config);
    }

    debug!(
        snapshot = %snapshot.display(),
        diagnostics = host.diagnostics().len(),
        "loaded snapshot"
    );

    let token = CancellationToken::new();
    let suppressions = report_suppressions(
        &host,
        &suppressors(opts.allow_record_hierarchies),
        host.diagnostics(),
        &token,
    )
    .map_err(|e| e.to_string())?;

    for suppression in &suppressions {
        print_suppression(&host, suppression, opts)?;
    }
    if !opts.json {
        println!(
            "{} of {} diagnostic(s) suppressed",
            suppressions.len(),
            host.diagnostics().len()
        );
    }
    Ok(())
}

fn print_suppression(host: &MemoryHost, suppression: &Suppression, opts: &CheckOptions) -> Result<(), String> {
    let location = suppression.diagnostic.location;
    let file = host
        .file(location.file)
        .ok_or_else(|| format!("diagnostic refers to unknown file #{}", location.file.0))?;
    let text = file.text.as_deref().unwrap_or("");
    let (line, column) = LineIndex::new(text).line_col(location.span.start.min(text.len() as u32));

    if opts.json {
        let record = SuppressionRecord {
            code: suppression.descriptor.id,
            suppressed: &suppression.diagnostic.id,
            file: &file.path,
            line,
            column,
            start: location.span.start,
            end: location.span.end,
            justification: suppression.descriptor.justification,
        };
        let line = serde_json::to_string(&record).map_err(|e| e.to_string())?;
        println!("{}", line);
        return Ok(());
    }

    println!(
        "{}:{}:{}: {} suppressed {}",
        file.path, line, column, suppression.descriptor.id, suppression.diagnostic.id
    );
    if file.text.is_some() {
        let rendered = render_suppression(suppression, text, opts.color).map_err(|e| e.to_string())?;
        print!("{}", rendered);
    }
    Ok(())
}

fn classify_root(snapshot: &Path, root: &str, allow_record_hierarchies: bool) -> Result<(), String> {
    let host = load_snapshot(snapshot)?;
    let ty = host
        .type_by_name(root)
        .ok_or_else(|| format!("unknown type `{}`", root))?;
    match classify(&host, ty, allow_record_hierarchies) {
        Some(hierarchy) => {
            for leaf in hierarchy.leaves {
                println!("{}", host.type_name(leaf));
            }
        }
        None => println!("{} is not closed", root),
    }
    Ok(())
}

fn descriptors(json: bool) {
    for descriptor in all_descriptors() {
        if json {
            println!("{}", serde_json::json!(descriptor));
        } else {
            println!("{}", descriptor);
        }
    }
}
