//! Meta Query CLI
//!
//! Diagnostic viewer for fact-row metadata files:
//! - default: pretty-print every element with its attributes
//! - `--annotate`: echo input lines, decorating each fact row with its
//!   resolved names and typed value

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use metaquery_ingest::{load_all, Source};
use metaquery_render::{AnnotateOptions, Renderer};
use metaquery_store::{Conventions, FactStore, RowShape, Term};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (falls back to `RUST_LOG`).
const LOG_ENV: &str = "META_QUERY_LOG";

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeArg {
    /// `[element, attribute, value]`
    Triple,
    /// `[element, attribute, value, row id]`
    Quad,
}

impl From<ShapeArg> for RowShape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Triple => RowShape::Triple,
            ShapeArg::Quad => RowShape::Quad,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "meta-query")]
#[command(author, version, about = "Query and pretty-print fact-row metadata")]
struct Cli {
    /// Metadata files (newline-delimited JSON rows). `-` reads stdin.
    files: Vec<PathBuf>,

    /// Row shape of every metadata file.
    #[arg(long, value_enum, default_value_t = ShapeArg::Triple)]
    shape: ShapeArg,

    /// Annotate these files instead of dumping: `--annotate=a.log,b.log`.
    /// A bare `--annotate` annotates the metadata files themselves.
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        require_equals = true,
        value_delimiter = ','
    )]
    annotate: Option<Vec<PathBuf>>,

    /// With `--annotate`, drop lines that are not fact rows.
    #[arg(long, requires = "annotate")]
    only_meta: bool,

    /// Dump only these elements (repeatable). Matches a bare string id or a JSON literal.
    #[arg(long = "element", value_name = "ID", conflicts_with = "annotate")]
    elements: Vec<String>,

    /// Identifier attribute id (quad stores: the bootstrap attribute).
    #[arg(long, value_name = "ID")]
    identifier_id: Option<String>,

    /// Debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let shape = RowShape::from(cli.shape);
    let sources: Vec<Source> = cli.files.iter().map(|p| Source::from_arg(p)).collect();
    let store = load_store(&sources, shape, cli.identifier_id.as_deref())?;
    let renderer = Renderer::new(&store);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match &cli.annotate {
        Some(targets) => {
            let targets: Vec<Source> = if targets.is_empty() {
                sources.clone()
            } else {
                targets.iter().map(|p| Source::from_arg(p)).collect()
            };
            let options = AnnotateOptions {
                only_meta: cli.only_meta,
            };
            cmd_annotate(&renderer, &targets, &options, &mut out)?;
        }
        None => cmd_dump(&renderer, &cli.elements, &mut out)?,
    }

    out.flush().context("flushing output")?;
    Ok(())
}

fn load_store(
    sources: &[Source],
    shape: RowShape,
    identifier_id: Option<&str>,
) -> Result<FactStore> {
    let rows = load_all(sources, shape)?;

    let mut conventions = Conventions::for_shape(shape);
    if let Some(id) = identifier_id {
        conventions = conventions.with_identifier_attribute(id);
    }
    let store = FactStore::with_conventions(shape, rows, &conventions);

    info!(sources = sources.len(), rows = store.len(), %shape, "metadata loaded");
    if !store.is_empty() && !store.well_known().is_complete() {
        warn!(
            well_known = ?store.well_known(),
            "some well-known elements are missing; affected values render as blobs"
        );
    }
    Ok(store)
}

fn cmd_dump<W: Write>(renderer: &Renderer<'_>, elements: &[String], out: &mut W) -> Result<()> {
    if elements.is_empty() {
        renderer.write_dump_all(out).context("writing dump")?;
        return Ok(());
    }

    let all = renderer.store().all_elements();
    let selected: Vec<&Term> = all
        .into_iter()
        .filter(|term| elements.iter().any(|arg| element_matches(term, arg)))
        .collect();
    if selected.is_empty() {
        warn!(requested = ?elements, "no matching elements");
    }
    renderer.write_dump(out, selected).context("writing dump")?;
    Ok(())
}

fn cmd_annotate<W: Write>(
    renderer: &Renderer<'_>,
    targets: &[Source],
    options: &AnnotateOptions,
    out: &mut W,
) -> Result<()> {
    for source in targets {
        let reader = source.open()?;
        renderer
            .annotate_reader(reader, out, options)
            .with_context(|| format!("annotating {source}"))?;
    }
    Ok(())
}

/// `42` selects both `"42"` and `42`; `"42"` (quoted) selects only the string.
fn element_matches(term: &Term, arg: &str) -> bool {
    term.as_str() == Some(arg) || term.to_json() == arg
}
