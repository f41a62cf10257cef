//! Entry point: parses CLI arguments, wires the engine and a renderer
//! together, and maps [`Report::is_clean`] to the process exit status.

use anyhow::Result;
use clap::Parser;
use godhunter::cli::{Cli, Commands, OutputFormat};
use godhunter::config::{load_thresholds, load_thresholds_from_path};
use godhunter::observability::init_tracing;
use godhunter::output::{JsonWriter, MarkdownWriter, OutputWriter, TerminalWriter};
use godhunter::parsing::ParserRegistry;
use godhunter::Engine;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

const RAYON_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Configure rayon's global thread pool once at startup. `jobs == 0` defers
/// to rayon's own default (the number of logical CPUs).
fn configure_thread_pool(jobs: usize) {
    let mut builder = rayon::ThreadPoolBuilder::new().stack_size(RAYON_STACK_SIZE);
    if jobs > 0 {
        builder = builder.num_threads(jobs);
    }
    if let Err(err) = builder.build_global() {
        eprintln!("note: thread pool already configured: {err}");
    }
}

fn get_worker_count(jobs: usize) -> usize {
    if jobs == 0 {
        num_cpus::get()
    } else {
        jobs
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Commands::Analyze {
        path,
        format,
        output,
        jobs,
        config,
        quiet,
        verbosity,
    } = cli.command;

    init_tracing(verbosity, quiet);
    configure_thread_pool(get_worker_count(jobs));

    let thresholds = match config {
        Some(ref path) => load_thresholds_from_path(path),
        None => load_thresholds(&path),
    };

    let registry = ParserRegistry::default_registry();
    let engine = Engine::new(&registry, thresholds);
    let (tree, report) = engine.analyze(&path)?;

    write_report(&tree, &report, format, output.as_ref())?;

    if report.is_clean() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

fn write_report(
    tree: &godhunter::TreeNode,
    report: &godhunter::Report,
    format: OutputFormat,
    output: Option<&PathBuf>,
) -> Result<()> {
    match output {
        Some(path) => {
            let file = BufWriter::new(File::create(path)?);
            dispatch_writer(file, tree, report, format)
        }
        None => dispatch_writer(io::stdout(), tree, report, format),
    }
}

fn dispatch_writer<W: io::Write>(
    writer: W,
    tree: &godhunter::TreeNode,
    report: &godhunter::Report,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => JsonWriter::new(writer).write_report(tree, report),
        OutputFormat::Markdown => MarkdownWriter::new(writer).write_report(tree, report),
        OutputFormat::Terminal => TerminalWriter::new(writer).write_report(tree, report),
    }
}
