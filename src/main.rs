use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use codemap::core::GraphStats;
use codemap::formatters::{DependenciesFormatter, DotFormatter, GraphJsonFormatter};
use codemap::{AnalyzerConfig, ProjectAnalyzer};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "codemap",
    version,
    about = "Map imports and declarations across a Python project"
)]
struct Cli {
    /// Project directory to analyze (defaults to the current directory)
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, value_name = "FILE", default_value = "code_graph.json")]
    output: PathBuf,

    /// Comma-separated file extensions to scan
    #[arg(
        short,
        long,
        value_name = "EXTS",
        value_delimiter = ',',
        default_value = ".py,.js,.html,.css"
    )]
    extensions: Vec<String>,

    /// Keep imports that do not resolve to a project file
    #[arg(long)]
    include_external: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Dependencies)]
    format: OutputFormat,

    /// Write to stdout instead of the output file
    #[arg(long)]
    stdout: bool,

    /// Log per-file progress
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Dependencies,
    Graph,
    Dot,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        input,
        output,
        extensions,
        include_external,
        format,
        stdout,
        verbose: _,
    } = cli;

    let start_time = Instant::now();

    let project_path = match input {
        Some(path) => path,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let config = AnalyzerConfig::new(&project_path)
        .with_extensions(extensions)
        .with_include_external(include_external);
    info!(
        extensions = ?config.file_extensions,
        include_external = config.include_external,
        "analyzing {}",
        project_path.display()
    );

    let analyzer = ProjectAnalyzer::new(config);
    let (dependencies, graph) = analyzer
        .analyze_graph()
        .with_context(|| format!("analysis of {} failed", project_path.display()))?;

    let stats = GraphStats::from_graph(&graph);
    info!(
        files = stats.files,
        classes = stats.classes,
        methods = stats.methods,
        functions = stats.functions,
        import_edges = stats.import_edges,
        contains_edges = stats.contains_edges,
        "graph ready"
    );

    let rendered = match format {
        OutputFormat::Dependencies => DependenciesFormatter::new().format(&dependencies)?,
        OutputFormat::Graph => GraphJsonFormatter::new().format_graph(&graph)?,
        OutputFormat::Dot => DotFormatter::new().format(&graph),
    };

    if stdout {
        let mut handle = std::io::stdout().lock();
        handle.write_all(rendered.as_bytes())?;
        handle.write_all(b"\n")?;
    } else {
        std::fs::write(&output, rendered)
            .with_context(|| format!("writing {}", output.display()))?;
        info!("wrote {}", output.display());
    }

    info!(
        "total execution time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
