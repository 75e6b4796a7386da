use anyhow::{ensure, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use docqa_retrieval::{
    BuildOutcome, DirectorySource, ExtractiveExplainer, RetrievalConfig, RetrievalOrchestrator,
};
use docqa_vector_store::Embedder;
use std::io;
use std::path::{Path, PathBuf};

mod flags;
mod report;

use flags::EmbedMode;
use report::{AskReport, IndexReport};

const DEFAULT_DIMENSION: usize = 384;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "docqa")]
#[command(about = "Question answering over a folder of documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Retrieval config file (TOML); flags override its values
    #[arg(long, global = true, env = "DOCQA_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index over a document folder and report what went in
    Index(IndexArgs),

    /// Answer a question from the documents in a folder
    Ask(AskArgs),
}

/// Flags shared by every command that builds an index
#[derive(Args)]
struct BuildArgs {
    /// Folder containing the documents
    dir: PathBuf,

    /// Words per chunk
    #[arg(long, env = "DOCQA_WINDOW_SIZE")]
    window_size: Option<usize>,

    /// Words shared by consecutive chunks
    #[arg(long, env = "DOCQA_OVERLAP")]
    overlap: Option<usize>,

    /// Embedding backend
    #[arg(long, value_enum, env = "DOCQA_EMBED_MODE", default_value_t = EmbedMode::Lexical)]
    embed_mode: EmbedMode,

    /// Embedding dimension
    #[arg(long, env = "DOCQA_DIMENSION", default_value_t = DEFAULT_DIMENSION)]
    dimension: usize,

    /// Threads used to embed chunks
    #[arg(long, env = "DOCQA_EMBED_WORKERS")]
    embed_workers: Option<usize>,

    /// File extensions to read (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "txt,md")]
    extensions: Vec<String>,
}

impl BuildArgs {
    fn apply(&self, config: &mut RetrievalConfig) {
        if let Some(window_size) = self.window_size {
            config.chunker.window_size = window_size;
        }
        if let Some(overlap) = self.overlap {
            config.chunker.overlap = overlap;
        }
        if let Some(workers) = self.embed_workers {
            config.embed_workers = workers;
        }
    }

    fn embedder(&self) -> Result<Box<dyn Embedder>> {
        ensure!(self.dimension > 0, "--dimension must be > 0");
        log::debug!(
            "Embedding with {} backend (dimension {})",
            self.embed_mode.as_str(),
            self.dimension
        );
        Ok(self.embed_mode.embedder(self.dimension))
    }

    fn source(&self) -> DirectorySource {
        DirectorySource::new(&self.dir).with_extensions(self.extensions.iter().cloned())
    }
}

#[derive(Args)]
struct IndexArgs {
    #[command(flatten)]
    build: BuildArgs,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct AskArgs {
    #[command(flatten)]
    build: BuildArgs,

    /// Question to answer
    question: String,

    /// Chunks to retrieve (defaults to the configured top_k)
    #[arg(short = 'k', long = "top-k", env = "DOCQA_TOP_K")]
    top_k: Option<usize>,

    /// Print the cleaned context the answer was drawn from
    #[arg(long)]
    show_context: bool,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    let json_output = match &cli.command {
        Commands::Index(args) => args.json,
        Commands::Ask(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Index(args) => run_index(args, config_path)?,
        Commands::Ask(args) => run_ask(args, config_path)?,
    }

    Ok(())
}

fn load_config(path: Option<&Path>, build: &BuildArgs) -> Result<RetrievalConfig> {
    let mut config = match path {
        Some(path) => RetrievalConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RetrievalConfig::default(),
    };
    build.apply(&mut config);
    config
        .validate()
        .context("Invalid retrieval configuration")?;
    Ok(config)
}

fn build_index(orchestrator: &RetrievalOrchestrator<'_>, build: &BuildArgs) -> Result<BuildOutcome> {
    orchestrator
        .build_from_source(&build.source())
        .with_context(|| format!("Failed to index {}", build.dir.display()))
}

/// Index a document folder
fn run_index(args: IndexArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path, &args.build)?;
    let embedder = args.build.embedder()?;
    let orchestrator = RetrievalOrchestrator::new(embedder.as_ref(), &config)?;

    let outcome = build_index(&orchestrator, &args.build)?;
    let report = IndexReport::new(&args.build.dir, &outcome);

    if args.json {
        print_stdout(&serde_json::to_string_pretty(&report)?)?;
    } else {
        print_stdout(&report.render())?;
    }
    Ok(())
}

/// Build an index, then answer one question from it
fn run_ask(args: AskArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = load_config(config_path, &args.build)?;
    if let Some(top_k) = args.top_k {
        config.top_k = top_k;
    }
    let embedder = args.build.embedder()?;
    let orchestrator = RetrievalOrchestrator::new(embedder.as_ref(), &config)?;

    let outcome = build_index(&orchestrator, &args.build)?;
    let explanation = orchestrator
        .explain(
            &outcome.index,
            &args.question,
            orchestrator.top_k(),
            &ExtractiveExplainer::default(),
        )
        .context("Failed to answer question")?;

    let report = AskReport::new(
        &args.question,
        explanation,
        outcome.failed,
        args.show_context,
    );

    if args.json {
        print_stdout(&serde_json::to_string_pretty(&report)?)?;
    } else {
        print_stdout(&report.render())?;
    }
    Ok(())
}
