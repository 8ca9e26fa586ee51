use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use paracom::{
    AnthropicClient, AnthropicConfig, ChunkConfig, DetectorConfig, InputSource,
    LlmBoundaryDetector, ModelBackend, OllamaClient, OllamaConfig, OutputTarget, PipelineConfig,
    derive_output_path, read_transcript, run_pipeline, write_output,
};

#[derive(Parser)]
#[command(name = "paracom")]
#[command(
    author,
    version,
    about = "Use an LLM to detect conversation turns in a transcript and insert blank lines as paragraph breaks",
    long_about = None
)]
struct Cli {
    /// Input text file (use '-' to read from standard input)
    input: PathBuf,

    /// Line prefix to exclude from detection (repeatable)
    #[arg(short = 'p', long = "skip-line-prefix", value_name = "PREFIX")]
    skip_line_prefixes: Vec<String>,

    /// Number of detection trials merged by majority vote
    #[arg(short, long, default_value = "1")]
    trials: usize,

    /// Output file name
    #[arg(short, long, conflicts_with = "auto_output")]
    output: Option<PathBuf>,

    /// Derive the output file name from the input (appends '-paracom')
    #[arg(short = 'O', long)]
    auto_output: bool,

    /// Model backend to query
    #[arg(long, value_enum, default_value_t = Backend::Ollama)]
    backend: Backend,

    /// Model name (defaults to the backend's default model)
    #[arg(long)]
    model: Option<String>,

    /// Candidate lines per model call
    #[arg(long, default_value = "30")]
    window_size: usize,

    /// Candidate lines shared by consecutive model calls
    #[arg(long, default_value = "10")]
    window_overlap: usize,

    /// Lines near a shared window edge left to the neighbouring window
    #[arg(long, default_value = "5")]
    boundary_margin: usize,

    /// Model calls per window before an unparseable reply counts as no boundaries
    #[arg(long, default_value = "5")]
    max_attempts: u32,

    /// Detection trials run concurrently
    #[arg(short, long, default_value = "1")]
    jobs: usize,

    /// Output verbose log messages to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Local Ollama server (OLLAMA_HOST)
    Ollama,
    /// Anthropic Messages API (ANTHROPIC_API_KEY)
    Anthropic,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    run(cli).await
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("paracom={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let source = InputSource::from_arg(&cli.input);
    let target = resolve_output(&cli, &source)?;

    let pipeline_config = PipelineConfig {
        skip_line_prefixes: cli.skip_line_prefixes.clone(),
        trials: cli.trials,
        max_concurrent_trials: cli.jobs,
        verbose: cli.verbose,
    };
    pipeline_config.validate()?;

    let detector_config = DetectorConfig {
        chunking: ChunkConfig {
            window_size: cli.window_size,
            overlap: cli.window_overlap,
            boundary_margin: cli.boundary_margin,
        },
        max_attempts: cli.max_attempts,
        ..Default::default()
    };
    let detector = LlmBoundaryDetector::new(build_backend(&cli)?, detector_config)?;

    info!("Loading transcript from {:?}", cli.input);
    let transcript = read_transcript(&source).context("Failed to read input transcript")?;
    info!("Loaded {} lines", transcript.len());

    let output = run_pipeline(&transcript, &detector, &pipeline_config).await?;

    info!(
        "Inserted {} paragraph breaks",
        output.lines.len() - transcript.len()
    );

    write_output(&target, &output.lines)?;
    if let OutputTarget::File(path) = &target {
        info!("Output written to {:?}", path);
    }

    Ok(())
}

/// Decide the output destination before any model call is made
fn resolve_output(cli: &Cli, source: &InputSource) -> Result<OutputTarget> {
    if cli.auto_output {
        let Some(input) = source.path() else {
            bail!("Cannot use -O/--auto-output when reading from standard input");
        };
        return Ok(OutputTarget::File(derive_output_path(input)));
    }
    Ok(match &cli.output {
        Some(path) => OutputTarget::File(path.clone()),
        None => OutputTarget::Stdout,
    })
}

fn build_backend(cli: &Cli) -> Result<Arc<dyn ModelBackend>> {
    let backend: Arc<dyn ModelBackend> = match cli.backend {
        Backend::Ollama => {
            let mut config = OllamaConfig::from_env();
            if let Some(model) = &cli.model {
                config.model = model.clone();
            }
            Arc::new(OllamaClient::new(config))
        }
        Backend::Anthropic => {
            let mut config = AnthropicConfig::from_env()?;
            if let Some(model) = &cli.model {
                config.model = model.clone();
            }
            Arc::new(AnthropicClient::new(config))
        }
    };
    info!("Using model {}", backend.model_name());
    Ok(backend)
}
