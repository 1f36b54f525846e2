use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use raadscribe::{
    AgendaFilter, AlignConfig, ArtifactKind, ArtifactStore, BoundaryPolicy, EngineKind,
    FsArtifactStore, HttpDownloader, HttpMeetingScraper, Pipeline, PipelineConfig,
    WhisperCliTranscriber, meeting_id,
};

#[derive(Parser)]
#[command(name = "raadscribe")]
#[command(author, version, about = "Council meeting transcription and agenda alignment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one meeting URL or a batch file of URLs through all stages
    Process {
        /// URL of the meeting page
        #[arg(long)]
        url: Option<String>,

        /// Path to a .txt file with one meeting URL per line
        #[arg(long)]
        file: Option<PathBuf>,

        /// Use the accelerated (mlx) whisper engine instead of the general one
        #[arg(long)]
        accelerated: bool,

        /// Keep only top-level numbered agenda items
        #[arg(long)]
        top_level_only: bool,

        /// Attribute boundary segments to a single window instead of both
        #[arg(long)]
        half_open: bool,

        /// Delete the downloaded media after transcription succeeds
        #[arg(long)]
        cleanup_media: bool,

        /// Discard existing artifacts and redo every stage
        #[arg(long)]
        force: bool,

        /// Directory for stage artifacts
        #[arg(long, default_value = ".")]
        work_dir: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show which stage artifacts exist for a meeting URL
    Status {
        /// URL of the meeting page
        #[arg(long)]
        url: String,

        /// Directory for stage artifacts
        #[arg(long, default_value = ".")]
        work_dir: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            url,
            file,
            accelerated,
            top_level_only,
            half_open,
            cleanup_media,
            force,
            work_dir,
            verbose,
        } => {
            setup_logging(verbose);
            run_process(
                url,
                file,
                accelerated,
                top_level_only,
                half_open,
                cleanup_media,
                force,
                work_dir,
            )
            .await
        }
        Commands::Status {
            url,
            work_dir,
            verbose,
        } => {
            setup_logging(verbose);
            run_status(&url, work_dir)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn run_process(
    url: Option<String>,
    file: Option<PathBuf>,
    accelerated: bool,
    top_level_only: bool,
    half_open: bool,
    cleanup_media: bool,
    force: bool,
    work_dir: PathBuf,
) -> Result<()> {
    if url.is_none() && file.is_none() {
        bail!("either --url or --file must be given");
    }
    if let Some(file) = &file {
        if file.extension().and_then(|e| e.to_str()) != Some("txt") {
            bail!("batch file must be a .txt file, got {:?}", file);
        }
    }

    let engine = if accelerated {
        EngineKind::Accelerated
    } else {
        EngineKind::General
    };
    let config = PipelineConfig {
        filter: if top_level_only {
            AgendaFilter::TopLevelOnly
        } else {
            AgendaFilter::All
        },
        align: AlignConfig {
            boundary: if half_open {
                BoundaryPolicy::HalfOpen
            } else {
                BoundaryPolicy::Inclusive
            },
        },
        cleanup_media,
        force,
    };

    let store = FsArtifactStore::new(&work_dir)
        .with_context(|| format!("Failed to open work dir {:?}", work_dir))?;
    let pipeline = Pipeline::new(
        Box::new(HttpMeetingScraper::new()),
        Box::new(HttpDownloader::new()),
        Box::new(WhisperCliTranscriber::new(engine)),
        Box::new(store),
        config,
    );

    if let Some(file) = file {
        info!("Processing batch file {:?}", file);
        let urls: Vec<String> = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read batch file {:?}", file))?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        // Per-URL failures are logged inside process_all; the batch never aborts.
        pipeline.process_all(&urls).await;
    }

    if let Some(url) = url {
        info!("Processing {}", url);
        pipeline
            .process(&url)
            .await
            .with_context(|| format!("Failed to process {}", url))?;
    }

    Ok(())
}

fn run_status(url: &str, work_dir: PathBuf) -> Result<()> {
    let id = meeting_id(url).context("Invalid meeting URL")?;
    let store = FsArtifactStore::new(&work_dir)
        .with_context(|| format!("Failed to open work dir {:?}", work_dir))?;

    println!("Meeting {}", id);
    for (stage, kind) in [
        ("download", ArtifactKind::Media),
        ("transcribe", ArtifactKind::Transcript),
        ("align", ArtifactKind::Alignment),
    ] {
        let name = kind.file_name(id);
        let state = if store.exists(&name) {
            "complete"
        } else {
            "pending"
        };
        println!("  {:<12} {:<10} {}", stage, state, name);
    }

    Ok(())
}
