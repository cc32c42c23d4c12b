use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use crosstalk::{
    AppConfig, AttributionConfig, DocumentId, DocumentStore, JobId, JobRequest, Pipeline,
    QueueConfig, attribute_segments, group_turns, parse_asr_file, parse_diarization_file,
    render_document, summarize_speakers, validate_request,
};

#[derive(Parser)]
#[command(name = "crosstalk")]
#[command(author, version, about = "Speaker-attributed transcript assembly pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcribe, diarize and assemble one audio file end to end
    Process {
        /// Input audio file
        #[arg(short, long)]
        input: PathBuf,

        /// Email address that receives the completion link
        #[arg(short, long)]
        notify: String,

        /// Override the document store directory from TRANSCRIPTS_DIR
        #[arg(long)]
        transcripts_dir: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Assemble a transcript from saved ASR and diarization responses
    Combine {
        /// ASR response file (JSON array of segments)
        #[arg(short, long)]
        transcription: PathBuf,

        /// Diarization response file (Deepgram JSON)
        #[arg(short, long)]
        diarization: PathBuf,

        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print per-speaker summaries after the document
        #[arg(long)]
        summaries: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print a stored document by its identifier
    Show {
        /// Document identifier from a completed job
        #[arg(long)]
        id: String,

        /// Document store directory
        #[arg(long, default_value = "./transcripts")]
        transcripts_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            notify,
            transcripts_dir,
            verbose,
        } => {
            setup_logging(verbose);
            process_audio(input, notify, transcripts_dir).await
        }
        Commands::Combine {
            transcription,
            diarization,
            output,
            summaries,
            verbose,
        } => {
            setup_logging(verbose);
            combine_files(transcription, diarization, output, summaries)
        }
        Commands::Show {
            id,
            transcripts_dir,
        } => {
            setup_logging(false);
            show_document(&id, transcripts_dir)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn process_audio(
    input: PathBuf,
    notify: String,
    transcripts_dir: Option<PathBuf>,
) -> Result<()> {
    let request = JobRequest {
        audio_path: input,
        notify_address: notify,
    };
    validate_request(&request, &QueueConfig::default().allowed_extensions)?;

    let mut config = AppConfig::from_env()?;
    if let Some(dir) = transcripts_dir {
        config.transcripts_dir = dir;
    }
    let pipeline = Pipeline::from_config(&config)?;

    let outcome = pipeline.run(&JobId::new(), &request).await?;

    println!("Transcript Assembly");
    println!("===================");
    println!("Document id: {}", outcome.document_id);
    println!("Stored at: {:?}", outcome.document_path);
    println!("Turns: {}", outcome.turns);
    println!(
        "Segments attributed: {} of {} ({} dropped)",
        outcome.attributed,
        outcome.attributed + outcome.dropped,
        outcome.dropped
    );
    println!(
        "Notification sent: {}",
        if outcome.notified { "yes" } else { "no" }
    );
    println!("Uploaded: {}", if outcome.uploaded { "yes" } else { "no" });

    println!();
    println!("Speaker Summaries");
    println!("-----------------");
    for summary in &outcome.summaries {
        println!("{}: {}", summary.label(), summary.excerpt);
    }

    Ok(())
}

fn combine_files(
    transcription: PathBuf,
    diarization: PathBuf,
    output: Option<PathBuf>,
    summaries: bool,
) -> Result<()> {
    let segments =
        parse_asr_file(&transcription).context("Failed to parse transcription input")?;
    let utterances =
        parse_diarization_file(&diarization).context("Failed to parse diarization input")?;

    let attribution = attribute_segments(&segments, &utterances, &AttributionConfig::default());
    let turns = group_turns(&attribution.attributed);
    let document = render_document(&turns);

    match output {
        Some(path) => {
            std::fs::write(&path, &document)
                .with_context(|| format!("Failed to write document: {:?}", path))?;
            info!("Document written to {:?}", path);
        }
        None => print!("{}", document),
    }

    if summaries {
        println!();
        println!("Speaker Summaries");
        println!("-----------------");
        for summary in summarize_speakers(&attribution.attributed) {
            println!("{}: {}", summary.label(), summary.excerpt);
        }
    }

    Ok(())
}

fn show_document(id: &str, transcripts_dir: PathBuf) -> Result<()> {
    let id: DocumentId = id.parse().context("Invalid document id")?;
    let store = DocumentStore::open(&transcripts_dir)?;

    match store.load(&id)? {
        Some(document) => {
            print!("{}", document);
            Ok(())
        }
        None => anyhow::bail!("No document {} in {:?}", id, transcripts_dir),
    }
}
