use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use video2code_contracts::refine::RefineRequest;
use video2code_engine::{archive_file_name, EngineConfig, OrchestrationService, ProcessorClient};

const DEFAULT_LOG_FILTER: &str = "video2code=info,video2code_engine=info";

/// Exit code for a rejected upload, distinct from internal failures.
const PROCESSOR_FAILURE_EXIT: i32 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "video2code",
    version,
    about = "Generate UI code artifacts from video frames"
)]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ConfigOverrides {
    /// Directory holding extracted frame_*.jpg stills.
    #[arg(long, global = true)]
    frames_dir: Option<PathBuf>,
    /// Vision model used for frame analysis.
    #[arg(long, global = true)]
    model: Option<String>,
    #[arg(long, global = true)]
    max_frames: Option<usize>,
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,
}

impl ConfigOverrides {
    fn apply(self, mut config: EngineConfig) -> EngineConfig {
        if let Some(frames_dir) = self.frames_dir {
            config.frames_dir = frames_dir;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(max_frames) = self.max_frames {
            config.max_frames = max_frames;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        config
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the recovered analysis as JSON.
    Analyze,
    /// Print analysis and generated artifacts as JSON.
    Generate,
    /// Write all artifacts to a zip archive.
    Bundle(BundleArgs),
    /// Rewrite one artifact according to a prompt.
    Refine(RefineArgs),
    /// Upload a video to the frame-extraction service.
    Process(ProcessArgs),
}

#[derive(Debug, Parser)]
struct BundleArgs {
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct RefineArgs {
    #[arg(long)]
    artifact: String,
    #[arg(long)]
    prompt: String,
    /// File holding the code to refine.
    #[arg(long)]
    code: PathBuf,
}

#[derive(Debug, Parser)]
struct ProcessArgs {
    #[arg(long)]
    video: PathBuf,
}

fn main() {
    init_tracing();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("video2code error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = cli.overrides.apply(EngineConfig::from_env());
    match cli.command {
        Command::Analyze => {
            let service = OrchestrationService::new(&config);
            let analysis = service.analyze_frames().context("frame analysis failed")?;
            print_json(&serde_json::to_value(analysis)?)?;
            Ok(0)
        }
        Command::Generate => {
            let service = OrchestrationService::new(&config);
            let artifacts = service
                .generate_artifacts()
                .context("artifact generation failed")?;
            print_json(&serde_json::to_value(artifacts)?)?;
            Ok(0)
        }
        Command::Bundle(args) => run_bundle(&config, args),
        Command::Refine(args) => run_refine(&config, args),
        Command::Process(args) => Ok(run_process(&config, args)),
    }
}

fn run_bundle(config: &EngineConfig, args: BundleArgs) -> Result<i32> {
    let service = OrchestrationService::new(config);
    let bytes = service.build_archive().context("archive build failed")?;
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(archive_file_name(Utc::now())));
    if let Some(parent) = out.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&out, &bytes).with_context(|| format!("failed to write {}", out.display()))?;
    info!(path = %out.display(), bytes = bytes.len(), "archive written");
    println!("{}", out.display());
    Ok(0)
}

fn run_refine(config: &EngineConfig, args: RefineArgs) -> Result<i32> {
    let code = fs::read_to_string(&args.code)
        .with_context(|| format!("failed reading {}", args.code.display()))?;
    let request = RefineRequest {
        artifact: args.artifact,
        code,
        prompt: args.prompt,
    };
    let service = OrchestrationService::new(config);
    let response = service.refine(&request).context("refinement failed")?;
    println!("{}", response.updated_code);
    Ok(0)
}

fn run_process(config: &EngineConfig, args: ProcessArgs) -> i32 {
    let client = ProcessorClient::new(
        &config.processor_url,
        config.processor_timeout_ms,
        config.max_upload_mb,
    );
    match client.submit(&args.video) {
        Ok(reply) => {
            print_json_lossy(&reply.body);
            if (200..300).contains(&reply.status) {
                0
            } else {
                warn!(status = reply.status, "processor reported failure");
                PROCESSOR_FAILURE_EXIT
            }
        }
        Err(err) => {
            warn!(code = err.code(), status = err.http_status(), "upload rejected");
            print_json_lossy(&err.body());
            PROCESSOR_FAILURE_EXIT
        }
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_json_lossy(value: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    );
}
