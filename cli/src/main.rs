//! zkhuman: command-line driver for the human verification engine.

mod config;
mod replay;

use anyhow::Context;
use clap::Parser;
use config::{FileConfig, Overrides, Settings};
use std::path::PathBuf;
use std::process::ExitCode;
use zkhuman_crypto::{random_bytes, OsEntropy};
use zkhuman_types::{ChallengeKind, ChallengeOutcome, Timestamp};
use zkhuman_utils::LogFormat;
use zkhuman_verification::{pick_challenge, BehavioralWitness, ProofEngine, ProofView};

#[derive(Parser)]
#[command(name = "zkhuman", about = "zkHuman behavioral proof engine")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "ZKHUMAN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "ZKHUMAN_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Acceptance threshold for the human score.
    #[arg(long, global = true, env = "ZKHUMAN_THRESHOLD")]
    threshold: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Pick a pattern and cognitive challenge and print it as JSON.
    Challenge {
        /// Seed for the pick; random when omitted.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Build a proof from explicit telemetry and print its view as JSON.
    Prove {
        /// Whether the pattern challenge was solved.
        #[arg(long)]
        pattern: bool,
        /// Whether the cognitive challenge was solved.
        #[arg(long)]
        cognitive: bool,
        /// Interaction times in ms since session start (comma-separated).
        #[arg(long, value_delimiter = ',')]
        timings: Vec<u64>,
        /// Pointer path length.
        #[arg(long, default_value_t = 0.0)]
        entropy: f64,
        /// Challenge context; derived from the outcomes when omitted.
        #[arg(long)]
        context: Option<String>,
    },
    /// Check a proof view against its challenge context.
    Verify {
        /// Proof view JSON file.
        #[arg(long)]
        proof: PathBuf,
        #[arg(long)]
        context: String,
    },
    /// Run a scripted session and print the verdict.
    Replay {
        /// Session script (TOML).
        #[arg(long)]
        script: PathBuf,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let file_config = cli.config.as_deref().map(FileConfig::load);
    let (file, file_error) = match file_config {
        Some(Ok(cfg)) => (Some(cfg), None),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };

    let settings = Settings::resolve(
        file,
        Overrides {
            log_format: cli.log_format,
            log_level: cli.log_level,
            threshold: cli.threshold,
        },
    );
    zkhuman_utils::init_logging(settings.log_format, &settings.log_level);

    if let Some(e) = file_error {
        tracing::warn!("{e:#}, using defaults");
    } else if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }
    settings.params.validate()?;

    match cli.command {
        Command::Challenge { seed } => {
            let seed = match seed {
                Some(seed) => seed,
                None => u64::from_be_bytes(random_bytes::<8>(&OsEntropy)?),
            };
            let spec = pick_challenge(seed, &settings.params);
            println!("{}", serde_json::to_string_pretty(&spec)?);
        }
        Command::Prove {
            pattern,
            cognitive,
            timings,
            entropy,
            context,
        } => {
            let now = Timestamp::now();
            let outcomes = vec![
                ChallengeOutcome::new(ChallengeKind::Pattern, pattern, now),
                ChallengeOutcome::new(ChallengeKind::Cognitive, cognitive, now),
            ];
            let context = context.unwrap_or_else(|| {
                outcomes
                    .iter()
                    .map(ChallengeOutcome::context_fragment)
                    .collect::<Vec<_>>()
                    .join("|")
            });
            let witness = BehavioralWitness {
                outcomes,
                timings,
                mouse_entropy: entropy,
            };

            let engine = ProofEngine::new(settings.params);
            let proof = engine.prove_witness(&witness, &context, now)?;
            println!("{}", serde_json::to_string_pretty(&proof.view())?);
        }
        Command::Verify { proof, context } => {
            let contents = std::fs::read_to_string(&proof)
                .with_context(|| format!("failed to read proof {}", proof.display()))?;
            let view: ProofView = serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse proof {}", proof.display()))?;

            let engine = ProofEngine::new(settings.params);
            if engine.verify_view(&view, &context) {
                println!("verified {}", view.id);
            } else {
                println!("rejected {}", view.id);
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Replay { script } => {
            let script = replay::Script::load(&script)?;
            tracing::info!(
                steps = script.steps.len(),
                "replaying {} session",
                zkhuman_utils::format_duration(script.duration())
            );
            let verdict = replay::run(&script, Timestamp::now(), OsEntropy, settings.params)?;
            println!("{}", serde_json::to_string_pretty(&verdict.view())?);
            if !verdict.verified {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
