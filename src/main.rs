use anyhow::Context;
use clap::{Parser, Subcommand};
use portfolio_motion::commands::{processing, transitions};
use portfolio_motion::config::CONFIG_ENV_VAR;
use portfolio_motion::transitions::TransitionType;
use portfolio_motion::MotionConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "motion-replay")]
#[command(about = "Replay pointer logs and preview page transitions")]
struct Cli {
    /// Motion config file (JSON)
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a pointer log through the cursor tracker
    Replay {
        /// Pointer log (JSON array of timed pointer events)
        input: PathBuf,

        /// Write frames here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, default_value_t = processing::DEFAULT_OUTPUT_FPS)]
        fps: f64,
    },

    /// Print the descriptor for a transition type
    Variant {
        /// Transition identifier, e.g. glitch or hudPanel
        name: String,

        #[arg(long)]
        reduced_motion: bool,

        #[arg(long)]
        no_overlay: bool,
    },

    /// Preview a navigation sequence as presence frames
    Navigate {
        /// Navigation keys, the first one is mounted
        #[arg(required = true)]
        routes: Vec<String>,

        #[arg(long)]
        reduced_motion: bool,

        #[arg(long, default_value_t = 60.0)]
        fps: f64,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    portfolio_motion::init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => MotionConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MotionConfig::default(),
    };

    tracing::debug!("Starting motion-replay v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Replay { input, output, fps } => match output {
            Some(output) => {
                processing::process_pointer_log(&input, &output, &config.tracker, fps)?;
            }
            None => {
                let frames = processing::replay_pointer_log(&input, &config.tracker, fps)?;
                print_json(&frames)?;
            }
        },
        Command::Variant {
            name,
            reduced_motion,
            no_overlay,
        } => {
            let kind: TransitionType = name.parse()?;
            let show_overlay = config.presence.show_overlay && !no_overlay;
            print_json(&transitions::describe_transition(kind, show_overlay, reduced_motion))?;
        }
        Command::Navigate {
            routes,
            reduced_motion,
            fps,
        } => {
            let frames = transitions::preview_navigation(config.presence, &routes, reduced_motion, fps)?;
            print_json(&frames)?;
        }
    }

    Ok(())
}
