use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use rectboard::logging;
use rectboard::replay::{self, Script};
use rectboard::settings::{EngineSettings, default_settings_path};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "rectboard",
    version,
    about = "Replay a pointer script against the selection engine and print the result"
)]
struct Cli {
    /// Pointer script (JSON)
    script: PathBuf,

    /// Engine settings (JSON); defaults to <config dir>/rectboard/settings.json
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print the report without indentation
    #[arg(long)]
    compact: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::directive_for_verbosity(cli.verbose))
        .context("Failed to initialize logging")?;

    let settings = match &cli.settings {
        Some(path) => EngineSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => match default_settings_path() {
            Some(path) => EngineSettings::load_or_default(&path)?,
            None => EngineSettings::default(),
        },
    };

    let content = fs::read_to_string(&cli.script)
        .with_context(|| format!("Failed to read script {}", cli.script.display()))?;
    let script: Script = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse script {}", cli.script.display()))?;
    info!(steps = script.steps.len(), "replaying script");

    let report = replay::run(settings, script).context("Replay failed")?;

    let output = if cli.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{output}");
    Ok(())
}
