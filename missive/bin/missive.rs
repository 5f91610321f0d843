use std::{
    io::Write,
    path::{Path, PathBuf},
};

use clap::Parser;
use missive::Missive;
use missive_common::logging;

const CONFIG_ENV: &str = "MISSIVE_CONFIG";

#[derive(Debug, Parser)]
#[command(version, about = "Send a letter with attachments over SMTP")]
struct Args {
    /// Path to the RON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON letter source, overriding the configured one
    #[arg(short, long)]
    letter: Option<PathBuf>,

    /// Letter body, overriding the configured one
    #[arg(short, long)]
    body: Option<PathBuf>,

    /// Print the message instead of sending it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init();

    let config_path = find_config_file(args.config.as_deref())?;
    let mut missive = Missive::load(&config_path)?.with_env_password();

    if let Some(letter) = args.letter {
        missive = missive.with_letter(letter);
    }
    if let Some(body) = args.body {
        missive = missive.with_body(body);
    }

    if args.dry_run {
        let message = missive.build_message()?;
        std::io::stdout().lock().write_all(message.as_bytes())?;
        return Ok(());
    }

    missive.run().await?;
    Ok(())
}

/// Find the configuration file using the following precedence:
/// 1. `--config`
/// 2. `MISSIVE_CONFIG` environment variable
/// 3. ./missive.config.ron (current working directory)
/// 4. /etc/missive/missive.config.ron (system-wide config)
fn find_config_file(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        anyhow::bail!("--config points to non-existent file: {}", path.display());
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        anyhow::bail!("{CONFIG_ENV} points to non-existent file: {}", path.display());
    }

    let default_paths = [
        PathBuf::from("./missive.config.ron"),
        PathBuf::from("/etc/missive/missive.config.ron"),
    ];

    for path in &default_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let paths_tried = default_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    anyhow::bail!(
        "No configuration file found. Tried:\n  - --config\n  - {CONFIG_ENV} environment variable\n{paths_tried}"
    )
}
