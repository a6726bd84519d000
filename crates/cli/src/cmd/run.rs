use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::{Context, Result};
use argp::FromArgs;
use compat_check_core::{config::Config, models::WorkflowRunEvent};
use compat_check_github::GitHub;
use typed_path::Utf8NativePathBuf;

use crate::cmd::native_path;

#[derive(FromArgs, PartialEq, Eq, Debug)]
/// Process a completed workflow run event and report on its pull request.
#[argp(subcommand, name = "run")]
pub struct Args {
    #[argp(option, short = 'e', from_str_fn(native_path))]
    /// event payload JSON (defaults to GITHUB_EVENT_PATH)
    event: Option<Utf8NativePathBuf>,
}

pub async fn run(args: Args) -> Result<()> {
    let config = Config::from_env()?;
    let event_path = args
        .event
        .map(|path| PathBuf::from(path.as_str()))
        .unwrap_or_else(|| config.action.event_path.clone());
    let file = File::open(&event_path)
        .with_context(|| format!("Failed to open event payload {}", event_path.display()))?;
    let event: WorkflowRunEvent =
        serde_json::from_reader(BufReader::new(file)).context("Failed to parse event payload")?;
    let github = GitHub::new(&config.github).await?;
    compat_check_runner::process_event(&github, &config, &event).await
}
