mod cmd;

use anyhow::Result;
use argp::FromArgs;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

#[derive(FromArgs, PartialEq, Eq, Debug)]
/// Check pull requests for breaking API changes reported by CI.
struct TopLevel {
    #[argp(subcommand)]
    command: Command,
}

#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argp(subcommand)]
enum Command {
    Run(cmd::run::Args),
    Render(cmd::render::Args),
}

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::builder()
        // Default to info level
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: TopLevel = argp::parse_args_or_exit(argp::DEFAULT);
    let result: Result<()> = match args.command {
        Command::Run(args) => cmd::run::run(args).await,
        Command::Render(args) => cmd::render::run(args),
    };
    if let Err(e) = result {
        tracing::error!("{:?}", e);
        std::process::exit(1);
    }
}
