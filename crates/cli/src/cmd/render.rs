use anyhow::{Context, Result};
use argp::FromArgs;
use compat_check_core::models::CompatReport;
use compat_check_github::render::render_report;
use typed_path::Utf8NativePathBuf;

use crate::cmd::native_path;

#[derive(FromArgs, PartialEq, Eq, Debug)]
/// Render a compatibility report file and print a markdown summary.
#[argp(subcommand, name = "render")]
pub struct Args {
    #[argp(option, short = 'i', from_str_fn(native_path))]
    /// report JSON file
    input: Utf8NativePathBuf,
    #[argp(option, short = 'o', from_str_fn(native_path))]
    /// write markdown to output file
    output: Option<Utf8NativePathBuf>,
}

pub fn run(args: Args) -> Result<()> {
    let report_data = std::fs::read(args.input.with_platform_encoding())
        .with_context(|| format!("Failed to read {}", args.input))?;
    let report: CompatReport = serde_json::from_slice(&report_data)
        .with_context(|| format!("Failed to parse {}", args.input))?;
    let verdict = render_report(&report);
    if let Some(out_path) = &args.output {
        std::fs::write(out_path.with_platform_encoding(), &verdict.message)
            .with_context(|| format!("Failed to write output file '{}'", out_path))?;
    } else {
        println!("{}", verdict.message);
    }
    if verdict.breaking {
        tracing::warn!("Report contains breaking changes");
    }
    Ok(())
}
