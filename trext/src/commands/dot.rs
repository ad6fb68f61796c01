//! `trext dot` — export a compiled graph as DOT text.

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::commands::common::{build_options, RunFlags};
use crate::config::Config;
use crate::error::Result;

/// Arguments for the dot subcommand.
#[derive(Args, Debug)]
pub struct DotArgs {
    /// The pattern to compile
    pub pattern: String,

    /// Graph name inside the DOT output
    #[arg(long, default_value = "re")]
    pub name: String,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub flags: RunFlags,
}

/// Render the graph. Exit code 0 unless compilation fails.
pub fn run(args: &DotArgs, config: &Config) -> Result<u8> {
    let mut opts = build_options(&args.flags, config)?;
    opts.graph_name = Some(args.name.clone());
    let regex = trex::Regex::compile(&args.pattern, &opts)?;
    let rendered = regex.to_dot(opts.graph_name.as_deref().unwrap_or("re"));
    match &args.output {
        Some(path) => {
            debug!(path = %path.display(), "writing dot file");
            std::fs::write(path, rendered)?;
        }
        None => print!("{rendered}"),
    }
    Ok(0)
}
