//! `trext generate` — sample random strings from a pattern.

use clap::Args;
use tracing::debug;

use crate::commands::common::{build_options, RunFlags};
use crate::config::Config;
use crate::error::Result;

/// Arguments for the generate subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// The pattern to sample from
    pub pattern: String,

    /// How many strings to produce
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: u32,

    #[command(flatten)]
    pub flags: RunFlags,
}

/// Generate `count` strings, one per line.
pub fn run(args: &GenerateArgs, config: &Config, as_json: bool) -> Result<u8> {
    let opts = build_options(&args.flags, config)?;
    debug!(pattern = %args.pattern, count = args.count, "generating");
    let regex = trex::Regex::compile(&args.pattern, &opts)?;
    let mut produced = Vec::with_capacity(args.count as usize);
    for _ in 0..args.count {
        produced.push(regex.generate(&opts)?);
    }
    if as_json {
        println!("{}", serde_json::to_string_pretty(&produced)?);
    } else {
        for line in &produced {
            println!("{line}");
        }
    }
    Ok(0)
}
