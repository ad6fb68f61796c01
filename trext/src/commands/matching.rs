//! `trext match` — match a pattern against the whole input.

use clap::Args;
use tracing::debug;

use crate::commands::common::{build_options, render_match, RunFlags};
use crate::config::Config;
use crate::error::Result;

/// Arguments for the match subcommand.
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// The pattern to compile
    pub pattern: String,

    /// The input string
    pub input: String,

    #[command(flatten)]
    pub flags: RunFlags,
}

/// Run the match and print the result. Exit code 0 on a match, 1 on a
/// clean no-match.
pub fn run(args: &MatchArgs, config: &Config, as_json: bool) -> Result<u8> {
    let opts = build_options(&args.flags, config)?;
    debug!(pattern = %args.pattern, "running match");
    let result = trex::match_once(&args.pattern, &args.input, &opts)?;
    println!("{}", render_match(&result, as_json)?);
    Ok(if result.is_match() { 0 } else { 1 })
}
