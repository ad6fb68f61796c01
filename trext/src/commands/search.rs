//! `trext search` — find matching substrings.

use clap::Args;
use tracing::debug;

use crate::commands::common::{build_options, render_search, RunFlags};
use crate::config::Config;
use crate::error::Result;

/// Arguments for the search subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// The pattern to compile
    pub pattern: String,

    /// The input string
    pub input: String,

    #[command(flatten)]
    pub flags: RunFlags,
}

/// Run the search and print the result. Exit code 0 on a hit, 1 on a
/// clean no-match.
pub fn run(args: &SearchArgs, config: &Config, as_json: bool) -> Result<u8> {
    let opts = build_options(&args.flags, config)?;
    debug!(pattern = %args.pattern, "running search");
    let result = trex::search_once(&args.pattern, &args.input, &opts)?;
    println!("{}", render_search(&result, as_json)?);
    Ok(if result.is_match() { 0 } else { 1 })
}
