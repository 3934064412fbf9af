//! pitch-path binary entry point.

use clap::Parser;
use pp_core::cli::Cli;
use pp_core::commands;
use pp_core::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose, cli.global.log_format);
    let code = commands::run(&cli);
    std::process::exit(code.as_i32());
}
