// vidprobe-cli/src/main.rs
//
// Entry point for the `vidprobe` binary.
//
// Responsibilities include:
// - Parsing command-line arguments.
// - Setting up logging and terminal color.
// - Dispatching to the `run` or `check` command.
// - Exiting with the status the command chose, or 2 for configuration errors.

use clap::Parser;
use std::process;

use vidprobe_cli::{Cli, Commands, EXIT_CONFIG_ERROR, logging, run_check, run_probe_command, terminal};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Error: {e}");
        process::exit(EXIT_CONFIG_ERROR);
    }

    terminal::set_color(!cli.no_color && terminal::stdout_supports_color());

    let result = match cli.command {
        Commands::Run(args) => run_probe_command(args),
        Commands::Check(args) => run_check(args),
    };

    match result {
        Ok(status) => process::exit(status),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(EXIT_CONFIG_ERROR);
        }
    }
}
