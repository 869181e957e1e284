use clap::Parser;
use muhurta::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
