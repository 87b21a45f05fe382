use clap::Parser;
use teamstock::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
