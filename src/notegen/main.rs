//! The `notegen` binary only invokes [`cli::run`] and turns its error into an
//! exit code. Everything that touches the terminal lives in `cli/`.

use colored::Colorize;

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}
