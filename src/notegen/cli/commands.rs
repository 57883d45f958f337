use super::print::print_heading;
use super::progress::TermProgress;
use super::setup::Cli;
use clap::Parser;
use notegen::api::NotegenApi;
use notegen::error::Result;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.build_options();
    let mut api = NotegenApi::with_templates_from(cli.templates.as_deref())?;

    if options.mode.is_dry() {
        print_heading("Doing a dry run...");
    }

    // messages are printed by the progress reporter as each note is processed
    let mut progress = TermProgress::stderr();
    api.build(&options, &mut progress)?;
    Ok(())
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "notegen=debug" } else { "notegen=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
