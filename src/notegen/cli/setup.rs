use clap::Parser;
use notegen::api::{BuildOptions, RunMode};
use notegen::commands::build::{DEFAULT_CONFIG_PATH, DEFAULT_LANGUAGE};
use std::path::PathBuf;

/// Returns the version string, with the git hash appended for non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "notegen", bin_name = "notegen", version = get_version())]
#[command(about = "Build Unturned note folders from a note map", long_about = None)]
pub struct Cli {
    /// Notes config file to use. Must be yml, yaml or json
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Languages to build notes for
    #[arg(
        short,
        long = "language",
        visible_alias = "lang",
        default_value = DEFAULT_LANGUAGE
    )]
    pub language: Vec<String>,

    /// Don't create notes files. Useful to check what will be created and where
    #[arg(short, long)]
    pub dry_run: bool,

    /// Folder holding note.dat and language.dat (built-in templates if omitted)
    #[arg(short, long)]
    pub templates: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Folder to build the notes in
    pub folderpath: PathBuf,
}

impl Cli {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::new(&self.folderpath)
            .with_config(&self.config)
            .with_languages(self.language.iter().cloned())
            .with_mode(RunMode::from_dry_run(self.dry_run))
    }
}
