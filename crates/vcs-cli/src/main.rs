mod format;

use std::process;

use anyhow::Result;
use clap::Parser;

use vcs_backend::Backend;
use vcs_git::GitBackend;
use vcs_svn::SvnBackend;

use format::{expand_format, options_from_format};

const DEFAULT_FORMAT: &str = "[%b%m%u] ";
const FORMAT_ENV_VAR: &str = "VCSTAT_FORMAT";

#[derive(Parser)]
#[command(
    name = "vcstat",
    about = "Version-control status for interactive shell prompts",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Format string; overrides $VCSTAT_FORMAT.
    /// %b branch, %r revision, %m modified, %u unknown files, %n VCS name, %% percent
    #[arg(short = 'f', long = "format")]
    format: Option<String>,

    /// Print diagnostic output on stderr
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Backends in probe order. The first applicable one wins.
fn backends() -> Vec<Box<dyn Backend>> {
    vec![Box::new(GitBackend), Box::new(SvnBackend)]
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Off
        })
        .parse_default_env()
        .init();

    // A prompt helper must never break the prompt: whatever happens, the
    // worst outcome is empty output.
    if let Err(e) = run(&cli) {
        log::debug!("{e}");
    }
    process::exit(0);
}

fn run(cli: &Cli) -> Result<()> {
    let format = match cli.format {
        Some(ref f) => f.clone(),
        None => std::env::var(FORMAT_ENV_VAR).unwrap_or_else(|_| DEFAULT_FORMAT.to_string()),
    };
    let opts = options_from_format(&format);
    let dir = std::env::current_dir()?;

    for backend in backends() {
        if !backend.probe(&dir) {
            continue;
        }
        log::debug!("backend '{}' is applicable here", backend.name());
        match backend.get_info(&dir, &opts) {
            Ok(info) => print!("{}", expand_format(&format, backend.name(), &info)),
            Err(e) => log::debug!("backend '{}' found no info: {e}", backend.name()),
        }
        break;
    }
    Ok(())
}
