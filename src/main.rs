//! Command line front end for checking and inspecting translation resources.

use std::io::{
    self,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use anyhow::{
    Context,
    Result,
};
use clap::{
    Parser,
    Subcommand,
};
use i18nco::{
    Internationalization,
    LocaleId,
};
use tracing_subscriber::EnvFilter;

/// Parsed command line.
#[derive(Parser, Debug)]
#[command(name = "i18nco")]
#[command(version)]
#[command(about = "Check and inspect .lang, JSON and CSV translation resources")]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// What to do with the resources.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile `.lang` files and report the first error of each
    Check {
        /// `.lang` files to compile
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Load a resource directory and print every translation as JSON
    Dump {
        /// Resource directory
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        /// Only print this locale
        #[arg(short, long)]
        locale: Option<LocaleId>,
    },

    /// Load a resource directory and print one translation
    Get {
        /// Resource directory
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        /// Dotted translation key
        #[arg(value_name = "KEY")]
        key: String,

        /// Locale tried before the configured ones
        #[arg(short, long)]
        locale: Option<LocaleId>,
    },
}

/// Installs stderr logging and runs the chosen subcommand.
fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "Parsed arguments");

    match cli.command {
        Commands::Check { files } => check(&files),
        Commands::Dump { directory, locale } => dump(&directory, locale.as_ref()),
        Commands::Get { directory, key, locale } => get(&directory, &key, locale.as_ref()),
    }
}

/// Compiles each file on its own and counts failures.
fn check(files: &[PathBuf]) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let mut failed = 0_usize;

    for path in files {
        let mut i18n = Internationalization::new();
        match i18n.load_lang(path, None, None) {
            Ok(count) => writeln!(stdout, "{}: OK ({count} entries)", path.display())?,
            Err(err) => {
                failed += 1;
                writeln!(stderr, "{err}")?;
            }
        }
    }

    if failed == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        writeln!(stderr, "{failed} of {} files failed", files.len())?;
        Ok(ExitCode::FAILURE)
    }
}

/// Prints the sorted table as pretty JSON.
fn dump(directory: &Path, locale: Option<&LocaleId>) -> Result<ExitCode> {
    let i18n = open(directory)?;
    let mut sorted = i18n.table().to_sorted();
    if let Some(locale) = locale {
        sorted.retain(|name, _| name == locale.as_str());
    }

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &sorted)?;
    writeln!(stdout)?;
    Ok(ExitCode::SUCCESS)
}

/// Prints one translation, failing when only the key came back.
fn get(directory: &Path, key: &str, locale: Option<&LocaleId>) -> Result<ExitCode> {
    let i18n = open(directory)?;
    let text = i18n.translation(key, locale);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    if text.is_fallback() {
        tracing::warn!(%key, "No translation found");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Opens `directory` with its settings.
fn open(directory: &Path) -> Result<Internationalization> {
    Internationalization::open(directory)
        .with_context(|| format!("failed to load resources from {}", directory.display()))
}
