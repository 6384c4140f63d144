//! mediasort - Sort photos and videos into per-format folders.
//!
//! Usage:
//!   mediasort --src <PATH> --dst <PATH> [--wipe]   Migrate once and exit
//!   mediasort --tui [--wipe] [--presets <PATH>]    Launch interactive TUI
//!   mediasort --help                               Show help
//!
//! Set `MEDIASORT_LOG=<file>` to write logs to a file.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use mediasort_ops::{MigrationRequest, Migrator};
use mediasort_store::PresetStore;
use mediasort_tui::TuiConfig;

/// Environment variable naming the log file.
const LOG_ENV: &str = "MEDIASORT_LOG";

#[derive(Parser)]
#[command(
    name = "mediasort",
    version,
    about = "Sort photos and videos from a card or folder into per-format folders",
    long_about = "mediasort copies every JPEG, HEIF, RAW, MOV, BRAW and MP4 file under the \
                  source into <dst>/<FORMAT>/, keeping modification times.\n\n\
                  Run once with --src and --dst, or launch the interactive TUI with --tui \
                  to pick from saved presets."
)]
struct Cli {
    /// Directory to import from
    #[arg(long, value_name = "PATH")]
    src: Option<PathBuf>,

    /// Directory to sort into
    #[arg(long, value_name = "PATH")]
    dst: Option<PathBuf>,

    /// Delete each original once its copy is on disk
    #[arg(long)]
    wipe: bool,

    /// Launch the interactive TUI
    #[arg(long)]
    tui: bool,

    /// Preset file to use instead of ~/.mediasort
    #[arg(long, value_name = "PATH")]
    presets: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.tui)?;

    if cli.tui {
        let store = match cli.presets {
            Some(path) => PresetStore::new(path),
            None => PresetStore::open_default().context("Cannot locate preset file")?,
        };
        let config = TuiConfig {
            store,
            wipe_after_copy: cli.wipe,
        };
        return mediasort_tui::run(config);
    }

    let (Some(src), Some(dst)) = (cli.src, cli.dst) else {
        let mut command = Cli::command();
        eprintln!("error: --src and --dst are required unless --tui is given\n");
        eprintln!("{}", command.render_usage());
        std::process::exit(1);
    };

    run_once(&src, &dst, cli.wipe)
}

/// Install the log subscriber.
///
/// The TUI owns the terminal, so without a log file it gets no writer.
fn init_logging(tui: bool) -> Result<()> {
    if let Some(path) = std::env::var_os(LOG_ENV) {
        let file = File::create(&path).with_context(|| {
            format!("Cannot create log file {}", Path::new(&path).display())
        })?;
        tracing_subscriber::registry()
            .with(env_filter("info"))
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .init();
    } else if !tui {
        tracing_subscriber::registry()
            .with(env_filter("warn"))
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Migrate once, printing each file as it lands.
fn run_once(src: &Path, dst: &Path, wipe: bool) -> Result<()> {
    let request = MigrationRequest::builder()
        .source(src)
        .destination(dst)
        .wipe_after_copy(wipe)
        .build()
        .context("Invalid paths")?;

    let (verb, past) = if wipe {
        ("Moved", "moved")
    } else {
        ("Copied", "copied")
    };

    Migrator::new(request)
        .run(|file| {
            println!(
                "{verb}: {} -> {}",
                file.source.display(),
                file.destination.display()
            );
        })
        .context("Migration failed")?;

    println!(
        "All done! Your photos from {} have been {past} to {}",
        src.display(),
        dst.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_one_shot_flags() {
        let cli = Cli::try_parse_from(["mediasort", "--src", "/card", "--dst", "/import", "--wipe"])
            .unwrap();

        assert_eq!(cli.src.as_deref(), Some(Path::new("/card")));
        assert_eq!(cli.dst.as_deref(), Some(Path::new("/import")));
        assert!(cli.wipe);
        assert!(!cli.tui);
    }

    #[test]
    fn test_cli_paths_are_optional() {
        let cli = Cli::try_parse_from(["mediasort", "--tui"]).unwrap();
        assert!(cli.tui);
        assert!(cli.src.is_none());
        assert!(cli.presets.is_none());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
