//! txtedit - A minimal terminal text editor.
//!
//! # Usage
//!
//! ```bash
//! txtedit
//! txtedit --dir ~/notes
//! txtedit --dir ~/notes --log-file /tmp/txtedit.log --save
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use txtedit::app::App;
use txtedit::config::{
    ConfigFlags, clear_config_flags, default_directory, global_config_path, load_config_flags,
    local_override_path, save_config_flags,
};

/// A minimal text editor that asks before discarding unsaved changes
#[derive(Parser, Debug)]
#[command(name = "txtedit", version, about, long_about = None)]
struct Cli {
    /// Directory the first open/save dialog starts in (default: home)
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Write log output to a file (discarded otherwise)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// `RUST_LOG` when it parses, otherwise warnings only.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// The log file when one is configured. Without one, output is dropped so
/// nothing is written over the alternate screen.
fn log_writer(log_file: Option<&Path>) -> Result<BoxMakeWriter> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
        None => Ok(BoxMakeWriter::new(std::io::sink)),
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(log_writer(log_file)?)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = ConfigFlags {
        dir: cli.dir.clone(),
        log_file: cli.log_file.clone(),
    };

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    let dir = match effective.dir {
        Some(dir) if dir.is_dir() => dir,
        Some(dir) => {
            tracing::warn!(dir = %dir.display(), "start directory missing, using home");
            default_directory()
        }
        None => default_directory(),
    };

    // Run the application
    let mut app = App::new(dir).with_config_paths(
        Some(global_path),
        if local_path.exists() {
            Some(local_path)
        } else {
            None
        },
    );

    app.run().context("Application error")
}
