use clap::Parser;
use fm::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fm", about = "A terminal dual-pane file manager")]
struct Args {
    /// Directory to start in
    path: Option<PathBuf>,

    /// Show hidden files
    #[arg(short = 'a', long = "all")]
    all: bool,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Some(dir) = config::config_dir()
        && fs::create_dir_all(&dir).is_ok()
        && let Ok(log_file) = File::create(dir.join("fm.log"))
    {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().map_err(io::Error::other)?;
    let mut resolved = config::resolve(
        &file_config,
        &CliOverrides {
            start_dir: args.path,
            show_hidden: args.all,
        },
    );

    // The listing tracks absolute paths; an unusable start directory is fatal.
    resolved.start_dir = fs::canonicalize(&resolved.start_dir).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("cannot open {}: {e}", resolved.start_dir.display()),
        )
    })?;
    if !resolved.start_dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a directory: {}", resolved.start_dir.display()),
        ));
    }

    log::info!("fm starting in {}", resolved.start_dir.display());

    fm::tui::run(resolved)
}
