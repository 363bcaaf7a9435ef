use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use matrix_studio_edit::EditorOptions;

mod commands;

#[derive(Parser)]
#[command(version, about = "Create, inspect and edit LED matrix layout files.")]
pub struct Cli {
    #[arg(help = "Options file (defaults to options.toml in the config directory)", long, global = true)]
    config: Option<PathBuf>,

    #[arg(help = "Enable debug logging", short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[arg(help = "Write rotated log files to this directory", long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create an empty layout")]
    New {
        #[arg(long, default_value_t = 8)]
        rows: usize,
        #[arg(long, default_value_t = 8)]
        cols: usize,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long)]
        name: Option<String>,
    },

    #[command(about = "Print size, devices and groups of a layout")]
    Info { file: PathBuf },

    #[command(about = "Resize a layout, keeping the overlapping cells")]
    Resize {
        file: PathBuf,
        #[arg(long)]
        rows: usize,
        #[arg(long)]
        cols: usize,
        #[arg(short, long, help = "Output file (defaults to overwriting the input)")]
        output: Option<PathBuf>,
    },

    #[command(about = "Renumber the pixels of a group in row-major order")]
    Renumber {
        file: PathBuf,
        #[arg(long)]
        group: String,
        #[arg(long, default_value_t = 0)]
        start: i32,
        #[arg(short, long, help = "Output file (defaults to overwriting the input)")]
        output: Option<PathBuf>,
    },

    #[command(about = "Report cells whose pixel index does not fit their device")]
    Check { file: PathBuf },
}

fn start_logger(verbose: bool, log_dir: Option<&Path>) -> anyhow::Result<LoggerHandle> {
    let spec = if verbose { "debug, i18n_embed=error" } else { "info, i18n_embed=error" };
    let logger = Logger::try_with_env_or_str(spec)?;
    let handle = match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir).basename("matrix_studio").suffix("log").suppress_timestamp())
            .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
            .duplicate_to_stderr(Duplicate::Warn)
            .start()?,
        None => logger.log_to_stderr().start()?,
    };
    Ok(handle)
}

fn get_options_file() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "GitHub", "matrix_studio").map(|proj_dirs| proj_dirs.config_dir().join("options.toml"))
}

fn load_options(path: Option<&Path>) -> anyhow::Result<EditorOptions> {
    if let Some(path) = path {
        return Ok(EditorOptions::load(path)?);
    }
    if let Some(options_file) = get_options_file() {
        if options_file.exists() {
            match EditorOptions::load(&options_file) {
                Ok(options) => return Ok(options),
                Err(err) => log::error!("Error reading options file {}: {err}", options_file.display()),
            }
        }
    }
    Ok(EditorOptions::default())
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let _logger = start_logger(args.verbose, args.log_dir.as_deref())?;
    let options = load_options(args.config.as_deref())?;

    match args.command {
        Commands::New { rows, cols, output, name } => commands::new_layout(&options, rows, cols, &output, name),
        Commands::Info { file } => commands::info(&options, &file),
        Commands::Resize { file, rows, cols, output } => commands::resize(&options, &file, rows, cols, output.as_deref()),
        Commands::Renumber { file, group, start, output } => commands::renumber(&options, &file, &group, start, output.as_deref()),
        Commands::Check { file } => commands::check(&options, &file),
    }
}
