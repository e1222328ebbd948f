//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use taxmap_cli::config::Overrides;

#[derive(Parser)]
#[command(
    name = "taxmap",
    version,
    about = "Province tax accrual and collection maps",
    long_about = "Render province-level tax accrual (tahakkuk) and collection (tahsilat) maps.\n\n\
                  Reads one spreadsheet per province from a dataset folder, joins the\n\
                  chosen category onto the province map and writes three PNG maps plus\n\
                  a zip archive."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: ./taxmap.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Data folder holding the dataset root and tr.json.
    #[arg(long = "data-root", value_name = "DIR", global = true)]
    pub data_root: Option<PathBuf>,

    /// Province map GeoJSON (default: <DATA_ROOT>/tr.json).
    #[arg(long = "map-file", value_name = "PATH", global = true)]
    pub map_file: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        let output_dir = match &self.command {
            Command::Render(args) => args.output_dir.clone(),
            Command::Folders | Command::Categories(_) => None,
        };
        Overrides {
            config: self.config.clone(),
            data_root: self.data_root.clone(),
            map_file: self.map_file.clone(),
            output_dir,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List dataset folders and their province file counts.
    Folders,

    /// List the selectable categories of a dataset folder.
    Categories(CategoriesArgs),

    /// Render the accrual, collection and ratio maps for categories.
    Render(RenderArgs),
}

#[derive(Parser)]
pub struct CategoriesArgs {
    /// Dataset folder name or path (default: first folder by name).
    #[arg(value_name = "FOLDER")]
    pub folder: Option<String>,
}

#[derive(Parser)]
pub struct RenderArgs {
    /// Dataset folder name or path (default: first folder by name).
    #[arg(value_name = "FOLDER")]
    pub folder: Option<String>,

    /// Category label to render; repeat for several.
    #[arg(long = "category", short = 'c', value_name = "LABEL", required = true)]
    pub categories: Vec<String>,

    /// Output directory for maps and archives (default: ./output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Render and report without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Skip writing the zip archive.
    #[arg(long = "no-archive")]
    pub no_archive: bool,

    /// Also write the SVG source of every map.
    #[arg(long = "svg")]
    pub svg: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
