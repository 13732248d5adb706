//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::config::{LoggingConfig, PageConfig};
use crate::tabs::TabId;

/// Upper bound of `palette --count`.
pub const MAX_COUNT: u16 = 360;

/// Output format of the palette command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PaletteFormat {
    /// YAML list of tabs with their colours
    #[default]
    Yaml,
    /// JSON object keyed by tab
    Json,
    /// CSS custom properties per tab control
    Css,
}

/// Tabbed page controller with hue-rotated accent palettes.
#[derive(Parser, Debug)]
#[command(name = "tabtint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load configuration from TOML file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path (overrides the config, default: tabtint.log)
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace (overrides the config)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the accent colours generated for each tab
    Palette(PaletteArgs),
    /// Load a headless page, apply events and print its state
    Simulate(SimulateArgs),
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Base colour in any CSS format (overrides the config)
    #[arg(short, long)]
    pub base: Option<String>,

    /// Hue rotation between consecutive entries, in degrees
    #[arg(short, long, allow_negative_numbers = true)]
    pub step: Option<i32>,

    /// Number of entries; defaults to one per tab
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_COUNT)))]
    pub count: Option<u16>,

    #[arg(short, long, value_enum, default_value_t = PaletteFormat::Yaml)]
    pub format: PaletteFormat,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Events such as tab:task2, next, goto:outcome:-1, wait:5000, scroll:right, resize:900
    #[arg(value_name = "EVENT")]
    pub events: Vec<String>,

    /// Read events from a file (one per line, `#` comments), run before EVENTs
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Tab opened on load (overrides the config)
    #[arg(long, value_enum)]
    pub initial: Option<TabId>,

    /// Print the page state after every event instead of only at the end
    #[arg(long)]
    pub trace: bool,
}

impl Cli {
    /// Overlay the global logging flags on the loaded configuration.
    pub fn apply_logging(&self, config: &mut LoggingConfig) {
        if let Some(file) = &self.log_file {
            config.file = file.clone();
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
    }
}

impl PaletteArgs {
    /// Overlay command-line overrides on the loaded configuration.
    pub fn apply(&self, config: &mut PageConfig) {
        if let Some(base) = &self.base {
            config.palette.base = base.clone();
        }
        if let Some(step) = self.step {
            config.palette.hue_step = step;
        }
    }
}
