//! Command-line surface and the validated configuration built from it.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use tracing::Level;

use crate::constants::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};
use crate::error::FolioError;
use crate::window::CellMetrics;

const APP_DIR: &str = "term-folio";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "term-folio",
    version = env!("CARGO_PKG_VERSION"),
    about = "A desktop-style personal portfolio for the terminal"
)]
pub struct FolioCli {
    /// Where preferences, window layout and the log live.
    #[arg(long, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Where the project list and received contact messages live.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Logical pixels per terminal column.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_CELL_WIDTH)]
    pub cell_width: u16,

    /// Logical pixels per terminal row.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_CELL_HEIGHT)]
    pub cell_height: u16,

    /// Forget saved window positions and start from the default layout.
    #[arg(long)]
    pub reset_layout: bool,

    /// Log destination; defaults to term-folio.log in the state directory.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// One of error, warn, info, debug, trace.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Leave the mouse to the terminal (text selection keeps working).
    #[arg(long)]
    pub no_mouse: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolioConfig {
    pub state_dir: PathBuf,
    pub data_dir: PathBuf,
    pub metrics: CellMetrics,
    pub reset_layout: bool,
    pub log_file: PathBuf,
    pub log_level: Level,
    pub mouse: bool,
}

impl FolioConfig {
    pub fn storage_path(&self) -> PathBuf {
        self.state_dir.join("storage.json")
    }
}

impl TryFrom<&FolioCli> for FolioConfig {
    type Error = FolioError;

    fn try_from(cli: &FolioCli) -> Result<Self, Self::Error> {
        if !(1..=200).contains(&cli.cell_width) {
            return Err(FolioError::Config(
                "cell width must be between 1 and 200 pixels".to_string(),
            ));
        }
        if !(1..=400).contains(&cli.cell_height) {
            return Err(FolioError::Config(
                "cell height must be between 1 and 400 pixels".to_string(),
            ));
        }
        let log_level = Level::from_str(cli.log_level.trim())
            .map_err(|_| FolioError::Config(format!("unknown log level {:?}", cli.log_level)))?;

        let state_dir = match &cli.state_dir {
            Some(dir) => dir.clone(),
            None => dirs::state_dir()
                .or_else(dirs::data_local_dir)
                .map(|dir| dir.join(APP_DIR))
                .ok_or(FolioError::MissingDirectory { kind: "state" })?,
        };
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(FolioError::MissingDirectory { kind: "data" })?,
        };
        let log_file = cli
            .log_file
            .clone()
            .unwrap_or_else(|| state_dir.join("term-folio.log"));

        Ok(Self {
            state_dir,
            data_dir,
            metrics: CellMetrics::new(cli.cell_width, cli.cell_height),
            reset_layout: cli.reset_layout,
            log_file,
            log_level,
            mouse: !cli.no_mouse,
        })
    }
}
