use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::errors::AppError;
use crate::store::{json::STORAGE_PATH, storage_port::export_csv::EXPORT_PATH};

#[derive(Parser, Debug)]
#[command(name = "contact-book", version, about = "Interactive contact book")]
pub struct Cli {
    /// JSON file the contacts are loaded from and saved to
    #[arg(long, env = "CONTACTS_DATA_FILE", default_value = STORAGE_PATH)]
    pub data_file: PathBuf,

    /// Destination of the CSV export (menu option 6)
    #[arg(long, env = "CONTACTS_EXPORT_FILE", default_value = EXPORT_PATH)]
    pub export_file: PathBuf,

    /// Log debug events to stderr unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

/// Entries of the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Search,
    Update,
    Delete,
    DisplayAll,
    Export,
    Statistics,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::Add),
            "2" => Ok(MenuChoice::Search),
            "3" => Ok(MenuChoice::Update),
            "4" => Ok(MenuChoice::Delete),
            "5" => Ok(MenuChoice::DisplayAll),
            "6" => Ok(MenuChoice::Export),
            "7" => Ok(MenuChoice::Statistics),
            "8" => Ok(MenuChoice::Exit),
            other => Err(AppError::ParseCommand(other.to_string())),
        }
    }
}
