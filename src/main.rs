//! sheetclip - clipboard bridge and sheet-test runner for remote
//! spreadsheet ranges.

mod clipboard;
mod commands;
mod config;
mod remote;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sheetclip_core::Range;

use crate::clipboard::{ClipboardProvider, SystemClipboard};
use crate::config::Settings;
use crate::remote::SheetsClient;

#[derive(Parser)]
#[command(name = "sheetclip")]
#[command(author, version, about = "Bridge the clipboard and remote spreadsheet ranges")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate that credentials are available and show the active settings
    Configure {
        /// Path to a file containing the API access token
        #[arg(long)]
        token_file: Option<PathBuf>,
    },

    /// Fetch a range and place the values onto the clipboard
    Pull {
        /// Spreadsheet ID from the URL
        spreadsheet_id: String,

        /// Target range (A1 notation)
        range: String,

        /// Worksheet title (defaults to the first sheet)
        #[arg(short, long)]
        worksheet: Option<String>,

        /// Disable copying the pulled values to the clipboard
        #[arg(long)]
        no_copy: bool,

        /// Path to a file containing the API access token
        #[arg(long)]
        token_file: Option<PathBuf>,
    },

    /// Update a range using clipboard (or stdin) values
    Push {
        /// Spreadsheet ID from the URL
        spreadsheet_id: String,

        /// Target range (A1 notation)
        range: String,

        /// Worksheet title (defaults to the first sheet)
        #[arg(short, long)]
        worksheet: Option<String>,

        /// Read values from stdin instead of the clipboard (tab-separated)
        #[arg(long)]
        stdin: bool,

        /// Path to a file containing the API access token
        #[arg(long)]
        token_file: Option<PathBuf>,
    },

    /// Run expressions in column A against expected values in column B
    EvalTests {
        /// Spreadsheet ID from the URL
        spreadsheet_id: String,

        /// Worksheet title (defaults to the first sheet)
        #[arg(short, long)]
        worksheet: Option<String>,

        /// Row to begin reading tests (1-based)
        #[arg(long, default_value = "1")]
        start_row: usize,

        /// Path to a file containing the API access token
        #[arg(long)]
        token_file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Configure { token_file } => {
            let settings = load_settings(token_file);
            commands::configure(&settings)
        }
        Commands::Pull {
            spreadsheet_id,
            range,
            worksheet,
            no_copy,
            token_file,
        } => {
            let range = parse_range(&range, worksheet)?;
            let client = make_client(token_file)?;
            let mut clipboard = SystemClipboard;
            commands::pull(&client, &mut clipboard, &spreadsheet_id, &range, !no_copy)
        }
        Commands::Push {
            spreadsheet_id,
            range,
            worksheet,
            stdin,
            token_file,
        } => {
            let range = parse_range(&range, worksheet)?;
            let client = make_client(token_file)?;
            let payload = if stdin {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("failed to read stdin")?;
                buffer
            } else {
                SystemClipboard.get_text()?
            };
            commands::push(&client, &spreadsheet_id, &range, &payload)
        }
        Commands::EvalTests {
            spreadsheet_id,
            worksheet,
            start_row,
            token_file,
        } => {
            let client = make_client(token_file)?;
            commands::eval_tests(&client, &spreadsheet_id, worksheet, start_row)
        }
    }
}

fn load_settings(token_file: Option<PathBuf>) -> Settings {
    let (settings, warnings) = Settings::load(token_file);
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
    settings
}

fn make_client(token_file: Option<PathBuf>) -> Result<SheetsClient> {
    let settings = load_settings(token_file);
    let token = settings.require_token()?;
    Ok(SheetsClient::new(token))
}

fn parse_range(a1: &str, worksheet: Option<String>) -> Result<Range> {
    Range::new(a1, worksheet).with_context(|| format!("invalid range '{}'", a1))
}
