// brandgrid CLI - brand-mention detection from the shell
//
// Stands in for the spreadsheet host: adapts shell input into the grid
// shapes the core consumes, and maps client errors onto exit codes.

mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use brandgrid_client::{
    brand_list, brand_present, brand_present_smart, probe, set_token,
    AnnotationClient, FileTokenStore,
};

use exit_codes::{client_exit_code, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "bgrid")]
#[command(about = "Detect brand/organization mentions in free text")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the Dandelion API token
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// TRUE/FALSE: does the text mention at least one brand?
    #[command(after_help = "\
Examples:
  bgrid present \"J'adore mon iPhone Apple\"
  bgrid present \"some english text\" --lang auto
  bgrid present \"texte\" --min-confidence 0.8")]
    Present {
        /// Text to analyze
        text: String,

        /// Language hint, e.g. \"fr\" (default) or \"auto\"
        #[arg(long)]
        lang: Option<String>,

        /// Minimum confidence the API must assign (default 0.6)
        #[arg(long)]
        min_confidence: Option<f64>,
    },

    /// List unique brand labels found in the text, one per line
    #[command(after_help = "\
Examples:
  bgrid list \"Renault, Peugeot et Citroën\"
  bgrid list \"some english text\" --lang auto")]
    List {
        /// Text to analyze
        text: String,

        /// Language hint, e.g. \"fr\" (default) or \"auto\"
        #[arg(long)]
        lang: Option<String>,

        /// Minimum confidence the API must assign (default 0.6)
        #[arg(long)]
        min_confidence: Option<f64>,
    },

    /// Best-effort detection: remote API first (lower threshold), then a
    /// local dictionary match. Never fails on API errors.
    #[command(after_help = "\
Examples:
  bgrid smart \"J'adore mon iPhone Apple\" --brand Apple --brand Samsung
  bgrid smart \"texte à analyser\" --brands-file marques.csv
  bgrid smart \"texte\" --brands-file marques.csv --min-confidence 0.2")]
    Smart {
        /// Text to analyze
        text: String,

        /// Known brand name (repeatable)
        #[arg(long)]
        brand: Vec<String>,

        /// CSV file of known brand names (every cell is a candidate)
        #[arg(long)]
        brands_file: Option<PathBuf>,

        /// Language hint, e.g. \"fr\" (default) or \"auto\"
        #[arg(long)]
        lang: Option<String>,

        /// Minimum confidence for the remote attempt (default 0.3)
        #[arg(long)]
        min_confidence: Option<f64>,
    },

    /// Issue one fixed probe call and print the raw response
    Probe,
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Store the API token (omit the value to store an empty one)
    Set {
        /// Token value
        token: Option<String>,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn client(err: brandgrid_client::Error) -> Self {
        let hint = match &err {
            brandgrid_client::Error::MissingCredential => {
                Some("run `bgrid token set <TOKEN>` with your Dandelion token".to_string())
            }
            _ => None,
        };
        Self {
            code: client_exit_code(&err),
            message: err.to_string(),
            hint,
        }
    }
}

fn default_client() -> Result<AnnotationClient, CliError> {
    let store = FileTokenStore::at_default_path().ok_or(CliError {
        code: EXIT_ERROR,
        message: "could not determine the config directory".to_string(),
        hint: None,
    })?;
    Ok(AnnotationClient::new(Box::new(store)))
}

/// Build the matcher's dictionary grid from --brand flags and/or a CSV
/// file. Blank cells survive here; the matcher filters them.
fn load_dictionary(
    brands: &[String],
    brands_file: Option<&PathBuf>,
) -> Result<Vec<Vec<String>>, CliError> {
    let mut grid: Vec<Vec<String>> = brands.iter().map(|b| vec![b.clone()]).collect();

    if let Some(path) = brands_file {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| CliError {
                code: EXIT_USAGE,
                message: format!("cannot read {}: {}", path.display(), e),
                hint: None,
            })?;

        for record in reader.records() {
            let record = record.map_err(|e| CliError {
                code: EXIT_USAGE,
                message: format!("invalid CSV in {}: {}", path.display(), e),
                hint: None,
            })?;
            grid.push(record.iter().map(|cell| cell.to_string()).collect());
        }
    }

    Ok(grid)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Token { command } => match command {
            TokenCommands::Set { token } => {
                let store = FileTokenStore::at_default_path().ok_or(CliError {
                    code: EXIT_ERROR,
                    message: "could not determine the config directory".to_string(),
                    hint: None,
                })?;
                let msg = set_token(&store, token.as_deref()).map_err(CliError::client)?;
                println!("{}", msg);
                Ok(())
            }
        },

        Commands::Present { text, lang, min_confidence } => {
            let client = default_client()?;
            let hit = brand_present(&client, &text, lang.as_deref(), min_confidence)
                .map_err(CliError::client)?;
            println!("{}", if hit { "TRUE" } else { "FALSE" });
            Ok(())
        }

        Commands::List { text, lang, min_confidence } => {
            let client = default_client()?;
            let rows = brand_list(&client, &text, lang.as_deref(), min_confidence)
                .map_err(CliError::client)?;
            for row in rows {
                // One cell per row; the sentinel row prints as a blank line
                println!("{}", row.first().map(String::as_str).unwrap_or(""));
            }
            Ok(())
        }

        Commands::Smart { text, brand, brands_file, lang, min_confidence } => {
            let dictionary = load_dictionary(&brand, brands_file.as_ref())?;
            let client = default_client()?;
            let hit = brand_present_smart(&client, &text, &dictionary, lang.as_deref(), min_confidence);
            println!("{}", if hit { "TRUE" } else { "FALSE" });
            Ok(())
        }

        Commands::Probe => {
            let client = default_client()?;
            let raw = probe(&client).map_err(CliError::client)?;
            println!("{}", raw);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = e.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(e.code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_dictionary_flags_only() {
        let grid = load_dictionary(&["Apple".to_string(), "Samsung".to_string()], None).unwrap();
        assert_eq!(grid, vec![vec!["Apple".to_string()], vec!["Samsung".to_string()]]);
    }

    #[test]
    fn test_load_dictionary_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brands.csv");
        std::fs::write(&path, "Apple,Apple Inc.\nSamsung\n,Nike\n").unwrap();

        let grid = load_dictionary(&[], Some(&path)).unwrap();
        assert_eq!(
            grid,
            vec![
                vec!["Apple".to_string(), "Apple Inc.".to_string()],
                vec!["Samsung".to_string()],
                vec!["".to_string(), "Nike".to_string()],
            ]
        );
    }

    #[test]
    fn test_load_dictionary_flags_and_file_combine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brands.csv");
        std::fs::write(&path, "Nike\n").unwrap();

        let grid = load_dictionary(&["Apple".to_string()], Some(&path)).unwrap();
        assert_eq!(grid, vec![vec!["Apple".to_string()], vec!["Nike".to_string()]]);
    }

    #[test]
    fn test_load_dictionary_missing_file() {
        let err = load_dictionary(&[], Some(&PathBuf::from("/no/such/file.csv"))).unwrap_err();
        assert_eq!(err.code, EXIT_USAGE);
        assert!(err.message.contains("cannot read"));
    }

    #[test]
    fn test_cli_error_is_debuggable() {
        // `unwrap_err` above needs CliError: Debug; make sure the dump
        // carries the fields a failing test would want to see.
        let err = load_dictionary(&[], Some(&PathBuf::from("/no/such/file.csv"))).unwrap_err();
        let dump = format!("{:?}", err);
        assert!(dump.contains("cannot read"));
        assert!(dump.contains("code"));
    }

    #[test]
    fn test_matcher_accepts_cli_dictionary_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brands.csv");
        std::fs::write(&path, ",Apple\nSamsung,\n").unwrap();

        let grid = load_dictionary(&[], Some(&path)).unwrap();
        assert!(brandgrid_core::local_match("J'adore mon iPhone Apple", &grid));
        assert!(!brandgrid_core::local_match("rien ici", &grid));
    }
}
