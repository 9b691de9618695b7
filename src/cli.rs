use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;
use crate::utils::{get_not_supported_file, get_port, get_reporting_tz_name, get_statistic_dir};

#[derive(Parser)]
#[command(name = "cryptostats")]
#[command(about = "Crypto price statistics API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Locations of the flat files, shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct StorageArgs {
    /// Directory holding <SYMBOL>_values.csv files [env: STATISTIC_DIR]
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Exclusion list file [env: NOT_SUPPORTED_FILE]
    #[arg(short, long)]
    pub not_supported_file: Option<PathBuf>,
}

impl StorageArgs {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(get_statistic_dir)
    }

    pub fn not_supported_file(&self) -> PathBuf {
        self.not_supported_file
            .clone()
            .unwrap_or_else(get_not_supported_file)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on [env: PORT, default: 8080]
        #[arg(short, long)]
        port: Option<u16>,

        /// Time zone used to match calendar days [env: REPORTING_TZ, default: UTC]
        #[arg(short, long)]
        timezone: Option<String>,

        #[command(flatten)]
        storage: StorageArgs,
    },
    /// Show what the data directory holds
    Status {
        #[command(flatten)]
        storage: StorageArgs,
    },
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            timezone,
            storage,
        } => {
            let port = port.unwrap_or_else(get_port);
            let timezone = timezone.unwrap_or_else(get_reporting_tz_name);
            commands::serve::run(port, &timezone, &storage.data_dir(), &storage.not_supported_file()).await;
        }
        Commands::Status { storage } => {
            commands::status::run(&storage.data_dir(), &storage.not_supported_file());
        }
    }
}
