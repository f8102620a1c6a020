use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "convoca")]
#[command(about = "Track document checklists and deadlines for Convoca calls")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Evaluate deadlines against this date instead of the local calendar day
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    pub today: Option<String>,

    /// CLI profile name for API configuration
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show progress and deadline for one collection
    Summary {
        /// Collection JSON file as returned by the backend (`-` for stdin)
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summarize a list of collections
    Dashboard {
        /// Collection list JSON file (`-` for stdin)
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate the permission record for a user
    Permissions {
        /// User is an administrator
        #[arg(long)]
        admin: bool,
        /// User is a collaborator
        #[arg(long)]
        collaborator: bool,
        /// Collection the collaborator is assigned to (repeatable)
        #[arg(long = "assigned", value_name = "ID")]
        assigned: Vec<String>,
        /// Collection to evaluate permissions for
        #[arg(long, value_name = "ID")]
        collection: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export a collection's history log
    History {
        /// Collection JSON file (`-` for stdin)
        file: PathBuf,
        /// Export format
        #[arg(long, value_enum, default_value_t = HistoryExportFormat::Json)]
        format: HistoryExportFormat,
        /// Optional output file or directory (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Export a checklist report for a collection
    Report {
        /// Collection JSON file (`-` for stdin)
        file: PathBuf,
        /// Export format
        #[arg(long, value_enum, default_value_t = ReportExportFormat::Markdown)]
        format: ReportExportFormat,
        /// Optional output file or directory (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Fetch a collection from the API and merge its documents through the cache
    Fetch {
        /// Collection ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum HistoryExportFormat {
    Json,
    Csv,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ReportExportFormat {
    Json,
    Markdown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// REST API base URL
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Bearer token sent with API requests
        #[arg(long, value_name = "TOKEN")]
        access_token: Option<String>,
        /// Request timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the resolved profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
