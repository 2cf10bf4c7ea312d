//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};

/// MasterGo design DSL toolkit: resolve share links, fetch DSL and site metadata, collect component docs
#[derive(Parser, Debug)]
#[command(name = "mgdsl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Personal access token (overrides MASTERGO_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// API origin (overrides MASTERGO_ENDPOINT)
    #[arg(long, global = true, value_hint = ValueHint::Url)]
    pub endpoint: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the DSL of a layer
    Dsl {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Fetch site metadata (page list) of a layer
    Meta {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Fetch component documentation
    Docs {
        /// Documentation URLs
        #[arg(value_hint = ValueHint::Url)]
        urls: Vec<String>,

        /// Take links from `dsl` output or a DSL document (stdin when FILE is omitted or `-`)
        #[arg(long, num_args = 0..=1, default_missing_value = "-", value_hint = ValueHint::FilePath)]
        from_dsl: Option<PathBuf>,

        /// Print `{docs, errors}` as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Parse a share link into file and layer ids
    ParseUrl {
        /// Full or short share link
        #[arg(value_hint = ValueHint::Url)]
        url: String,
    },

    /// Run an extractor over a DSL document
    Extract {
        /// What to extract
        #[arg(value_enum)]
        what: ExtractKind,

        /// DSL document (stdin when omitted or `-`)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Summarize a DSL document
    Analyze {
        #[command(flatten)]
        target: TargetArgs,

        /// Read the DSL document from a file
        #[arg(short, long, value_hint = ValueHint::FilePath, conflicts_with = "stdin")]
        input: Option<PathBuf>,

        /// Read the DSL document from stdin
        #[arg(long)]
        stdin: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = AnalyzeFormat::Tree)]
        format: AnalyzeFormat,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Layer selection: a share link or explicit ids
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Full or short share link
    #[arg(value_hint = ValueHint::Url)]
    pub url: Option<String>,

    /// File id
    #[arg(long, alias = "fileId", requires = "layer_id", conflicts_with = "url")]
    pub file_id: Option<String>,

    /// Layer id
    #[arg(long, alias = "layerId", requires = "file_id", conflicts_with = "url")]
    pub layer_id: Option<String>,
}

impl TargetArgs {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.file_id.is_none() && self.layer_id.is_none()
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractKind {
    /// Component documentation links
    Links,
    /// Navigation edges
    Navigations,
    /// Text contents
    Texts,
    /// Design tokens
    Tokens,
    /// Component tree
    Tree,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeFormat {
    /// Human-readable report
    Tree,
    /// Full analysis as JSON
    Json,
    /// One line per node
    Flat,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration (token masked)
    Show,
    /// Print a commented configuration template
    Template,
    /// Print the global config file path
    Path,
}
