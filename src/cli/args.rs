//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Write flat colon-delimited configuration keys as an XML document
#[derive(Parser, Debug)]
#[command(name = "xmlcfg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .xmlcfg.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Root element name (overrides settings)
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// Do not write the generation comment
    #[arg(long, global = true)]
    pub no_comment: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the XML document for KEY=VALUE pairs to stdout
    Render {
        /// Entries in order, e.g. logging:level=debug
        pairs: Vec<String>,
    },

    /// Write KEY=VALUE pairs to a file, rewriting it after every pair
    Write {
        /// Target XML file (default: settings.default_file)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Entries in order, e.g. logging:level=debug
        pairs: Vec<String>,
    },

    /// Show the element tree for KEY=VALUE pairs
    Tree {
        /// Entries in order, e.g. logging:level=debug
        pairs: Vec<String>,
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

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings as TOML
    Show,
    /// Show config file locations
    Path,
    /// Print a commented settings template
    Template,
}
