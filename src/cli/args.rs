//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Site navigation trees: ordered named nodes, safe structural edits and derived URIs
#[derive(Parser, Debug)]
#[command(name = "navtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the navigation as a tree
    Tree {
        /// Site descriptor (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Show resolved URIs next to node names
        #[arg(short, long)]
        uris: bool,
    },

    /// Print every node's resolved URI
    Uris {
        /// Site descriptor (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show a single node
    Node {
        /// Site descriptor (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Node path below the root, e.g. `home/news`
        path: String,
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
    /// Show effective settings
    Show {
        /// Directory with a local .navtree.toml
        #[arg(value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },
    /// Show config file locations
    Path,
}
