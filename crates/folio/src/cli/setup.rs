use clap::{Parser, Subcommand};
use folioapp::model::Position;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    bin_name = "folio",
    version,
    disable_help_subcommand = true
)]
#[command(about = "A hierarchical notebook for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to FOLIO_DATA, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the document tree
    #[command(alias = "ls", display_order = 1)]
    Tree,

    /// Show a document with its breadcrumbs (defaults to the open one)
    #[command(alias = "v", display_order = 2)]
    Show { id: Option<String> },

    /// Create a new document
    #[command(alias = "n", display_order = 3)]
    Create {
        /// Title words (joined with spaces, blank becomes "Untitled")
        #[arg(trailing_var_arg = true)]
        title: Vec<String>,

        /// Create under this parent
        #[arg(long, short = 'p')]
        parent: Option<String>,

        /// Place right after this sibling
        #[arg(long, short = 'a')]
        after: Option<String>,
    },

    /// Rename a document
    #[command(display_order = 4)]
    Rename {
        id: String,
        #[arg(trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Set a document's icon (an empty icon clears it)
    #[command(display_order = 5)]
    Icon { id: String, icon: Option<String> },

    /// Star a document
    #[command(display_order = 6)]
    Star { id: String },

    /// Remove the star from a document
    #[command(display_order = 7)]
    Unstar { id: String },

    /// Replace a document's content ("-" reads from stdin)
    #[command(display_order = 8)]
    Write { id: String, content: String },

    /// Move a document before, after or inside another one
    #[command(alias = "mv", display_order = 9)]
    Move {
        source: String,
        #[arg(value_parser = parse_position)]
        position: Position,
        target: String,
    },

    /// Move a document and its subtree to the trash
    #[command(alias = "rm", display_order = 10)]
    Archive { id: String },

    /// Restore a document from the trash
    #[command(display_order = 11)]
    Restore { id: String },

    /// Permanently delete a trashed document and its trashed descendants
    #[command(display_order = 12)]
    Purge { id: String },

    /// List the trash
    #[command(display_order = 13)]
    Trash,

    /// List starred documents
    #[command(alias = "fav", display_order = 14)]
    Favorites,

    /// Make a document the open one
    #[command(display_order = 15)]
    Open { id: String },

    /// Close the open document
    #[command(display_order = 16)]
    Close,

    /// Expand a document in the tree
    #[command(display_order = 17)]
    Expand { id: String },

    /// Collapse a document in the tree
    #[command(display_order = 18)]
    Collapse { id: String },

    /// Show or change configuration
    #[command(display_order = 30)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print a commented template of every setting
    Gen {
        /// Write the template to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Print the value of one setting
    Get { key: String },

    /// Persist a setting in the data directory's folio.toml
    Set { key: String, value: String },
}

fn parse_position(raw: &str) -> Result<Position, String> {
    raw.parse()
}
