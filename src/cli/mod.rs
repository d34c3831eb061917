//! CLI module - Command-line interface for recipedex
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

pub use commands::{cmd_rebuild_index, cmd_search, cmd_suggest};

use clap::{Args, Parser, Subcommand};

use crate::domain::{Difficulty, SortOrder};

/// recipedex - Recipe search and hydration engine
#[derive(Parser)]
#[command(name = "recipedex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    #[command(alias = "daemon")]
    Serve,

    /// Search recipes visible to a user
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Autocomplete a partial query
    Suggest {
        /// Acting user
        #[arg(long, short)]
        user: String,

        /// Partial text (at least two characters)
        partial: String,

        /// Maximum number of suggestions
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Clear and repopulate the full-text index
    RebuildIndex,

    /// Create default config file
    Init,
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Acting user
    #[arg(long, short)]
    pub user: String,

    /// Free-text query
    pub query: Vec<String>,

    /// Required tags (all must match)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub cuisine: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub difficulty: Vec<Difficulty>,

    /// Maximum prep time in minutes
    #[arg(long)]
    pub max_prep_time: Option<u16>,

    /// Maximum cook time in minutes
    #[arg(long)]
    pub max_cook_time: Option<u16>,

    #[arg(long)]
    pub servings: Option<u16>,

    /// Only public (true) or only your private (false) recipes
    #[arg(long)]
    pub public: Option<bool>,

    /// created_at, updated_at, title, prep_time, cook_time, servings,
    /// difficulty, cuisine or relevance
    #[arg(long)]
    pub sort_by: Option<String>,

    #[arg(long)]
    pub sort_order: Option<SortOrder>,

    #[arg(long)]
    pub limit: Option<u64>,

    #[arg(long, default_value_t = 0)]
    pub offset: u64,

    /// Print the raw response as JSON
    #[arg(long)]
    pub json: bool,
}
