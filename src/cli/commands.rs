//! CLI commands and argument parsing

use crate::models::DealSort;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// daam.deals price tracker client
#[derive(Parser, Debug)]
#[command(name = "pricetracker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show site-wide counters
    Stats,

    /// List products page by page
    Products {
        /// Products per page (defaults to the configured page limit)
        #[arg(long)]
        limit: Option<u32>,

        /// Number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: usize,
    },

    /// List current deals
    Deals {
        /// Look-back window in days
        #[arg(long)]
        days: Option<u32>,

        /// Ordering of the list
        #[arg(long)]
        sort_by: Option<SortArg>,
    },

    /// Show one product with its listings and prices
    Product {
        /// Internal product id
        id: i64,
    },

    /// Look up a retailer page URL
    Lookup {
        /// Retailer product page URL
        url: String,
    },

    /// Generate the product sitemap
    Sitemap {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}

/// Deal ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortArg {
    /// Largest absolute discount first
    Value,
    /// Largest relative discount first
    Percentage,
}

impl From<SortArg> for DealSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Value => DealSort::Value,
            SortArg::Percentage => DealSort::Percentage,
        }
    }
}
