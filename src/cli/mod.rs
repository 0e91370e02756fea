//! CLI module
//!
//! Command-line interface for the price tracker API.
//!
//! # Commands
//!
//! - `stats` - Site-wide counters
//! - `products` - Paginated product list
//! - `deals` - Current deals
//! - `product` - One product with listings and prices
//! - `lookup` - Retailer URL lookup
//! - `sitemap` - Product sitemap XML
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat, SortArg};
pub use runner::Runner;
pub use server::{router, serve, ServerConfig};
