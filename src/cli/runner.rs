//! CLI runner - executes commands

use crate::api::{catalog, deals, products};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, ClientConfig};
use crate::error::{Error, Result};
use crate::http::ApiClient;
use crate::loaders::{self, LayoutInput};
use crate::models::DealFilter;
use crate::sitemap;
use crate::util::encode_uri_component;
use serde::Serialize;
use serde_json::json;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Stats => self.stats(&config).await,
            Commands::Products { limit, pages } => {
                let limit = limit.unwrap_or(config.page_limit);
                self.products(&config, limit, *pages).await
            }
            Commands::Deals { days, sort_by } => {
                let filter = DealFilter {
                    days: *days,
                    sort_by: sort_by.map(Into::into),
                    ..Default::default()
                };
                self.deals(&config, &filter).await
            }
            Commands::Product { id } => self.product(&config, *id).await,
            Commands::Lookup { url } => self.lookup(&config, url).await,
            Commands::Sitemap { output } => self.sitemap(&config, output.as_deref()).await,
            Commands::Serve { port } => {
                let server_config = crate::cli::ServerConfig { client: config };
                crate::cli::serve(server_config, *port).await
            }
        }
    }

    /// Load the config file when given, else defaults plus environment
    fn load_config(&self) -> Result<ClientConfig> {
        match &self.cli.config {
            Some(path) => load_config(path),
            None => ClientConfig::from_env(),
        }
    }

    fn client(&self, config: &ClientConfig) -> Result<ApiClient> {
        let client = ApiClient::new(config.server_client())?;
        if self.cli.verbose {
            eprintln!("Using API at {}", config.public_api_url);
        }
        Ok(client)
    }

    async fn stats(&self, config: &ClientConfig) -> Result<()> {
        let client = self.client(config)?;
        let stats = catalog::fetch_stats(&client).await?;
        self.output(&stats)
    }

    async fn products(&self, config: &ClientConfig, limit: u32, pages: usize) -> Result<()> {
        let client = self.client(config)?;
        let mut pager = products::products_pager(&client, limit);

        let page = pager.first().await?;
        self.output(&json!({ "page": 1, "products": page.data }))?;

        for number in 2..=pages {
            if !pager.has_next() {
                break;
            }
            let page = pager.next().await?;
            self.output(&json!({ "page": number, "products": page.data }))?;
        }

        if self.cli.verbose && pager.has_next() {
            eprintln!("More pages available");
        }
        Ok(())
    }

    async fn deals(&self, config: &ClientConfig, filter: &DealFilter) -> Result<()> {
        let client = self.client(config)?;
        let deals = deals::fetch_deals(&client, filter).await?;
        self.output(&deals)
    }

    async fn product(&self, config: &ClientConfig, id: i64) -> Result<()> {
        let client = self.client(config)?;
        let page = loaders::load_product(&client, id).await;
        if !page.exists {
            return Err(Error::load(404, format!("Product {id} not found")));
        }
        self.output(&page)
    }

    async fn lookup(&self, config: &ClientConfig, url: &str) -> Result<()> {
        let client = self.client(config)?;
        let layout = loaders::load_layout(&client, &LayoutInput::default()).await;
        let page = loaders::load_url_lookup(&client, &encode_uri_component(url), &layout).await?;
        self.output(&page)
    }

    async fn sitemap(&self, config: &ClientConfig, output: Option<&Path>) -> Result<()> {
        let client = self.client(config)?;
        let xml = sitemap::build_sitemap(&client).await?;

        match output {
            Some(path) => {
                std::fs::write(path, xml)?;
                if self.cli.verbose {
                    eprintln!("Sitemap written to {}", path.display());
                }
            }
            None => println!("{xml}"),
        }
        Ok(())
    }

    /// Print a value in the selected format
    fn output<T: Serialize>(&self, value: &T) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{text}");
        Ok(())
    }
}
