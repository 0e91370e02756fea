//! Lookup of a retailer page URL

use super::{Breadcrumb, LayoutData};
use crate::api::{externals, products};
use crate::error::{ApiResult, Error, Result};
use crate::http::ApiClient;
use crate::models::{
    Category, ExternalProduct, ExternalProductFilter, ExternalProductMetadata,
    ExternalProductOfInternal, ExternalProductPrice, ProductBadge, Website,
};
use crate::util::decode_uri_component;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{error, warn};

const SUPPORTING_DATA_ERROR: &str = "Failed to fetch supporting data.";

/// A sibling listing with its own metadata, badges and newest price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalProductWithDetails {
    #[serde(flatten)]
    pub listing: ExternalProductOfInternal,
    pub metadata: Vec<ExternalProductMetadata>,
    pub badges: Vec<ProductBadge>,
    pub latest_price: Option<ExternalProductPrice>,
}

impl ExternalProductWithDetails {
    fn bare(listing: ExternalProductOfInternal) -> Self {
        Self {
            listing,
            metadata: Vec::new(),
            badges: Vec::new(),
            latest_price: None,
        }
    }

    fn id(&self) -> i64 {
        self.listing.external_product_id
    }

    fn sort_price(&self) -> f64 {
        self.latest_price.as_ref().map_or(f64::MAX, |p| p.price)
    }
}

/// Data for `/url/{slug}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlLookupPage {
    pub exists: bool,
    /// Decoded retailer URL
    pub url: String,
    /// Set when supporting data could not be loaded
    ///
    /// Holds the `message` field of the server's error body when it sent
    /// one, else "Failed to fetch supporting data."; the client-side
    /// classification ("HTTP error" and the like) is never shown.
    pub error: Option<String>,
    pub external_product: ExternalProduct,
    pub prices: Vec<ExternalProductPrice>,
    pub metadata: Vec<ExternalProductMetadata>,
    pub badges: Vec<ProductBadge>,
    /// Other variants of the same internal product
    pub variant_products: Vec<ExternalProductWithDetails>,
    /// The same product sold elsewhere
    pub similar_products: Vec<ExternalProductWithDetails>,
    pub website: Option<Website>,
    pub category: Option<Category>,
    pub breadcrumb: Vec<Breadcrumb>,
}

/// Load everything known about the listing at a retailer URL
///
/// `slug` is the percent-encoded URL as it appears in the route. Fails with
/// status 500 when it is empty or malformed and 404 when no listing matches.
pub async fn load_url_lookup(
    client: &ApiClient,
    slug: &str,
    layout: &LayoutData,
) -> Result<UrlLookupPage> {
    if slug.is_empty() {
        return Err(Error::load(500, "Missing URL parameter."));
    }
    let product_url =
        decode_uri_component(slug).ok_or_else(|| Error::load(500, "Malformed URL parameter."))?;

    let filter = ExternalProductFilter {
        url: Some(product_url.clone()),
        ..Default::default()
    };
    let matches = externals::fetch_external_products(client, &filter)
        .await
        .unwrap_or_else(|e| {
            warn!("URL lookup for {} failed: {}", product_url, e);
            Vec::new()
        });

    let Some(external_product) = matches.into_iter().next() else {
        return Err(Error::load(404, "Product not found."));
    };

    let mut error = None;
    let (prices, metadata, badges, siblings, similar) =
        match fetch_supporting(client, &external_product).await {
            Ok(data) => data,
            Err(e) => {
                warn!(
                    "Failed to load supporting data for listing {}: {}",
                    external_product.id, e
                );
                error = Some(
                    e.server_message()
                        .unwrap_or(SUPPORTING_DATA_ERROR)
                        .to_string(),
                );
                Default::default()
            }
        };

    let mut siblings = with_details(client, siblings).await;
    siblings.sort_by(|a, b| a.sort_price().total_cmp(&b.sort_price()));

    let similar_ids: HashSet<i64> = similar.iter().map(|p| p.external_product_id).collect();
    let (similar_products, variant_products): (Vec<_>, Vec<_>) = siblings
        .into_iter()
        .filter(|p| similar_ids.contains(&p.id()) || p.id() != external_product.id)
        .partition(|p| similar_ids.contains(&p.id()));

    let website = layout.website_map.get(&external_product.website_id).cloned();
    let category = external_product
        .category_id
        .and_then(|id| layout.category_map.get(&id).cloned());

    let breadcrumb = vec![
        Breadcrumb::new("URL Lookup", "/url"),
        Breadcrumb::new(external_product.name.clone(), format!("/url/{slug}")),
    ];

    Ok(UrlLookupPage {
        exists: true,
        url: product_url,
        error,
        external_product,
        prices,
        metadata,
        badges,
        variant_products,
        similar_products,
        website,
        category,
        breadcrumb,
    })
}

type SupportingData = (
    Vec<ExternalProductPrice>,
    Vec<ExternalProductMetadata>,
    Vec<ProductBadge>,
    Vec<ExternalProductOfInternal>,
    Vec<ExternalProductOfInternal>,
);

async fn fetch_supporting(client: &ApiClient, product: &ExternalProduct) -> ApiResult<SupportingData> {
    let no_variants = BTreeMap::new();
    futures::try_join!(
        externals::fetch_external_product_prices(client, product.id),
        externals::fetch_external_product_metadata(client, product.id),
        externals::fetch_external_product_badges(client, product.id),
        products::fetch_external_products_by_internal_id(
            client,
            product.internal_product_id,
            &no_variants
        ),
        externals::fetch_similar_external_products(client, product.id),
    )
}

/// Attach metadata, badges and newest price to every sibling
///
/// All-or-nothing: when any sibling fails, every sibling is returned bare.
async fn with_details(
    client: &ApiClient,
    siblings: Vec<ExternalProductOfInternal>,
) -> Vec<ExternalProductWithDetails> {
    let extras = futures::future::try_join_all(siblings.iter().map(|p| async move {
        futures::try_join!(
            externals::fetch_external_product_metadata(client, p.external_product_id),
            externals::fetch_external_product_badges(client, p.external_product_id),
            externals::fetch_external_product_prices(client, p.external_product_id),
        )
    }))
    .await;

    match extras {
        Ok(extras) => siblings
            .into_iter()
            .zip(extras)
            .map(|(listing, (metadata, badges, prices))| ExternalProductWithDetails {
                listing,
                metadata,
                badges,
                latest_price: prices.into_iter().next(),
            })
            .collect(),
        Err(e) => {
            error!("Failed to fetch sibling products: {}", e);
            siblings
                .into_iter()
                .map(ExternalProductWithDetails::bare)
                .collect()
        }
    }
}
