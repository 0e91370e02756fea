//! Product detail page

use crate::api::products;
use crate::http::ApiClient;
use crate::models::{ExternalProductOfInternal, ExternalProductPrice, Product, VariantAttribute};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Data for `/products/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub exists: bool,
    pub product: Option<Product>,
    pub variant_attributes: Vec<VariantAttribute>,
    pub external_products: Vec<ExternalProductOfInternal>,
    pub external_prices: Vec<ExternalProductPrice>,
}

/// Load a product with its variants, listings and listing prices
///
/// A product that cannot be fetched yields `exists: false`. The three
/// follow-up lists are all-or-nothing: if any of them fails, all are empty.
pub async fn load_product(client: &ApiClient, product_id: i64) -> ProductPage {
    let product = match products::fetch_product_by_id(client, product_id).await {
        Ok(product) => product,
        Err(e) => {
            info!("Product {} unavailable: {}", product_id, e);
            return ProductPage::default();
        }
    };

    let no_variants = BTreeMap::new();
    let details = futures::try_join!(
        products::fetch_variant_attributes(client, product_id),
        products::fetch_external_products_by_internal_id(client, product_id, &no_variants),
        products::fetch_external_prices_of_product(client, product_id),
    );

    let (variant_attributes, external_products, external_prices) =
        details.unwrap_or_else(|e| {
            warn!("Failed to load details of product {}: {}", product_id, e);
            Default::default()
        });

    ProductPage {
        exists: true,
        product: Some(product),
        variant_attributes,
        external_products,
        external_prices,
    }
}
