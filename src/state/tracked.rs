//! Products the signed-in user is tracking

use crate::api::users;
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::TrackedProduct;
use crate::store::Store;
use tokio::sync::watch;
use tracing::warn;

/// Observable list of tracked products
#[derive(Debug, Clone, Default)]
pub struct TrackedProducts {
    products: Store<Vec<TrackedProduct>>,
}

impl TrackedProducts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current list
    pub fn products(&self) -> Vec<TrackedProduct> {
        self.products.get()
    }

    pub fn clear(&self) {
        self.products.set(Vec::new());
    }

    /// Check if `product_id` is in the list
    pub fn is_tracked(&self, product_id: i64) -> bool {
        self.products
            .read(|list| list.iter().any(|p| p.product_id == product_id))
    }

    /// Reload the list from the server
    ///
    /// On failure the previous list is kept and the error returned.
    pub async fn refresh(&self, client: &ApiClient) -> ApiResult<usize> {
        match users::get_my_tracked_products(client).await {
            Ok(list) => {
                let count = list.len();
                self.products.set(list);
                Ok(count)
            }
            Err(e) => {
                warn!("Failed to refresh tracked products: {}", e);
                Err(e)
            }
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<TrackedProduct>> {
        self.products.subscribe()
    }
}
