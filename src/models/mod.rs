//! Resource bodies returned by the price tracker API
//!
//! Field names follow the API's JSON. Optional or server-version-dependent
//! fields default when absent.

mod catalog;
mod deal;
mod flagging;
mod product;
mod user;
mod website;

pub use catalog::{Category, GeneratedMetadata, GeneratedSpec, Manufacturer, MetadataDetail, Stats};
pub use deal::{Deal, DealFilter, DealSort};
pub use flagging::{FlagCount, Flagging, FlaggingOption, FringeGroup};
pub use product::{
    ExternalProduct, ExternalProductFilter, ExternalProductMetadata, ExternalProductOfInternal,
    ExternalProductPrice, LastPrice, PotentialProductMatch, Product, ProductBadge,
    ProductWebsite, ProductWebsiteWithPrice, ProductWithLastPrice, ProductWithPrice,
    ProductWithWebsite, ProductWithWebsitePrice, TrackedProduct, VariantAttribute, WebsitePrice,
};
pub use user::{LoggedUser, LoginResponse, User, VerifiedUser};
pub use website::{Website, WebsiteStat, WebsiteWithStat};

use std::hash::Hash;

/// Items addressable by a numeric or string id
pub trait HasId {
    /// Id type
    type Id: Eq + Hash + Clone;

    /// This item's id
    fn id(&self) -> Self::Id;
}

macro_rules! impl_has_id {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HasId for $ty {
                type Id = i64;

                fn id(&self) -> i64 {
                    self.id
                }
            }
        )*
    };
}

impl_has_id!(Category, Manufacturer, Website, Product, User, ExternalProduct);
