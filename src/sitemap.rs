//! XML sitemap of all product pages

use crate::error::PagerError;
use crate::http::ApiClient;
use crate::models::Product;
use crate::pagination::{fetch_all_pages, DEFAULT_PAGE_LIMIT};
use crate::seo::{escape_html, SITE_URL};
use chrono::NaiveDate;
use std::fmt::Write as _;
use tracing::info;

/// Content type the sitemap is served with
pub const SITEMAP_CONTENT_TYPE: &str = "application/xml";

const URLSET_OPEN: &str = r#"<urlset
  xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
  xmlns:xhtml="http://www.w3.org/1999/xhtml"
  xmlns:mobile="http://www.google.com/schemas/sitemap-mobile/1.0"
  xmlns:news="http://www.google.com/schemas/sitemap-news/0.9"
  xmlns:image="http://www.google.com/schemas/sitemap-image/1.1"
  xmlns:video="http://www.google.com/schemas/sitemap-video/1.1">"#;

/// Render a sitemap with one entry per product under `base`
///
/// Entries change daily with priority 0.8. `lastmod`, when given, is
/// stamped on every entry.
pub fn render_sitemap(products: &[Product], base: &str, lastmod: Option<NaiveDate>) -> String {
    let base = base.trim_end_matches('/');

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n");
    xml.push_str(URLSET_OPEN);
    xml.push('\n');

    for product in products {
        xml.push_str("  <url>\n");
        let _ = writeln!(
            xml,
            "    <loc>{}</loc>",
            escape_html(&format!("{base}/products/{}", product.id))
        );
        if let Some(date) = lastmod {
            let _ = writeln!(xml, "    <lastmod>{}</lastmod>", date.format("%Y-%m-%d"));
        }
        xml.push_str("    <changefreq>daily</changefreq>\n");
        xml.push_str("    <priority>0.8</priority>\n");
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>");
    xml
}

/// Fetch every product and render the public sitemap
pub async fn build_sitemap(client: &ApiClient) -> Result<String, PagerError> {
    let products: Vec<Product> =
        fetch_all_pages(client, "/api/products", DEFAULT_PAGE_LIMIT).await?;
    info!("Building sitemap for {} products", products.len());

    let today = chrono::Utc::now().date_naive();
    Ok(render_sitemap(&products, SITE_URL, Some(today)))
}
