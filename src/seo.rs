//! Page metadata for search engines and link previews
//!
//! [`generate_seo_tags`] renders the `<head>` fragment for a page;
//! the `*_structured_data` builders produce schema.org JSON-LD values.

use crate::loaders::Breadcrumb;
use crate::models::{Deal, Product};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::Write as _;

/// Public site name
pub const SITE_NAME: &str = "daam.deals";

/// Public site origin
pub const SITE_URL: &str = "https://daam.deals";

const REPOSITORY_URL: &str = "https://github.com/j-a-h-i-r/price-tracker-svelte";

/// Open Graph object type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OgType {
    #[default]
    Website,
    Article,
    Product,
}

impl OgType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Article => "article",
            Self::Product => "product",
        }
    }
}

/// Twitter card layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwitterCard {
    Summary,
    #[default]
    SummaryLargeImage,
    App,
    Player,
}

impl TwitterCard {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::SummaryLargeImage => "summary_large_image",
            Self::App => "app",
            Self::Player => "player",
        }
    }
}

/// Metadata of one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoConfig {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Option<String>,
    /// Absolute canonical URL; the site root when unset
    #[serde(default)]
    pub canonical: Option<String>,
    #[serde(default)]
    pub og_type: OgType,
    /// Preview image; the site icon when unset
    #[serde(default)]
    pub og_image: Option<String>,
    #[serde(default)]
    pub twitter_card: TwitterCard,
    /// JSON-LD embedded after the meta tags
    #[serde(default)]
    pub structured_data: Option<Value>,
}

impl SeoConfig {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn canonical(mut self, url: impl Into<String>) -> Self {
        self.canonical = Some(url.into());
        self
    }

    pub fn og_type(mut self, og_type: OgType) -> Self {
        self.og_type = og_type;
        self
    }

    pub fn og_image(mut self, url: impl Into<String>) -> Self {
        self.og_image = Some(url.into());
        self
    }

    pub fn twitter_card(mut self, card: TwitterCard) -> Self {
        self.twitter_card = card;
        self
    }

    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn structured_data(mut self, data: Value) -> Self {
        self.structured_data = Some(data);
        self
    }
}

/// Default preview image
pub fn default_image() -> String {
    format!("{SITE_URL}/favicon.svg")
}

/// Render title, description, Open Graph, Twitter and canonical tags
///
/// Text is HTML-escaped. Structured data, when set, is appended as a
/// pretty-printed JSON-LD script.
pub fn generate_seo_tags(config: &SeoConfig) -> String {
    let title = escape_html(&config.title);
    let description = escape_html(&config.description);
    let image = escape_html(&config.og_image.clone().unwrap_or_else(default_image));
    let url = escape_html(config.canonical.as_deref().unwrap_or(SITE_URL));

    let mut out = String::new();
    let _ = writeln!(out, "<title>{title} | {SITE_NAME}</title>");
    let _ = writeln!(out, r#"<meta name="description" content="{description}" />"#);
    if let Some(keywords) = &config.keywords {
        let _ = writeln!(
            out,
            r#"<meta name="keywords" content="{}" />"#,
            escape_html(keywords)
        );
    }

    out.push_str("\n<!-- Open Graph -->\n");
    let _ = writeln!(out, r#"<meta property="og:title" content="{title}" />"#);
    let _ = writeln!(out, r#"<meta property="og:description" content="{description}" />"#);
    let _ = writeln!(
        out,
        r#"<meta property="og:type" content="{}" />"#,
        config.og_type.as_str()
    );
    let _ = writeln!(out, r#"<meta property="og:site_name" content="{SITE_NAME}" />"#);
    let _ = writeln!(out, r#"<meta property="og:image" content="{image}" />"#);
    out.push_str("<meta property=\"og:image:width\" content=\"1200\" />\n");
    out.push_str("<meta property=\"og:image:height\" content=\"630\" />\n");
    let _ = writeln!(out, r#"<meta property="og:url" content="{url}" />"#);

    out.push_str("\n<!-- Twitter Card -->\n");
    let _ = writeln!(
        out,
        r#"<meta name="twitter:card" content="{}" />"#,
        config.twitter_card.as_str()
    );
    let _ = writeln!(out, r#"<meta name="twitter:title" content="{title}" />"#);
    let _ = writeln!(out, r#"<meta name="twitter:description" content="{description}" />"#);
    let _ = writeln!(out, r#"<meta name="twitter:image" content="{image}" />"#);

    out.push_str("\n<!-- Canonical URL -->\n");
    let _ = write!(out, r#"<link rel="canonical" href="{url}" />"#);

    if let Some(data) = &config.structured_data {
        out.push_str("\n\n<!-- Structured Data -->\n");
        out.push_str(&generate_ld_json(data));
    }

    out
}

/// Wrap a JSON-LD value in a script element
pub fn generate_ld_json(data: &Value) -> String {
    let body = serde_json::to_string_pretty(data).unwrap_or_else(|_| "null".to_string());
    // "</" would end the script element early
    format!(
        r#"<script type="application/ld+json">{}</script>"#,
        body.replace("</", "<\\/")
    )
}

/// schema.org `Product`
pub fn product_structured_data(product: &Product) -> Value {
    json!({
        "@context": "https://schema.org/",
        "@type": "Product",
        "name": product.name,
        "description": product.name,
        "sku": product.id.to_string(),
        "brand": {
            "@type": "Brand",
            "name": product.manufacturer_name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Unknown"),
        },
        "category": product.category_name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Uncategorized"),
    })
}

/// schema.org `WebSite` with a product search action
pub fn website_structured_data() -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": SITE_NAME,
        "alternateName": "Price Tracker Bangladesh",
        "url": SITE_URL,
        "description": "Track prices and find the best deals on products in Bangladesh",
        "potentialAction": {
            "@type": "SearchAction",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": format!("{SITE_URL}/products?q={{search_term_string}}"),
            },
            "query-input": "required name=search_term_string",
        },
        "sameAs": [REPOSITORY_URL],
    })
}

pub fn organization_structured_data() -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": SITE_NAME,
        "description": "Price tracking service for Bangladesh",
        "url": SITE_URL,
        "logo": format!("{SITE_URL}/favicon.png"),
        "contactPoint": {
            "@type": "ContactPoint",
            "contactType": "customer service",
            "url": SITE_URL,
        },
        "sameAs": [REPOSITORY_URL],
    })
}

/// schema.org `Offer` for a deal, priced in BDT
pub fn deal_structured_data(deal: &Deal) -> Value {
    json!({
        "@context": "https://schema.org/",
        "@type": "Offer",
        "name": format!("Deal on {}", deal.product_name),
        "description": format!("Great deal available on {}", deal.product_name),
        "price": deal.current_price,
        "priceCurrency": "BDT",
        "availability": "https://schema.org/InStock",
        "url": format!("{SITE_URL}/products/{}", deal.product_id),
        "seller": {
            "@type": "Organization",
            "name": deal.website_name,
        },
        "itemOffered": {
            "@type": "Product",
            "name": deal.product_name,
        },
    })
}

/// schema.org `BreadcrumbList`; site-relative links are made absolute
pub fn breadcrumb_structured_data(trail: &[Breadcrumb]) -> Value {
    let items: Vec<Value> = trail
        .iter()
        .enumerate()
        .map(|(index, crumb)| {
            let item = if crumb.url.starts_with('/') {
                format!("{SITE_URL}{}", crumb.url)
            } else {
                crumb.url.clone()
            };
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": crumb.path,
                "item": item,
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

/// A question and answer pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

pub fn faq_structured_data(faqs: &[Faq]) -> Value {
    let entities: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                },
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": entities,
    })
}

/// Escape text for use in element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn product() -> Product {
        Product {
            id: 42,
            name: "Galaxy A55".to_string(),
            category_id: Some(3),
            raw_metadata: HashMap::new(),
            parsed_metadata: HashMap::new(),
            manufacturer_name: Some("Samsung".to_string()),
            category_name: None,
        }
    }

    #[test]
    fn test_seo_tags_defaults() {
        let tags = generate_seo_tags(&SeoConfig::new("Deals", "Today's best prices"));

        assert!(tags.starts_with("<title>Deals | daam.deals</title>"));
        assert!(tags.contains(r#"<meta property="og:type" content="website" />"#));
        assert!(tags.contains(r#"<meta name="twitter:card" content="summary_large_image" />"#));
        assert!(tags.contains(r#"<meta property="og:image" content="https://daam.deals/favicon.svg" />"#));
        assert!(tags.contains(r#"<link rel="canonical" href="https://daam.deals" />"#));
        assert!(tags.contains("Today&#39;s best prices"));
        assert!(!tags.contains("ld+json"));
    }

    #[test]
    fn test_seo_tags_overrides_and_structured_data() {
        let config = SeoConfig::new("Galaxy <A55>", "Phone")
            .canonical("https://daam.deals/products/42")
            .og_type(OgType::Product)
            .og_image("https://cdn.example/a55.png")
            .twitter_card(TwitterCard::Summary)
            .keywords("phone, samsung")
            .structured_data(product_structured_data(&product()));

        let tags = generate_seo_tags(&config);

        assert!(tags.contains("<title>Galaxy &lt;A55&gt; | daam.deals</title>"));
        assert!(tags.contains(r#"content="product""#));
        assert!(tags.contains(r#"<meta name="twitter:card" content="summary" />"#));
        assert!(tags.contains(r#"<meta name="twitter:image" content="https://cdn.example/a55.png" />"#));
        assert!(tags.contains(r#"<meta property="og:url" content="https://daam.deals/products/42" />"#));
        assert!(tags.contains(r#"<meta name="keywords" content="phone, samsung" />"#));
        assert!(tags.contains(r#"<script type="application/ld+json">"#));
    }

    #[test]
    fn test_ld_json_escapes_script_end() {
        let html = generate_ld_json(&json!({"name": "</script><b>"}));
        assert!(!html.contains("</script><b>"));
        assert!(html.ends_with("</script>"));
    }

    #[test]
    fn test_product_structured_data() {
        let data = product_structured_data(&product());
        assert_eq!(data["sku"], "42");
        assert_eq!(data["brand"]["name"], "Samsung");
        assert_eq!(data["category"], "Uncategorized");
    }

    #[test]
    fn test_deal_structured_data() {
        let deal = Deal {
            product_id: 9,
            product_name: "Router".to_string(),
            product_url: "https://shop.com/router".to_string(),
            website_name: "Shop".to_string(),
            current_price: 2500.0,
            max_price_last_days: 3000.0,
            current_price_date: "2024-05-01".to_string(),
            is_available: true,
            category_id: None,
            manufacturer_id: None,
        };

        let data = deal_structured_data(&deal);
        assert_eq!(data["@type"], "Offer");
        assert_eq!(data["priceCurrency"], "BDT");
        assert_eq!(data["url"], "https://daam.deals/products/9");
        assert_eq!(data["seller"]["name"], "Shop");
    }

    #[test]
    fn test_site_structured_data() {
        let site = website_structured_data();
        assert_eq!(
            site["potentialAction"]["target"]["urlTemplate"],
            "https://daam.deals/products?q={search_term_string}"
        );
        assert_eq!(organization_structured_data()["logo"], "https://daam.deals/favicon.png");
    }

    #[test]
    fn test_breadcrumb_structured_data() {
        let trail = vec![
            Breadcrumb::new("URL Lookup", "/url"),
            Breadcrumb::new("Elsewhere", "https://other.example/x"),
        ];
        let data = breadcrumb_structured_data(&trail);
        let items = data["itemListElement"].as_array().unwrap();

        assert_eq!(items[0]["position"], 1);
        assert_eq!(items[0]["item"], "https://daam.deals/url");
        assert_eq!(items[1]["position"], 2);
        assert_eq!(items[1]["item"], "https://other.example/x");
    }

    #[test]
    fn test_faq_structured_data() {
        let faqs = vec![Faq {
            question: "How often are prices updated?".to_string(),
            answer: "Daily.".to_string(),
        }];
        let data = faq_structured_data(&faqs);
        assert_eq!(data["mainEntity"][0]["acceptedAnswer"]["text"], "Daily.");
    }
}
