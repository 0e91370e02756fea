//! Formatting and collection helpers

use crate::models::HasId;
use std::collections::HashMap;

/// Currency symbol for Bangladeshi taka
pub const TAKA_SYMBOL: &str = "৳";

/// Format a price in taka with Indian digit grouping
///
/// `123456.5` → `৳1,23,456.5`. At most two fraction digits are shown and
/// trailing zeros are dropped.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return format!("{TAKA_SYMBOL}{price}");
    }

    let cents = (price.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let mut out = String::new();
    if price < 0.0 && cents > 0 {
        out.push('-');
    }
    out.push_str(TAKA_SYMBOL);
    out.push_str(&group_indian(whole));

    if fraction > 0 {
        let digits = format!("{fraction:02}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// Group digits as 12,34,567 (last three, then pairs)
fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Index items by id; later duplicates replace earlier ones
pub fn array_to_per_id_map<T: HasId + Clone>(items: &[T]) -> HashMap<T::Id, T> {
    items
        .iter()
        .map(|item| (item.id(), item.clone()))
        .collect()
}

/// Percent-encode a single path or query component
///
/// Everything except `A-Z a-z 0-9 - _ . ~` is encoded.
pub fn encode_uri_component(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Decode a percent-encoded component; `None` when the bytes are not UTF-8
pub fn decode_uri_component(input: &str) -> Option<String> {
    urlencoding::decode(input).ok().map(std::borrow::Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use test_case::test_case;

    #[test_case(0.0, "৳0" ; "zero")]
    #[test_case(999.0, "৳999" ; "below grouping")]
    #[test_case(1000.0, "৳1,000" ; "thousand")]
    #[test_case(123456.0, "৳1,23,456" ; "lakh grouping")]
    #[test_case(12345678.9, "৳1,23,45,678.9" ; "crore with fraction")]
    #[test_case(1499.999, "৳1,500" ; "rounds up")]
    #[test_case(10.05, "৳10.05" ; "two fraction digits")]
    #[test_case(-2500.5, "-৳2,500.5" ; "negative")]
    fn test_format_price(price: f64, expected: &str) {
        assert_eq!(format_price(price), expected);
    }

    #[test]
    fn test_array_to_per_id_map() {
        let categories = vec![
            Category {
                id: 1,
                name: "Laptops".to_string(),
            },
            Category {
                id: 2,
                name: "Phones".to_string(),
            },
        ];

        let map = array_to_per_id_map(&categories);
        assert_eq!(map.len(), 2);
        assert_eq!(map[&2].name, "Phones");
    }

    #[test_case("Screen Size", "Screen%20Size" ; "space")]
    #[test_case("a/b?c", "a%2Fb%3Fc" ; "reserved characters")]
    #[test_case("ram_(gb)", "ram_%28gb%29" ; "parentheses")]
    #[test_case("ওজন", "%E0%A6%93%E0%A6%9C%E0%A6%A8" ; "multibyte")]
    fn test_encode_uri_component(input: &str, expected: &str) {
        assert_eq!(encode_uri_component(input), expected);
    }

    #[test_case("https%3A%2F%2Fshop.com%2Fp%2F1", Some("https://shop.com/p/1") ; "encoded url")]
    #[test_case("plain", Some("plain") ; "nothing to decode")]
    #[test_case("a+b", Some("a+b") ; "plus kept")]
    #[test_case("%FF", None ; "invalid utf8")]
    fn test_decode_uri_component(input: &str, expected: Option<&str>) {
        assert_eq!(decode_uri_component(input).as_deref(), expected);
    }
}
