//! Product records as exchanged with the products backend.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};

use bluewater_core::{
    Pagination, ProductId,
    serde_helpers::{lenient_i64, lenient_string, null_as_default},
};

/// Conditions offered in the product form.
pub const CONDITIONS: &[&str] = &["New", "Refurbished"];

/// Categories offered in the product form and filter bar.
pub const CATEGORIES: &[&str] = &[
    "Engines",
    "Electronics",
    "Navigation",
    "Pumps",
    "Safety",
    "Deck Hardware",
    "Electrical",
    "Plumbing",
];

/// A product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub currency: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub condition: String,
    /// Badge colour class chosen from the condition.
    #[serde(default, deserialize_with = "lenient_string")]
    pub status_color: String,
}

impl Product {
    /// Price formatted with its currency, or `-` when unset.
    #[must_use]
    pub fn display_price(&self) -> String {
        match self.price {
            Some(price) => {
                let currency = if self.currency.is_empty() {
                    "USD"
                } else {
                    self.currency.as_str()
                };
                format!("{currency} {:.2}", price.round_dp(2))
            }
            None => "-".to_string(),
        }
    }

    /// First image, used as the listing thumbnail.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Body sent on create and update. Carries no `id`: the backend takes it
/// from the URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub title: String,
    pub brand: String,
    pub category: String,
    pub price: Decimal,
    pub currency: String,
    pub description: String,
    pub images: Vec<String>,
    pub quantity: i64,
    pub condition: String,
    pub status_color: String,
}

/// Badge colour class for a condition.
#[must_use]
pub fn status_color_for(condition: &str) -> &'static str {
    if condition == "New" {
        "bg-accent"
    } else {
        "bg-success"
    }
}

/// One page of the product listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Product>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pagination: Pagination,
}

/// Envelope of `GET /{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductEnvelope {
    pub product: Product,
}

/// Server-side filters for the product listing.
///
/// Serialized straight into the query string; empty values are omitted so the
/// backend only sees the filters the operator actually set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub min_price: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub max_price: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub sort: Option<String>,
}

impl ProductQuery {
    /// The same filters pointed at another page.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: Some(page),
            ..self.clone()
        }
    }

    /// Encode as a query string (without the leading `?`) for pager links.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if let Some(page) = self.page {
            serializer.append_pair("page", &page.to_string());
        }
        if let Some(limit) = self.limit {
            serializer.append_pair("limit", &limit.to_string());
        }
        let text_filters = [
            ("search", &self.search),
            ("category", &self.category),
            ("brand", &self.brand),
            ("condition", &self.condition),
            ("status", &self.status),
            ("minPrice", &self.min_price),
            ("maxPrice", &self.max_price),
            ("sort", &self.sort),
        ];
        for (key, value) in text_filters {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

#[allow(clippy::ref_option)]
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Accept a decimal as a JSON number, a numeric string, an empty string or `null`.
fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) if s.trim().is_empty() => return Ok(None),
        serde_json::Value::String(s) => s.trim().to_string(),
        _ => return Err(de::Error::custom("price must be a number or a string")),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Some)
        .map_err(|_| de::Error::custom(format!("invalid price: {text}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_loose_payload() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": 7,
                "title": "Bilge Pump 1100",
                "brand": "Rule",
                "category": "Pumps",
                "price": 89.5,
                "currency": "USD",
                "images": null,
                "quantity": "4",
                "condition": "New",
                "statusColor": "bg-accent"
            }"#,
        )
        .unwrap();
        assert_eq!(product.id.as_str(), "7");
        assert_eq!(product.price, Some(Decimal::new(895, 1)));
        assert!(product.images.is_empty());
        assert_eq!(product.quantity, 4);
        assert_eq!(product.display_price(), "USD 89.50");
    }

    #[test]
    fn test_price_as_string_or_blank() {
        let product: Product =
            serde_json::from_str(r#"{"id": "p1", "price": "1250.00"}"#).unwrap();
        assert_eq!(product.price, Some(Decimal::new(125_000, 2)));

        let product: Product = serde_json::from_str(r#"{"id": "p1", "price": ""}"#).unwrap();
        assert_eq!(product.price, None);
        assert_eq!(product.display_price(), "-");
    }

    #[test]
    fn test_input_has_no_id() {
        let input = ProductInput {
            title: "VHF Radio".to_string(),
            brand: "Standard Horizon".to_string(),
            category: "Electronics".to_string(),
            price: Decimal::new(19999, 2),
            currency: "USD".to_string(),
            description: String::new(),
            images: vec![],
            quantity: 2,
            condition: "New".to_string(),
            status_color: "bg-accent".to_string(),
        };
        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["statusColor"], "bg-accent");
        assert_eq!(json["price"], "199.99");
    }

    #[test]
    fn test_query_string_skips_blank_filters() {
        let query = ProductQuery {
            page: Some(2),
            limit: Some(20),
            search: Some("pump".to_string()),
            brand: Some("   ".to_string()),
            min_price: Some("10".to_string()),
            ..ProductQuery::default()
        };
        assert_eq!(
            query.to_query_string(),
            "page=2&limit=20&search=pump&minPrice=10"
        );
        assert_eq!(query.with_page(3).page, Some(3));
    }

    #[test]
    fn test_page_defaults_when_fields_missing() {
        let page: ProductPage = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn test_status_color_follows_condition() {
        assert_eq!(status_color_for("New"), "bg-accent");
        assert_eq!(status_color_for("Refurbished"), "bg-success");
    }
}
