//! Filter bar component types.
//!
//! A filter bar is a GET form above a listing. Each field carries its current
//! value so the bar re-renders with the operator's selection intact.

use crate::models::ProductQuery;
use crate::models::product::{CATEGORIES, CONDITIONS};

/// Input type of a filter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Free text input.
    Text,
    /// Single-select dropdown with an "Any" entry.
    Select,
    /// Numeric input.
    Number,
}

/// Option for select filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl FilterOption {
    /// Options whose value doubles as label, with `current` pre-selected.
    #[must_use]
    pub fn list<S: AsRef<str>>(values: &[S], current: &str) -> Vec<Self> {
        values
            .iter()
            .map(|value| Self {
                value: value.as_ref().to_string(),
                label: value.as_ref().to_string(),
                selected: value.as_ref() == current,
            })
            .collect()
    }
}

/// One field of a filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterField {
    /// Query parameter name.
    pub key: String,
    pub label: String,
    pub kind: FilterKind,
    pub placeholder: String,
    /// Options for [`FilterKind::Select`].
    pub options: Vec<FilterOption>,
    /// Current value, empty when unset.
    pub value: String,
}

impl FilterField {
    /// Create a text filter.
    #[must_use]
    pub fn text(key: &str, label: &str, placeholder: &str, value: Option<&str>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: FilterKind::Text,
            placeholder: placeholder.to_string(),
            options: vec![],
            value: value.unwrap_or_default().to_string(),
        }
    }

    /// Create a numeric filter.
    #[must_use]
    pub fn number(key: &str, label: &str, value: Option<&str>) -> Self {
        Self {
            kind: FilterKind::Number,
            ..Self::text(key, label, "", value)
        }
    }

    /// Create a select filter. The option matching `value` is pre-selected.
    #[must_use]
    pub fn select<'a>(
        key: &str,
        label: &str,
        options: impl IntoIterator<Item = (&'a str, &'a str)>,
        value: Option<&str>,
    ) -> Self {
        let current = value.unwrap_or_default();
        Self {
            kind: FilterKind::Select,
            options: options
                .into_iter()
                .map(|(value, label)| FilterOption {
                    value: value.to_string(),
                    label: label.to_string(),
                    selected: value == current,
                })
                .collect(),
            ..Self::text(key, label, "", value)
        }
    }

    #[must_use]
    pub fn is_select(&self) -> bool {
        self.kind == FilterKind::Select
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        self.kind == FilterKind::Number
    }
}

/// Configuration for a filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBar {
    /// Where the form submits (GET).
    pub action: String,
    pub fields: Vec<FilterField>,
    /// Page size, carried as a hidden field.
    pub limit: u32,
    /// Whether any filter is set, to offer a "Clear" link.
    pub is_filtered: bool,
}

/// Sort keys offered for products.
pub const PRODUCT_SORTS: &[(&str, &str)] = &[
    ("newest", "Newest first"),
    ("price_asc", "Price: low to high"),
    ("price_desc", "Price: high to low"),
    ("title_asc", "Title: A to Z"),
];

/// Build the product listing's filter bar from the current query.
///
/// `brands` feeds the brand dropdown; when it is empty (brands could not be
/// loaded) the brand filter falls back to free text.
#[must_use]
pub fn product_filter_bar(query: &ProductQuery, limit: u32, brands: &[String]) -> FilterBar {
    let brand = if brands.is_empty() {
        FilterField::text("brand", "Brand", "Any brand", query.brand.as_deref())
    } else {
        FilterField::select(
            "brand",
            "Brand",
            brands.iter().map(|b| (b.as_str(), b.as_str())),
            query.brand.as_deref(),
        )
    };

    let fields = vec![
        FilterField::text(
            "search",
            "Search",
            "Search title or description...",
            query.search.as_deref(),
        ),
        FilterField::select(
            "category",
            "Category",
            CATEGORIES.iter().map(|c| (*c, *c)),
            query.category.as_deref(),
        ),
        brand,
        FilterField::select(
            "condition",
            "Condition",
            CONDITIONS.iter().map(|c| (*c, *c)),
            query.condition.as_deref(),
        ),
        FilterField::text("status", "Status", "Any status", query.status.as_deref()),
        FilterField::number("minPrice", "Min price", query.min_price.as_deref()),
        FilterField::number("maxPrice", "Max price", query.max_price.as_deref()),
        FilterField::select(
            "sort",
            "Sort by",
            PRODUCT_SORTS.iter().copied(),
            query.sort.as_deref(),
        ),
    ];

    let is_filtered = fields.iter().any(|f| !f.value.trim().is_empty());

    FilterBar {
        action: "/products".to_string(),
        fields,
        limit,
        is_filtered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_values_are_kept() {
        let query = ProductQuery {
            category: Some("Pumps".to_string()),
            min_price: Some("25".to_string()),
            ..ProductQuery::default()
        };
        let bar = product_filter_bar(&query, 20, &[]);

        let category = bar.fields.iter().find(|f| f.key == "category").unwrap();
        assert!(category.is_select());
        assert!(category.options.iter().any(|o| o.value == "Pumps" && o.selected));
        assert_eq!(
            category.options.iter().filter(|o| o.selected).count(),
            1
        );

        let min = bar.fields.iter().find(|f| f.key == "minPrice").unwrap();
        assert!(min.is_number());
        assert_eq!(min.value, "25");
        assert!(bar.is_filtered);
    }

    #[test]
    fn test_brand_dropdown_needs_brands() {
        let bar = product_filter_bar(&ProductQuery::default(), 20, &[]);
        let brand = bar.fields.iter().find(|f| f.key == "brand").unwrap();
        assert_eq!(brand.kind, FilterKind::Text);
        assert!(!bar.is_filtered);

        let brands = vec!["Yamaha".to_string(), "Garmin".to_string()];
        let bar = product_filter_bar(&ProductQuery::default(), 20, &brands);
        let brand = bar.fields.iter().find(|f| f.key == "brand").unwrap();
        assert!(brand.is_select());
        assert_eq!(brand.options.len(), 2);
    }
}
