//! Brands and their FAQ lists.

use serde::{Deserialize, Serialize};

use bluewater_core::{
    BrandId,
    serde_helpers::{lenient_string, null_as_default},
};

/// A product brand or manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: BrandId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub logo_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub faq: Vec<String>,
}

/// Body sent on brand create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandInput {
    pub name: String,
    pub description: String,
    pub logo_url: String,
    pub faq: Vec<String>,
}

/// Envelope of the brand listing.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct BrandList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub brands: Vec<Brand>,
}

/// Ordered FAQ entries being edited before submission.
///
/// The list round-trips through the brand form as one entry per line, so
/// entries never contain newlines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqList(Vec<String>);

impl FaqList {
    /// Rebuild the list from its form encoding, dropping blank lines.
    #[must_use]
    pub fn from_lines(text: &str) -> Self {
        Self(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Append an entry. Input is trimmed and line breaks are folded into
    /// spaces; blank input is ignored.
    ///
    /// Returns whether an entry was added.
    pub fn add(&mut self, entry: &str) -> bool {
        let entry = entry.split_whitespace().collect::<Vec<_>>().join(" ");
        if entry.is_empty() {
            return false;
        }
        self.0.push(entry);
        true
    }

    /// Remove the entry at `index`. Out-of-range indexes are ignored.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    /// The form encoding: one entry per line.
    #[must_use]
    pub fn to_lines(&self) -> String {
        self.0.join("\n")
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for FaqList {
    fn from(entries: Vec<String>) -> Self {
        let mut list = Self::default();
        for entry in &entries {
            list.add(entry);
        }
        list
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_rejects_blank() {
        let mut faq = FaqList::default();
        assert!(faq.add("  Do you ship overseas?  "));
        assert!(!faq.add("   "));
        assert!(!faq.add(""));
        assert_eq!(faq.entries(), ["Do you ship overseas?"]);
    }

    #[test]
    fn test_remove_by_index() {
        let mut faq = FaqList::from(vec![
            "Warranty?".to_string(),
            "Lead time?".to_string(),
            "Returns?".to_string(),
        ]);
        assert_eq!(faq.remove(1).as_deref(), Some("Lead time?"));
        assert_eq!(faq.entries(), ["Warranty?", "Returns?"]);
        assert_eq!(faq.remove(9), None);
        assert_eq!(faq.entries().len(), 2);
    }

    #[test]
    fn test_lines_round_trip_keeps_order() {
        let faq = FaqList::from_lines("First\n\n  Second \nThird");
        assert_eq!(faq.entries(), ["First", "Second", "Third"]);
        assert_eq!(FaqList::from_lines(&faq.to_lines()), faq);
    }

    #[test]
    fn test_brand_with_null_faq() {
        let brand: Brand =
            serde_json::from_str(r#"{"id": 3, "name": "Yamaha", "logoUrl": null, "faq": null}"#)
                .unwrap();
        assert_eq!(brand.id.as_str(), "3");
        assert!(brand.logo_url.is_empty());
        assert!(brand.faq.is_empty());
    }
}
