use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A catalog entry as seen by the matcher. Read-only for the duration of a call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub sku: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub order_count: u64,
    #[serde(default)]
    pub platforms: BTreeSet<String>,
}

impl ProductRecord {
    pub fn new(sku: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self { sku: sku.into(), product_name: product_name.into(), ..Self::default() }
    }

    pub fn with_order_count(mut self, order_count: u64) -> Self {
        self.order_count = order_count;
        self
    }

    pub fn with_platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platforms = platforms.into_iter().map(Into::into).collect();
        self
    }

    /// Upper-cased, trimmed SKU used for every identity comparison.
    pub fn normalized_sku(&self) -> String {
        normalize_sku(&self.sku)
    }
}

pub fn normalize_sku(sku: &str) -> String {
    sku.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::{normalize_sku, ProductRecord};

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let record: ProductRecord =
            serde_json::from_str(r#"{"sku":"GBC-HIO","productName":"Golf Ball Case"}"#)
                .expect("record should parse");

        assert_eq!(record.sku, "GBC-HIO");
        assert_eq!(record.product_name, "Golf Ball Case");
        assert_eq!(record.order_count, 0);
        assert!(record.platforms.is_empty());
    }

    #[test]
    fn normalization_trims_and_uppercases() {
        assert_eq!(normalize_sku("  gbc-hio-p "), "GBC-HIO-P");
        assert_eq!(ProductRecord::new(" tbc-eagle", "").normalized_sku(), "TBC-EAGLE");
    }
}
