use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    #[serde(rename = "desc")]
    pub description: Option<String>,
    pub price: i64,
    pub guru_info: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub product_type: String,
    pub related_stock: Option<String>,
    pub expected_return: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
}

/// Row about to be inserted; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub price: i64,
    pub guru_info: Option<String>,
    pub product_type: String,
    pub related_stock: Option<String>,
    pub expected_return: Option<String>,
}

/// Partial-update body. Merge policy: a field overwrites the stored value
/// only when it is supplied as a non-empty string (or, for `price`, a
/// positive integer). Absent, empty, and zero values are per-field no-ops.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(rename = "desc")]
    pub description: Option<String>,
    pub price: Option<i64>,
    pub guru_info: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub related_stock: Option<String>,
    pub expected_return: Option<String>,
}

impl ProductPatch {
    pub fn apply(self, product: &mut Product) {
        merge_required(&mut product.title, self.title);
        merge_optional(&mut product.subtitle, self.subtitle);
        merge_optional(&mut product.description, self.description);
        if let Some(price) = self.price {
            if price > 0 {
                product.price = price;
            }
        }
        merge_optional(&mut product.guru_info, self.guru_info);
        merge_required(&mut product.product_type, self.product_type);
        merge_optional(&mut product.related_stock, self.related_stock);
        merge_optional(&mut product.expected_return, self.expected_return);
    }
}

pub(crate) fn merge_required(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            *target = value;
        }
    }
}

pub(crate) fn merge_optional(target: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            *target = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: 1,
            title: "AOT".into(),
            subtitle: Some("Advance of Titan".into()),
            description: None,
            price: 1500,
            guru_info: None,
            product_type: "stock".into(),
            related_stock: None,
            expected_return: Some("10%".into()),
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
            deleted_at: None,
        }
    }

    #[test]
    fn patch_overwrites_only_supplied_fields() {
        let mut p = product();
        ProductPatch {
            title: Some("AOT v2".into()),
            ..Default::default()
        }
        .apply(&mut p);
        assert_eq!(p.title, "AOT v2");
        assert_eq!(p.price, 1500);
        assert_eq!(p.product_type, "stock");
        assert_eq!(p.subtitle.as_deref(), Some("Advance of Titan"));
    }

    #[test]
    fn patch_skips_empty_and_zero_values() {
        let mut p = product();
        ProductPatch {
            title: Some(String::new()),
            price: Some(0),
            expected_return: Some(String::new()),
            ..Default::default()
        }
        .apply(&mut p);
        assert_eq!(p.title, "AOT");
        assert_eq!(p.price, 1500);
        assert_eq!(p.expected_return.as_deref(), Some("10%"));
    }

    #[test]
    fn patch_can_fill_previously_unset_fields() {
        let mut p = product();
        ProductPatch {
            guru_info: Some("buy the dip".into()),
            price: Some(2000),
            ..Default::default()
        }
        .apply(&mut p);
        assert_eq!(p.guru_info.as_deref(), Some("buy the dip"));
        assert_eq!(p.price, 2000);
    }
}
