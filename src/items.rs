//! Line Items

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::products::ProductId;

/// Distinct product identifiers, in first-seen order.
pub type ProductIds = SmallVec<[ProductId; 8]>;

/// One requested (product, quantity) pair within an order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Identifier of a product owned by the remote product service.
    pub product_id: ProductId,

    /// Number of units requested. Only positive values are priced.
    pub quantity: i32,
}

impl LineItem {
    /// Creates a new line item.
    pub fn new(product_id: ProductId, quantity: i32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// Collects the distinct product identifiers referenced by `product_ids`.
///
/// Duplicates are dropped; the first occurrence decides the position.
pub fn distinct_product_ids<I>(product_ids: I) -> ProductIds
where
    I: IntoIterator<Item = ProductId>,
{
    let mut distinct = ProductIds::new();

    for product_id in product_ids {
        if !distinct.contains(&product_id) {
            distinct.push(product_id);
        }
    }

    distinct
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_product_ids_keeps_first_seen_order() {
        let items = [
            LineItem::new(3, 1),
            LineItem::new(1, 2),
            LineItem::new(3, 5),
            LineItem::new(2, 1),
        ];

        let ids = distinct_product_ids(items.iter().map(|item| item.product_id));

        assert_eq!(ids.as_slice(), &[3, 1, 2]);
    }

    #[test]
    fn test_distinct_product_ids_empty() {
        let ids = distinct_product_ids(std::iter::empty());

        assert!(ids.is_empty());
    }

    #[test]
    fn test_line_item_uses_camel_case_fields() -> testresult::TestResult {
        let item: LineItem = serde_json::from_str(r#"{"productId":7,"quantity":2}"#)?;

        assert_eq!(item, LineItem::new(7, 2));

        Ok(())
    }
}
