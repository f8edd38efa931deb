//! Products

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Product identifier, owned by the remote product service.
pub type ProductId = i32;

/// Name reported for an item whose product is absent from the catalog.
pub const UNKNOWN_PRODUCT_NAME: &str = "Name not available";

/// Product, as returned by the remote product service.
///
/// This is a transient read model: only the price and name are ever
/// copied into an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Current unit price
    pub price: Decimal,

    /// Whether the product can currently be ordered
    pub available: bool,

    /// Creation time reported by the product service
    #[serde(default)]
    pub created_at: Option<Timestamp>,

    /// Last update time reported by the product service
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Lookup of validated products by identifier.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog<'a> {
    products: FxHashMap<ProductId, &'a Product>,
}

impl<'a> ProductCatalog<'a> {
    /// Index the given products. Later duplicates replace earlier ones.
    pub fn new(products: &'a [Product]) -> Self {
        let products = products
            .iter()
            .map(|product| (product.id, product))
            .collect();

        Self { products }
    }

    /// Returns the product with the given identifier, if present.
    pub fn get(&self, product_id: ProductId) -> Option<&'a Product> {
        self.products.get(&product_id).copied()
    }

    /// Returns `true` when the catalog holds the given product.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.products.contains_key(&product_id)
    }

    /// Unit price of the product, or zero when it is not in the catalog.
    pub fn price_of(&self, product_id: ProductId) -> Decimal {
        self.get(product_id)
            .map_or(Decimal::ZERO, |product| product.price)
    }

    /// Display name of the product, or [`UNKNOWN_PRODUCT_NAME`].
    pub fn name_of(&self, product_id: ProductId) -> &'a str {
        self.get(product_id)
            .map_or(UNKNOWN_PRODUCT_NAME, |product| product.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;

    use super::*;

    fn product(id: ProductId, name: &str, price: Decimal) -> Product {
        Product {
            id,
            name: name.to_string(),
            price,
            available: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_catalog_resolves_price_and_name() {
        let products = [product(1, "Keyboard", dec!(10.00))];
        let catalog = ProductCatalog::new(&products);

        assert_eq!(catalog.price_of(1), dec!(10.00));
        assert_eq!(catalog.name_of(1), "Keyboard");
    }

    #[test]
    fn test_catalog_falls_back_for_unknown_product() {
        let catalog = ProductCatalog::new(&[]);

        assert_eq!(catalog.price_of(42), Decimal::ZERO);
        assert_eq!(catalog.name_of(42), UNKNOWN_PRODUCT_NAME);
        assert!(!catalog.contains(42));
    }

    #[test]
    fn test_product_decodes_service_reply() -> TestResult {
        let product: Product = serde_json::from_str(
            r#"{
                "id": 5,
                "name": "Mouse",
                "price": 19.99,
                "available": true,
                "createdAt": "2024-05-01T10:00:00Z",
                "updatedAt": "2024-05-02T10:00:00Z"
            }"#,
        )?;

        assert_eq!(product.id, 5);
        assert_eq!(product.price, dec!(19.99));
        assert!(product.created_at.is_some());

        Ok(())
    }
}
