//! Pricing

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    items::LineItem,
    products::{Product, ProductCatalog, ProductId},
};

/// Errors that can occur while pricing an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// An order needs at least one line item.
    #[error("an order needs at least one item")]
    NoItems,

    /// A line item asked for zero or fewer units.
    #[error("quantity {quantity} for product {product_id} must be positive")]
    NonPositiveQuantity {
        /// Offending product
        product_id: ProductId,

        /// Requested quantity
        quantity: i32,
    },

    /// Totals do not fit the monetary or count representation.
    #[error("order totals overflow")]
    Overflow,
}

/// A line item with the unit price snapshot it will be stored with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedItem {
    /// Product identifier
    pub product_id: ProductId,

    /// Number of units
    pub quantity: i32,

    /// Unit price at the time of pricing
    pub price: Decimal,
}

/// Result of pricing a set of line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedOrder {
    /// Sum of `price * quantity` across all items
    pub total_amount: Decimal,

    /// Sum of quantities across all items
    pub total_items: i32,

    /// Items with resolved prices, in request order
    pub items: Vec<PricedItem>,
}

/// Checks that `items` can form an order, before any product is looked up.
///
/// # Errors
///
/// - [`PricingError::NoItems`]: `items` is empty.
/// - [`PricingError::NonPositiveQuantity`]: an item has a quantity below one.
pub fn check_items(items: &[LineItem]) -> Result<(), PricingError> {
    if items.is_empty() {
        return Err(PricingError::NoItems);
    }

    match items.iter().find(|item| item.quantity <= 0) {
        Some(item) => Err(PricingError::NonPositiveQuantity {
            product_id: item.product_id,
            quantity: item.quantity,
        }),
        None => Ok(()),
    }
}

/// Prices `items` against the validated `products`.
///
/// Each item takes the unit price of the matching product. An item without a
/// matching product is priced at zero.
///
/// # Errors
///
/// - [`PricingError::NoItems`]: `items` is empty.
/// - [`PricingError::NonPositiveQuantity`]: an item has a quantity below one.
/// - [`PricingError::Overflow`]: a total does not fit its representation.
pub fn aggregate(items: &[LineItem], products: &[Product]) -> Result<PricedOrder, PricingError> {
    check_items(items)?;

    let catalog = ProductCatalog::new(products);

    let mut total_amount = Decimal::ZERO;
    let mut total_items: i32 = 0;
    let mut priced = Vec::with_capacity(items.len());

    for item in items {
        let price = catalog.price_of(item.product_id);

        let line_total = price
            .checked_mul(Decimal::from(item.quantity))
            .ok_or(PricingError::Overflow)?;

        total_amount = total_amount
            .checked_add(line_total)
            .ok_or(PricingError::Overflow)?;

        total_items = total_items
            .checked_add(item.quantity)
            .ok_or(PricingError::Overflow)?;

        priced.push(PricedItem {
            product_id: item.product_id,
            quantity: item.quantity,
            price,
        });
    }

    Ok(PricedOrder {
        total_amount,
        total_items,
        items: priced,
    })
}
