//! Orders prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    items::{LineItem, ProductIds, distinct_product_ids},
    pagination::{Page, PageMeta, Pagination, PaginationError},
    pricing::{PricedItem, PricedOrder, PricingError, aggregate, check_items},
    products::{Product, ProductCatalog, ProductId, UNKNOWN_PRODUCT_NAME},
    status::{
        AnyTransition, OrderStatus, OrderStatuses, StatusError, TerminalStatuses,
        TransitionPolicy,
    },
};
