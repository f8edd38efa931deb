//! Order Repositories

mod items;
mod orders;

pub(crate) use self::items::PgOrderItemsRepository;
pub(crate) use self::orders::PgOrdersRepository;
