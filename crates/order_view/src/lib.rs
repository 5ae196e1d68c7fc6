//! HTML fragments for the order service responses, serialized with [`markup::Verbatim`].

pub mod markup;
mod order;
mod order_list;

pub use order::{order_card, render_order, ORDER_NOT_FOUND};
pub use order_list::{order_table, render_order_list, NO_ORDERS, PLACEHOLDER};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
