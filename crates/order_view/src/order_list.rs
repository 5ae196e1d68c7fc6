use shared::domain::{FieldValue, OrderSummary};

use crate::markup::{Element, Node};

pub const NO_ORDERS: &str = "<p>No orders</p>";
pub const PLACEHOLDER: &str = "-";

const COLUMNS: [&str; 7] = [
    "Order UID",
    "Customer",
    "City",
    "Amount",
    "Bank",
    "Provider",
    "Created",
];

pub fn render_order_list(orders: Option<&[OrderSummary]>) -> String {
    match orders {
        Some(orders) if !orders.is_empty() => order_table(orders).render(),
        _ => NO_ORDERS.to_string(),
    }
}

pub fn order_table(orders: &[OrderSummary]) -> Node {
    let header = Element::new("tr").children(COLUMNS.map(|column| Element::new("th").text(column)));
    Element::new("table")
        .child(header)
        .children(orders.iter().map(summary_row))
        .into()
}

fn summary_row(order: &OrderSummary) -> Element {
    let city = order
        .delivery
        .as_ref()
        .map_or_else(placeholder, |delivery| delivery.city.to_string());
    let (amount, bank, provider) = match &order.payment {
        Some(payment) => (
            format!("{} {}", payment.amount, payment.currency),
            payment.bank.to_string(),
            payment.provider.to_string(),
        ),
        None => (placeholder(), placeholder(), placeholder()),
    };

    Element::new("tr")
        .child(Element::new("td").child(uid_link(&order.order_uid)))
        .child(cell(order.customer_id.to_string()))
        .child(cell(city))
        .child(cell(amount))
        .child(cell(bank))
        .child(cell(provider))
        .child(cell(order.date_created.to_string()))
}

fn uid_link(order_uid: &FieldValue) -> Element {
    let uid = order_uid.to_string();
    Element::new("a")
        .attr("href", "#")
        .attr("data-order-uid", uid.clone())
        .attr("onclick", format!("showOrder('{uid}'); return false;"))
        .text(uid)
}

fn cell(text: String) -> Element {
    Element::new("td").text(text)
}

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}
