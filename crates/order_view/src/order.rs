use shared::domain::{Delivery, FieldValue, Item, Order, Payment};

use crate::markup::{Element, Node};

pub const ORDER_NOT_FOUND: &str = "<p>Order not found</p>";

const ITEM_COLUMNS: [&str; 5] = ["Name", "Brand", "Price", "Qty", "Total"];
/// Quantity has no backing field; every row shows one unit.
const ITEM_QUANTITY: &str = "1";

pub fn render_order(order: Option<&Order>) -> String {
    match order {
        Some(order) => order_card(order).render(),
        None => ORDER_NOT_FOUND.to_string(),
    }
}

pub fn order_card(order: &Order) -> Node {
    let no_delivery = Delivery::default();
    let no_payment = Payment::default();
    let delivery = order.delivery.as_ref().unwrap_or(&no_delivery);
    let payment = order.payment.as_ref().unwrap_or(&no_payment);

    Element::new("div")
        .class("card")
        .child(labelled("Order UID", &order.order_uid))
        .child(labelled("Track", &order.track_number))
        .child(labelled("Customer", &order.customer_id))
        .child(labelled("Date", &order.date_created))
        .child(Element::new("h4").text("Delivery"))
        .child(section().text(delivery_line(delivery)))
        .child(Element::new("h4").text("Payment"))
        .child(labelled_text(
            "Amount",
            format!("{} {}", payment.amount, payment.currency),
        ))
        .child(labelled("Bank", &payment.bank))
        .child(labelled("Provider", &payment.provider))
        .child(Element::new("h4").text("Items"))
        .child(items_table(&order.items))
        .into()
}

fn delivery_line(delivery: &Delivery) -> String {
    [
        &delivery.name,
        &delivery.city,
        &delivery.address,
        &delivery.region,
        &delivery.zip,
        &delivery.phone,
        &delivery.email,
    ]
    .map(ToString::to_string)
    .join(", ")
}

fn items_table(items: &[Item]) -> Element {
    let header = Element::new("tr")
        .children(ITEM_COLUMNS.map(|column| Element::new("th").text(column)));
    Element::new("table")
        .child(header)
        .children(items.iter().map(item_row))
}

fn item_row(item: &Item) -> Element {
    Element::new("tr")
        .child(cell(&item.name))
        .child(cell(&item.brand))
        .child(cell(&item.price))
        .child(Element::new("td").text(ITEM_QUANTITY))
        .child(cell(&item.total_price))
}

fn cell(value: &FieldValue) -> Element {
    Element::new("td").text(value.to_string())
}

fn section() -> Element {
    Element::new("div").class("section")
}

fn labelled(label: &str, value: &FieldValue) -> Element {
    labelled_text(label, value.to_string())
}

fn labelled_text(label: &str, value: String) -> Element {
    section()
        .child(Element::new("b").text(format!("{label}:")))
        .text(format!(" {value}"))
}
