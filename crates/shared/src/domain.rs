use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ShapeError;

/// A displayed leaf: `None` when the key was absent, otherwise the raw JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValue(Option<Value>);

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => f.write_str("undefined"),
            Some(value) => write_coerced(f, value),
        }
    }
}

fn write_coerced(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(flag) => write!(f, "{flag}"),
        Value::Number(number) => {
            if number.is_i64() || number.is_u64() {
                return write!(f, "{number}");
            }
            match number.as_f64() {
                Some(float) => f.write_str(&script_number(float)),
                None => write!(f, "{number}"),
            }
        }
        Value::String(text) => f.write_str(text),
        Value::Array(elements) => {
            for (index, element) in elements.iter().enumerate() {
                if index > 0 {
                    f.write_str(",")?;
                }
                if !element.is_null() {
                    write_coerced(f, element)?;
                }
            }
            Ok(())
        }
        Value::Object(_) => f.write_str("[object Object]"),
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self(Some(value)))
    }
}

// Plain digits for decimal exponents in -7..21, `1e+21` style outside.
fn script_number(float: f64) -> String {
    if float == 0.0 {
        return "0".to_string();
    }
    let sign = if float < 0.0 { "-" } else { "" };
    let scientific = format!("{:e}", float.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (whole, fraction) = digits.split_at(n as usize);
        format!("{whole}.{fraction}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat(-n as usize))
    } else {
        let exp_sign = if n > 0 { '+' } else { '-' };
        let (lead, rest) = digits.split_at(1);
        let dot = if rest.is_empty() { "" } else { "." };
        format!("{lead}{dot}{rest}e{exp_sign}{}", (n - 1).abs())
    };
    format!("{sign}{body}")
}

pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn record_from_value<T>(value: Value) -> Option<T>
where
    T: DeserializeOwned + Default,
{
    if is_falsy(&value) {
        return None;
    }
    if !value.is_object() {
        return Some(T::default());
    }
    Some(serde_json::from_value(value).unwrap_or_default())
}

fn optional_record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Value::deserialize(deserializer).map(record_from_value)
}

fn item_list<'de, D>(deserializer: D) -> Result<Vec<Item>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(elements) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(elements
        .into_iter()
        .map(|element| {
            if element.is_object() {
                serde_json::from_value(element).unwrap_or_default()
            } else {
                Item::default()
            }
        })
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Delivery {
    pub name: FieldValue,
    pub city: FieldValue,
    pub address: FieldValue,
    pub region: FieldValue,
    pub zip: FieldValue,
    pub phone: FieldValue,
    pub email: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Payment {
    pub amount: FieldValue,
    pub currency: FieldValue,
    pub bank: FieldValue,
    pub provider: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Item {
    pub name: FieldValue,
    pub brand: FieldValue,
    pub price: FieldValue,
    pub total_price: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Order {
    pub order_uid: FieldValue,
    pub track_number: FieldValue,
    pub customer_id: FieldValue,
    pub date_created: FieldValue,
    #[serde(deserialize_with = "optional_record")]
    pub delivery: Option<Delivery>,
    #[serde(deserialize_with = "optional_record")]
    pub payment: Option<Payment>,
    #[serde(deserialize_with = "item_list")]
    pub items: Vec<Item>,
}

impl Order {
    pub fn from_json(document: Value) -> Option<Self> {
        record_from_value(document)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrderSummary {
    pub order_uid: FieldValue,
    pub customer_id: FieldValue,
    pub date_created: FieldValue,
    #[serde(deserialize_with = "optional_record")]
    pub delivery: Option<Delivery>,
    #[serde(deserialize_with = "optional_record")]
    pub payment: Option<Payment>,
}

impl OrderSummary {
    pub fn list_from_json(document: Value) -> Result<Vec<Self>, ShapeError> {
        match document {
            Value::Array(elements) => Ok(elements
                .into_iter()
                .map(|element| record_from_value(element).unwrap_or_default())
                .collect()),
            other if is_falsy(&other) => Ok(Vec::new()),
            other => Err(ShapeError::ExpectedArray {
                found: json_kind(&other),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn shown(value: Value) -> String {
        FieldValue(Some(value)).to_string()
    }

    #[test]
    fn coerces_leaves_like_script_strings() {
        assert_eq!(FieldValue::default().to_string(), "undefined");
        assert_eq!(shown(Value::Null), "null");
        assert_eq!(shown(json!(100)), "100");
        assert_eq!(shown(json!(100.0)), "100");
        assert_eq!(shown(json!(50.5)), "50.5");
        assert_eq!(shown(json!(true)), "true");
        assert_eq!(shown(json!([1, null, "a"])), "1,,a");
        assert_eq!(shown(json!({"a": 1})), "[object Object]");
    }

    #[test]
    fn numbers_use_script_spelling_at_the_edges() {
        assert_eq!(shown(json!(1e21)), "1e+21");
        assert_eq!(shown(json!(1.5e21)), "1.5e+21");
        assert_eq!(shown(json!(1e20)), "100000000000000000000");
        assert_eq!(shown(json!(1e-7)), "1e-7");
        assert_eq!(shown(json!(2.5e-8)), "2.5e-8");
        assert_eq!(shown(json!(1e-6)), "0.000001");
        assert_eq!(shown(json!(0.1)), "0.1");
        assert_eq!(shown(json!(-0.0)), "0");
        assert_eq!(shown(json!(-12.75)), "-12.75");
    }

    #[test]
    fn absent_key_differs_from_explicit_null() {
        let order = Order::from_json(json!({"order_uid": null})).expect("order");
        assert_eq!(order.order_uid.to_string(), "null");
        assert_eq!(order.track_number.to_string(), "undefined");
    }

    #[test]
    fn falsy_documents_mean_no_order() {
        for document in [json!(null), json!(false), json!(0), json!("")] {
            assert!(Order::from_json(document).is_none());
        }
    }

    #[test]
    fn malformed_groups_degrade_instead_of_failing() {
        let order = Order::from_json(json!({
            "order_uid": "u1",
            "delivery": "somewhere",
            "payment": null,
            "items": [{"name": "Widget", "price": "cheap"}, 7]
        }))
        .expect("order");

        assert_eq!(order.delivery, Some(Delivery::default()));
        assert!(order.payment.is_none());
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].price.to_string(), "cheap");
        assert_eq!(order.items[1], Item::default());
    }

    #[test]
    fn non_array_items_yield_no_rows() {
        let order = Order::from_json(json!({"items": {"name": "x"}})).expect("order");
        assert!(order.items.is_empty());
    }

    #[test]
    fn backend_only_fields_are_ignored() {
        let order = Order::from_json(json!({
            "order_uid": "u1",
            "entry": "WBIL",
            "locale": "en",
            "sm_id": 99
        }))
        .expect("order");
        assert_eq!(order.order_uid.to_string(), "u1");
    }

    #[test]
    fn order_list_accepts_arrays_and_falsy_documents() {
        let summaries = OrderSummary::list_from_json(json!([
            {"order_uid": "a", "delivery": {"city": "Moscow"}},
            {"order_uid": "b", "payment": {"amount": 5}}
        ]))
        .expect("list");
        assert_eq!(summaries.len(), 2);
        assert!(summaries[0].payment.is_none());
        assert!(summaries[1].delivery.is_none());

        assert!(OrderSummary::list_from_json(json!(null))
            .expect("null list")
            .is_empty());
    }

    #[test]
    fn order_list_rejects_objects() {
        let err = OrderSummary::list_from_json(json!({"order_uid": "a"})).expect_err("object");
        assert!(err.to_string().contains("object"));
    }
}
