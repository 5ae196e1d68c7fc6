use order_view::{render_order, render_order_list};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use shared::{
    domain::{Order, OrderSummary},
    protocol::ApiRoute,
};
use tracing::{debug, warn};

pub mod error;
pub mod page;

pub use error::FlowError;
pub use page::{Content, InputField, MemoryPage, Page, Region};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    ShortCircuited,
    Rendered,
    ErrorDisplayed,
}

/// Drives the three order flows against one backend, writing results into a [`Page`].
///
/// Every flow clears its region first, so a stale result is never visible while
/// a request is pending. Overlapping invocations of the same flow are not
/// serialized: whichever response completes last owns the region.
pub struct OrderConsole<P: Page> {
    http: Client,
    api_base: String,
    page: P,
}

impl<P: Page> OrderConsole<P> {
    pub fn new(api_base: impl Into<String>, page: P) -> Self {
        Self::with_client(Client::new(), api_base, page)
    }

    pub fn with_client(http: Client, api_base: impl Into<String>, page: P) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            http,
            api_base,
            page,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub async fn get_order(&self) -> FlowOutcome {
        self.page.write_content(Region::Order, Content::Empty);
        let result = self.fetch_order().await;
        self.finish("get_order", Region::Order, result)
    }

    pub async fn get_orders(&self) -> FlowOutcome {
        self.page.write_content(Region::OrderList, Content::Empty);
        let result = self.fetch_orders().await;
        self.finish("get_orders", Region::OrderList, result)
    }

    pub async fn publish_order(&self) -> FlowOutcome {
        self.page.write_content(Region::Publish, Content::Empty);
        let result = self.send_order().await;
        self.finish("publish_order", Region::Publish, result)
    }

    pub async fn show_order(&self, order_uid: &str) -> FlowOutcome {
        self.page.fill_field(InputField::OrderUid, order_uid);
        let outcome = self.get_order().await;
        self.page.reveal(Region::Order);
        outcome
    }

    async fn fetch_order(&self) -> Result<Content, FlowError> {
        let input = self.page.read_text(InputField::OrderUid);
        let order_uid = input.trim();
        if order_uid.is_empty() {
            return Err(FlowError::MissingOrderUid);
        }

        let route = ApiRoute::Order { order_uid };
        let document = self
            .exchange(route, self.http.get(route.url(&self.api_base)))
            .await?;
        let order = Order::from_json(document);
        Ok(Content::Html(render_order(order.as_ref())))
    }

    async fn fetch_orders(&self) -> Result<Content, FlowError> {
        let route = ApiRoute::Orders;
        let document = self
            .exchange(route, self.http.get(route.url(&self.api_base)))
            .await?;
        let orders = OrderSummary::list_from_json(document)?;
        Ok(Content::Html(render_order_list(Some(orders.as_slice()))))
    }

    async fn send_order(&self) -> Result<Content, FlowError> {
        let input = self.page.read_text(InputField::OrderJson);
        let raw = input.trim();
        if raw.is_empty() {
            return Err(FlowError::MissingJson);
        }
        let payload: Value = serde_json::from_str(raw).map_err(FlowError::InvalidJson)?;
        let payload = normalize_numbers(payload);

        let route = ApiRoute::PublishOrder;
        let request = self.http.post(route.url(&self.api_base)).json(&payload);
        let ack = normalize_numbers(self.exchange(route, request).await?);
        // A `Value` has string keys only, so serializing it cannot fail.
        let pretty = serde_json::to_string_pretty(&ack).unwrap_or_else(|_| ack.to_string());
        Ok(Content::Text(pretty))
    }

    async fn exchange(
        &self,
        route: ApiRoute<'_>,
        request: RequestBuilder,
    ) -> Result<Value, FlowError> {
        debug!(%route, api_base = %self.api_base, "sending order service request");
        let response = request.send().await?;
        let status = response.status();
        debug!(%route, status = status.as_u16(), "order service responded");

        if !status.is_success() {
            let body = response.text().await?;
            return Err(FlowError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        parse_document(&body)
    }

    fn finish(
        &self,
        flow: &'static str,
        region: Region,
        result: Result<Content, FlowError>,
    ) -> FlowOutcome {
        match result {
            Ok(content) => {
                self.page.write_content(region, content);
                FlowOutcome::Rendered
            }
            Err(err) => {
                let outcome = if err.is_local() {
                    FlowOutcome::ShortCircuited
                } else {
                    warn!(flow, error = %err, "order flow failed");
                    FlowOutcome::ErrorDisplayed
                };
                self.page.write_content(region, Content::Text(err.to_string()));
                outcome
            }
        }
    }
}

fn parse_document(body: &[u8]) -> Result<Value, FlowError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Integral floats are written as integers, so `1.0` and `1e2` go out as `1` and `100`.
fn normalize_numbers(value: Value) -> Value {
    match value {
        Value::Number(number) if number.is_f64() => match number.as_f64() {
            Some(float) if float.fract() == 0.0 && float.abs() < 9.0e15 => {
                Value::from(float as i64)
            }
            _ => Value::Number(number),
        },
        Value::Array(elements) => {
            Value::Array(elements.into_iter().map(normalize_numbers).collect())
        }
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, field)| (key, normalize_numbers(field)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
