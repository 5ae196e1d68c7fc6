use std::fmt;

pub const DEFAULT_API_BASE: &str = "http://localhost:8081";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRoute<'a> {
    Order { order_uid: &'a str },
    Orders,
    PublishOrder,
}

impl ApiRoute<'_> {
    pub fn method(&self) -> Method {
        match self {
            Self::Order { .. } | Self::Orders => Method::Get,
            Self::PublishOrder => Method::Post,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Order { order_uid } => format!("/order/{order_uid}"),
            Self::Orders => "/orders".to_string(),
            Self::PublishOrder => "/publish-order".to_string(),
        }
    }

    pub fn url(&self, api_base: &str) -> String {
        format!("{}{}", api_base.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for ApiRoute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
